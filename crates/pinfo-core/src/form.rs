//! Profile form flow
//!
//! The actions a profile editing screen performs, without the screen:
//! populate the fields from storage, revert unsaved edits, and submit.

use std::time::Instant;

use chrono::NaiveDate;
use pinfo_core_types::Sensitive;

use crate::clock::Clock;
use crate::errors::{PInfoError, Result};
use crate::kv::KeyValueStore;
use crate::model::PersonalInfoRecord;
use crate::personal_info::PersonalInfoStore;
use crate::validation::EmailValidator;
use crate::{log_op_end, log_op_error, log_op_start};

/// Raw values entered by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileInput {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub email: String,
}

impl ProfileInput {
    /// Build input from text fields, parsing the date as `YYYY-MM-DD`
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateOfBirth` when the date does not parse.
    pub fn parse(
        name: impl Into<String>,
        date_of_birth: &str,
        email: impl Into<String>,
    ) -> Result<Self> {
        let date_of_birth = NaiveDate::parse_from_str(date_of_birth.trim(), "%Y-%m-%d")
            .map_err(|_| PInfoError::InvalidDateOfBirth {
                input: date_of_birth.to_string(),
            })?;
        Ok(Self {
            name: name.into(),
            date_of_birth,
            email: email.into(),
        })
    }
}

/// Drives a [`PersonalInfoStore`] the way a profile screen would
pub struct ProfileForm<'a, S, C> {
    store: &'a PersonalInfoStore<S, C>,
}

impl<'a, S: KeyValueStore, C: Clock> ProfileForm<'a, S, C> {
    pub fn new(store: &'a PersonalInfoStore<S, C>) -> Self {
        Self { store }
    }

    /// Saved profile used to fill the input fields
    pub fn populate(&self) -> PersonalInfoRecord {
        self.store.load()
    }

    /// Discard edits by reloading the saved profile
    pub fn revert(&self) -> PersonalInfoRecord {
        let record = self.store.load();
        tracing::info!("personal information reverted");
        record
    }

    /// Validate and persist the entered profile
    ///
    /// # Errors
    ///
    /// - `InvalidEmail` if the email fails validation; nothing is written.
    /// - `SaveFailed` if the backend rejects the commit.
    pub fn submit(&self, input: ProfileInput) -> Result<PersonalInfoRecord> {
        let started = Instant::now();
        log_op_start!("submit_profile");

        if let Err(rule) = EmailValidator::check(Some(&input.email)) {
            tracing::warn!(
                email = %Sensitive::new(&input.email),
                rule = %rule,
                "not saving personal information: invalid email"
            );
            log_op_error!("submit_profile", PInfoError::InvalidEmail, since = started);
            return Err(PInfoError::InvalidEmail);
        }

        let record =
            PersonalInfoRecord::with_birth_date(input.name, input.date_of_birth, input.email);

        if !self.store.save(&record) {
            let err = PInfoError::SaveFailed {
                backend: self.store.backend().backend_name().to_string(),
            };
            log_op_error!("submit_profile", err.clone(), since = started);
            return Err(err);
        }

        tracing::info!("personal information saved");
        log_op_end!("submit_profile", since = started);
        Ok(record)
    }
}
