use chrono::{DateTime, NaiveDate, NaiveTime, SubsecRound, Utc};

/// One saved profile: name, date of birth and email
///
/// A plain data holder. The email is not validated here; callers check it with
/// [`EmailValidator`](crate::EmailValidator) before building a record they
/// intend to save. Fields are private so a record cannot change after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalInfoRecord {
    name: String,
    date_of_birth: DateTime<Utc>,
    email: String,
}

impl PersonalInfoRecord {
    /// Create a record
    ///
    /// The date of birth is truncated to whole milliseconds, the precision it
    /// is stored at, so a saved record compares equal to its reloaded copy.
    pub fn new(
        name: impl Into<String>,
        date_of_birth: DateTime<Utc>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            date_of_birth: date_of_birth.trunc_subsecs(3),
            email: email.into(),
        }
    }

    /// Create a record from a calendar date, taken as midnight UTC
    pub fn with_birth_date(
        name: impl Into<String>,
        date_of_birth: NaiveDate,
        email: impl Into<String>,
    ) -> Self {
        Self::new(name, date_of_birth.and_time(NaiveTime::MIN).and_utc(), email)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date_of_birth(&self) -> DateTime<Utc> {
        self.date_of_birth
    }

    /// Date of birth as epoch milliseconds (storage representation)
    pub fn date_of_birth_millis(&self) -> i64 {
        self.date_of_birth.timestamp_millis()
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}
