//! Show command
//!
//! Usage: pinfo show [--json]

use clap::Args;
use pinfo_core::{PersonalInfoRecord, PersonalInfoStore, ProfileForm};
use serde::Serialize;

use crate::backend::BackendArgs;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Print as a JSON object
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ShowOutput<'a> {
    name: &'a str,
    date_of_birth: String,
    date_of_birth_millis: i64,
    email: &'a str,
}

impl<'a> From<&'a PersonalInfoRecord> for ShowOutput<'a> {
    fn from(record: &'a PersonalInfoRecord) -> Self {
        Self {
            name: record.name(),
            date_of_birth: record.date_of_birth().format("%Y-%m-%d").to_string(),
            date_of_birth_millis: record.date_of_birth_millis(),
            email: record.email(),
        }
    }
}

pub fn execute(backend: &BackendArgs, args: ShowArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = PersonalInfoStore::new(backend.open()?);
    let record = ProfileForm::new(&store).populate();
    let output = ShowOutput::from(&record);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Name:          {}", output.name);
        println!("Date of birth: {}", output.date_of_birth);
        println!("Email:         {}", output.email);
    }
    Ok(())
}
