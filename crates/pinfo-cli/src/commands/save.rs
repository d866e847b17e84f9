//! Save command
//!
//! Usage: pinfo save --name <NAME> --dob <YYYY-MM-DD> --email <EMAIL>

use clap::Args;
use pinfo_core::{PersonalInfoStore, ProfileForm, ProfileInput};

use crate::backend::BackendArgs;

#[derive(Debug, Args)]
pub struct SaveArgs {
    /// Display name (may be empty)
    #[arg(long, default_value = "")]
    pub name: String,

    /// Date of birth as YYYY-MM-DD
    #[arg(long)]
    pub dob: String,

    #[arg(long)]
    pub email: String,
}

pub fn execute(backend: &BackendArgs, args: SaveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let input = ProfileInput::parse(args.name, &args.dob, args.email)?;

    let store = PersonalInfoStore::new(backend.open()?);
    ProfileForm::new(&store).submit(input)?;

    println!("Personal information saved");
    Ok(())
}
