//! Email check command
//!
//! Usage: pinfo check-email <EMAIL>

use clap::Args;
use pinfo_core::EmailValidator;

#[derive(Debug, Args)]
pub struct CheckEmailArgs {
    /// Address to check
    pub email: String,
}

pub fn execute(args: CheckEmailArgs) -> Result<(), Box<dyn std::error::Error>> {
    match EmailValidator::check(Some(&args.email)) {
        Ok(()) => {
            println!("valid");
            Ok(())
        }
        Err(rule) => {
            println!("invalid");
            Err(format!("Invalid email: {}", rule).into())
        }
    }
}
