pub mod record;

pub use record::PersonalInfoRecord;
