//! Input validation rules

pub mod email;

pub use email::{EmailRule, EmailValidator};
