pub mod check_email;
pub mod save;
pub mod show;
