pub mod formatter;
pub mod progress;
pub mod validator;
