use thiserror::Error;
use user_profile_common::BaseError;
#[derive(Error, Debug)]
pub enum UserError {
    #[error("Invalid value for {field}: {value}")]
    InvalidFieldValue { field: &'static str, value: String },
    #[error(transparent)]
    Base(#[from] BaseError),
}
