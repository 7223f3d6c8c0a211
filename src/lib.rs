#![doc = include_str!("../README.md")]

pub mod api;
pub mod cli;
pub mod error;
pub mod log;
pub mod tools;
pub mod types;

pub use api::{BaseValidator, RequiredFields, Submitter};
pub use error::*;
pub use tools::validate::{validate, validate_with};
pub use types::*;
