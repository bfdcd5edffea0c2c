//! Domain layer - Core business entities and value objects.
//!
//! This crate contains the doctor profile record, its validation rules and
//! the request/response shapes built around it. It has no infrastructure
//! dependencies.

pub mod constants;
pub mod doctor;
pub mod error;
pub mod password;
pub mod validation;

pub use constants::*;
pub use doctor::{DoctorRecord, DoctorResponse, NewDoctor, UpdateDoctor};
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use validation::{DoctorField, ValidationError};
