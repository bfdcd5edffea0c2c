//! Field validation rules for doctor profiles.
//!
//! Every construction and mutation path of [`DoctorRecord`](crate::DoctorRecord)
//! goes through the `check_*` functions here. The request shapes implement
//! [`validator::Validate`] on top of the same functions so the HTTP layer can
//! reject a payload before it reaches the record.

use std::borrow::Cow;
use std::fmt;

use thiserror::Error;
use validator::{Validate, ValidateEmail, ValidationErrors};

use crate::constants::{
    EXPERIENCE_MAX_YEARS, EXPERIENCE_MIN_YEARS, MIN_PASSWORD_LENGTH, NAME_MAX_LENGTH,
    NAME_MIN_LENGTH, PHONE_MAX_LENGTH, PHONE_MIN_LENGTH, RATING_MAX, RATING_MIN,
    SPECIALTY_MAX_LENGTH, SPECIALTY_MIN_LENGTH,
};
use crate::doctor::{NewDoctor, UpdateDoctor};

/// Attributes of a doctor profile, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoctorField {
    Id,
    Name,
    Specialty,
    Email,
    Password,
    Phone,
    AvailableTimes,
    YearsOfExperience,
    ClinicAddress,
    Rating,
}

impl DoctorField {
    /// External (camelCase) field name
    pub fn as_str(&self) -> &'static str {
        match self {
            DoctorField::Id => "id",
            DoctorField::Name => "name",
            DoctorField::Specialty => "specialty",
            DoctorField::Email => "email",
            DoctorField::Password => "password",
            DoctorField::Phone => "phone",
            DoctorField::AvailableTimes => "availableTimes",
            DoctorField::YearsOfExperience => "yearsOfExperience",
            DoctorField::ClinicAddress => "clinicAddress",
            DoctorField::Rating => "rating",
        }
    }
}

impl fmt::Display for DoctorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field value that was rejected by its rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} {message}")]
pub struct ValidationError {
    /// Offending field
    pub field: DoctorField,
    /// Short machine-readable rule name ("required", "length", "email", "range", "immutable")
    pub code: &'static str,
    /// Human-readable description, without the field name
    pub message: String,
}

impl ValidationError {
    pub fn new(field: DoctorField, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }

    fn required(field: DoctorField) -> Self {
        Self::new(field, "required", "is required")
    }

    /// Rejection for an identifier that is already set
    pub fn id_already_assigned(current: i64) -> Self {
        Self::new(
            DoctorField::Id,
            "immutable",
            format!("is already assigned ({})", current),
        )
    }
}

impl From<ValidationError> for validator::ValidationError {
    fn from(err: ValidationError) -> Self {
        let mut error = validator::ValidationError::new(err.code);
        error.message = Some(Cow::Owned(err.to_string()));
        error
    }
}

/// Unwrap a required value or report the field as missing.
pub fn required<T>(field: DoctorField, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::required(field))
}

fn check_length(
    field: DoctorField,
    value: &str,
    min: usize,
    max: Option<usize>,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    match max {
        Some(max) if len < min || len > max => Err(ValidationError::new(
            field,
            "length",
            format!("must be between {} and {} characters", min, max),
        )),
        None if len < min => Err(ValidationError::new(
            field,
            "length",
            format!("must be at least {} characters", min),
        )),
        _ => Ok(()),
    }
}

fn check_range(
    field: DoctorField,
    value: Option<i64>,
    min: i64,
    max: i64,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if !(min..=max).contains(&v) => Err(ValidationError::new(
            field,
            "range",
            format!("must be between {} and {}", min, max),
        )),
        _ => Ok(()),
    }
}

pub fn check_name(value: &str) -> Result<(), ValidationError> {
    check_length(
        DoctorField::Name,
        value,
        NAME_MIN_LENGTH,
        Some(NAME_MAX_LENGTH),
    )
}

pub fn check_specialty(value: &str) -> Result<(), ValidationError> {
    check_length(
        DoctorField::Specialty,
        value,
        SPECIALTY_MIN_LENGTH,
        Some(SPECIALTY_MAX_LENGTH),
    )
}

pub fn check_email(value: &str) -> Result<(), ValidationError> {
    if value.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new(
            DoctorField::Email,
            "email",
            "must be a valid email address",
        ))
    }
}

pub fn check_password(value: &str) -> Result<(), ValidationError> {
    check_length(DoctorField::Password, value, MIN_PASSWORD_LENGTH, None)
}

pub fn check_phone(value: &str) -> Result<(), ValidationError> {
    check_length(
        DoctorField::Phone,
        value,
        PHONE_MIN_LENGTH,
        Some(PHONE_MAX_LENGTH),
    )
}

pub fn check_years_of_experience(value: Option<i64>) -> Result<(), ValidationError> {
    check_range(
        DoctorField::YearsOfExperience,
        value,
        EXPERIENCE_MIN_YEARS,
        EXPERIENCE_MAX_YEARS,
    )
}

pub fn check_rating(value: Option<i64>) -> Result<(), ValidationError> {
    check_range(DoctorField::Rating, value, RATING_MIN, RATING_MAX)
}

/// Run a rule against a required text value.
fn check_required(
    field: DoctorField,
    value: Option<&str>,
    rule: fn(&str) -> Result<(), ValidationError>,
) -> Result<(), ValidationError> {
    required(field, value).and_then(rule)
}

/// Run a rule against a value that is only checked when present.
fn check_present(
    value: Option<&str>,
    rule: fn(&str) -> Result<(), ValidationError>,
) -> Result<(), ValidationError> {
    value.map_or(Ok(()), rule)
}

/// All failures of a construction payload, in field declaration order.
pub fn new_doctor_failures(new: &NewDoctor) -> Vec<ValidationError> {
    [
        check_required(DoctorField::Name, new.name.as_deref(), check_name),
        check_required(DoctorField::Specialty, new.specialty.as_deref(), check_specialty),
        check_required(DoctorField::Email, new.email.as_deref(), check_email),
        check_required(DoctorField::Password, new.password.as_deref(), check_password),
        check_required(DoctorField::Phone, new.phone.as_deref(), check_phone),
        check_years_of_experience(new.years_of_experience),
        check_rating(new.rating),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect()
}

/// All failures of a partial update, in field declaration order.
pub fn update_failures(update: &UpdateDoctor) -> Vec<ValidationError> {
    [
        check_present(update.name.as_deref(), check_name),
        check_present(update.specialty.as_deref(), check_specialty),
        check_present(update.email.as_deref(), check_email),
        check_present(update.password.as_deref(), check_password),
        check_present(update.phone.as_deref(), check_phone),
        check_years_of_experience(update.years_of_experience),
        check_rating(update.rating),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect()
}

fn into_validation_errors(failures: Vec<ValidationError>) -> Result<(), ValidationErrors> {
    if failures.is_empty() {
        return Ok(());
    }

    let mut errors = ValidationErrors::new();
    for failure in failures {
        errors.add(failure.field.as_str(), failure.into());
    }
    Err(errors)
}

impl Validate for NewDoctor {
    fn validate(&self) -> Result<(), ValidationErrors> {
        into_validation_errors(new_doctor_failures(self))
    }
}

impl Validate for UpdateDoctor {
    fn validate(&self) -> Result<(), ValidationErrors> {
        into_validation_errors(update_failures(self))
    }
}
