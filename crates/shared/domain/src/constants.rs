//! Domain-level constants.
//!
//! These constants define the validation bounds of a doctor profile.

// =============================================================================
// Text fields
// =============================================================================

/// Minimum doctor name length
pub const NAME_MIN_LENGTH: usize = 3;

/// Maximum doctor name length
pub const NAME_MAX_LENGTH: usize = 100;

/// Minimum specialty length
pub const SPECIALTY_MIN_LENGTH: usize = 3;

/// Maximum specialty length
pub const SPECIALTY_MAX_LENGTH: usize = 50;

/// Minimum phone number length
pub const PHONE_MIN_LENGTH: usize = 10;

/// Maximum phone number length
pub const PHONE_MAX_LENGTH: usize = 15;

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 6;

// =============================================================================
// Numeric fields
// =============================================================================

/// Lowest accepted years of experience (inclusive)
pub const EXPERIENCE_MIN_YEARS: i64 = 0;

/// Highest accepted years of experience (inclusive)
pub const EXPERIENCE_MAX_YEARS: i64 = 50;

/// Lowest rating (inclusive)
pub const RATING_MIN: i64 = 1;

/// Highest rating (inclusive)
pub const RATING_MAX: i64 = 5;
