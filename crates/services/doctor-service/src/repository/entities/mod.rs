//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod doctor;
pub mod doctor_available_time;
