//! Repository layer for data access.

pub mod entities;
mod doctor_repository;

pub use doctor_repository::{DoctorRepository, DoctorStore};

#[cfg(any(test, feature = "test-utils"))]
pub use doctor_repository::MockDoctorRepository;
