//! Doctor service - Handles doctor profile use cases.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult, OptionExt};
use domain::{DoctorRecord, NewDoctor, Password, UpdateDoctor};

use crate::repository::DoctorRepository;

/// Doctor service trait for dependency injection.
#[async_trait]
pub trait DoctorService: Send + Sync {
    /// Validate and persist a new doctor (password is hashed before storage)
    async fn register(&self, new: NewDoctor) -> AppResult<DoctorRecord>;

    /// Get doctor by ID
    async fn get_doctor(&self, id: i64) -> AppResult<DoctorRecord>;

    /// List all doctors
    async fn list_doctors(&self) -> AppResult<Vec<DoctorRecord>>;

    /// Apply a partial profile update
    async fn update_doctor(&self, id: i64, update: UpdateDoctor) -> AppResult<DoctorRecord>;

    /// Permanently delete a doctor
    async fn delete_doctor(&self, id: i64) -> AppResult<()>;

    /// Check that storage is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Concrete implementation of DoctorService using repository.
pub struct DoctorManager {
    repo: Arc<dyn DoctorRepository>,
}

impl DoctorManager {
    /// Create new doctor service instance with repository
    pub fn new(repo: Arc<dyn DoctorRepository>) -> Self {
        Self { repo }
    }

    async fn ensure_email_available(&self, email: &str, owner: Option<i64>) -> AppResult<()> {
        match self.repo.find_by_email(email).await? {
            Some(existing) if existing.id() != owner => {
                tracing::warn!(email, "Doctor email already registered");
                Err(AppError::conflict("Email"))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl DoctorService for DoctorManager {
    async fn register(&self, new: NewDoctor) -> AppResult<DoctorRecord> {
        let mut doctor = DoctorRecord::new(new)?;

        self.ensure_email_available(doctor.email(), None).await?;

        let hashed = Password::new(doctor.password())?;
        doctor.set_password(hashed.into_string())?;

        let stored = self.repo.insert(&doctor).await?;
        tracing::info!(doctor_id = ?stored.id(), "Doctor registered");
        Ok(stored)
    }

    async fn get_doctor(&self, id: i64) -> AppResult<DoctorRecord> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_doctors(&self) -> AppResult<Vec<DoctorRecord>> {
        self.repo.list().await
    }

    async fn update_doctor(&self, id: i64, mut update: UpdateDoctor) -> AppResult<DoctorRecord> {
        let mut doctor = self.get_doctor(id).await?;

        if let Some(email) = update.email.as_deref() {
            if email != doctor.email() {
                self.ensure_email_available(email, Some(id)).await?;
            }
        }

        // The credential is replaced by its hash, not stored as sent
        let password = update.password.take();
        doctor.apply(update)?;

        if let Some(plain) = password {
            let hashed = Password::new(&plain)?;
            doctor.set_password(hashed.into_string())?;
        }

        let stored = self.repo.update(&doctor).await?;
        tracing::info!(doctor_id = id, "Doctor profile updated");
        Ok(stored)
    }

    async fn delete_doctor(&self, id: i64) -> AppResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(doctor_id = id, "Doctor deleted");
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        self.repo.ping().await
    }
}
