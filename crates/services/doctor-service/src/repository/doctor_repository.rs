//! Doctor repository implementation.
//!
//! A doctor is stored as one `doctors` row plus one `doctor_available_times`
//! row per time slot. Writes touching both tables run in one transaction.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DbErr, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};

use super::entities::doctor::{self, ActiveModel, Entity as DoctorEntity};
use super::entities::doctor_available_time::{self, Entity as AvailableTimeEntity};
use common::{AppError, AppResult};
use domain::DoctorRecord;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Doctor repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DoctorRepository: Send + Sync {
    /// Find doctor by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<DoctorRecord>>;

    /// Find doctor by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<DoctorRecord>>;

    /// List all doctors ordered by ID
    async fn list(&self) -> AppResult<Vec<DoctorRecord>>;

    /// Persist a transient record and return it with its generated ID
    async fn insert(&self, doctor: &DoctorRecord) -> AppResult<DoctorRecord>;

    /// Overwrite a persisted record, time slots included
    async fn update(&self, doctor: &DoctorRecord) -> AppResult<DoctorRecord>;

    /// Delete a doctor and its time slots
    async fn delete(&self, id: i64) -> AppResult<()>;

    /// Check storage connectivity
    async fn ping(&self) -> AppResult<()>;
}

/// Concrete implementation of DoctorRepository
pub struct DoctorStore {
    db: DatabaseConnection,
}

impl DoctorStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_times(&self, model: doctor::Model) -> AppResult<DoctorRecord> {
        let times = model
            .find_related(AvailableTimeEntity)
            .order_by_asc(doctor_available_time::Column::Position)
            .all(&self.db)
            .await?;

        to_record(model, times)
    }
}

/// Stored rows are expected to satisfy every field rule.
fn to_record(
    model: doctor::Model,
    times: Vec<doctor_available_time::Model>,
) -> AppResult<DoctorRecord> {
    let id = model.id;
    model
        .into_record(times)
        .map_err(|e| AppError::internal(format!("Stored doctor {} is invalid: {}", id, e)))
}

/// The only unique column besides the key is `email`.
fn write_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(sql_err) if is_unique_violation(&sql_err) => AppError::conflict("Email"),
        _ => AppError::from(err),
    }
}

fn is_unique_violation(err: &SqlErr) -> bool {
    matches!(err, SqlErr::UniqueConstraintViolation(_))
}

fn to_active_model(doctor: &DoctorRecord) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        name: Set(doctor.name().to_string()),
        specialty: Set(doctor.specialty().to_string()),
        email: Set(doctor.email().to_string()),
        password: Set(doctor.password().to_string()),
        phone: Set(doctor.phone().to_string()),
        years_of_experience: Set(doctor.years_of_experience()),
        clinic_address: Set(doctor.clinic_address().map(str::to_string)),
        rating: Set(doctor.rating()),
    }
}

async fn insert_times<C: ConnectionTrait>(
    conn: &C,
    doctor_id: i64,
    times: &[String],
) -> AppResult<()> {
    // insert_many rejects an empty batch
    if times.is_empty() {
        return Ok(());
    }

    let rows = times
        .iter()
        .enumerate()
        .map(|(position, slot)| {
            let position = i32::try_from(position)
                .map_err(|_| AppError::validation("availableTimes has too many entries"))?;
            Ok(doctor_available_time::ActiveModel {
                doctor_id: Set(doctor_id),
                position: Set(position),
                time_slot: Set(slot.clone()),
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    AvailableTimeEntity::insert_many(rows)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

async fn delete_times<C: ConnectionTrait>(conn: &C, doctor_id: i64) -> AppResult<()> {
    AvailableTimeEntity::delete_many()
        .filter(doctor_available_time::Column::DoctorId.eq(doctor_id))
        .exec(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl DoctorRepository for DoctorStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<DoctorRecord>> {
        match DoctorEntity::find_by_id(id).one(&self.db).await? {
            Some(model) => self.with_times(model).await.map(Some),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<DoctorRecord>> {
        let result = DoctorEntity::find()
            .filter(doctor::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        match result {
            Some(model) => self.with_times(model).await.map(Some),
            None => Ok(None),
        }
    }

    async fn list(&self) -> AppResult<Vec<DoctorRecord>> {
        let rows = DoctorEntity::find()
            .order_by_asc(doctor::Column::Id)
            .find_with_related(AvailableTimeEntity)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(model, times)| to_record(model, times))
            .collect()
    }

    async fn insert(&self, doctor: &DoctorRecord) -> AppResult<DoctorRecord> {
        if doctor.is_persisted() {
            return Err(AppError::bad_request("Doctor is already persisted"));
        }

        let txn = self.db.begin().await?;
        let model = to_active_model(doctor)
            .insert(&txn)
            .await
            .map_err(write_error)?;
        insert_times(&txn, model.id, doctor.available_times()).await?;
        txn.commit().await?;

        let mut stored = doctor.clone();
        stored.assign_id(model.id)?;
        Ok(stored)
    }

    async fn update(&self, doctor: &DoctorRecord) -> AppResult<DoctorRecord> {
        let id = doctor.id().ok_or(AppError::NotFound)?;

        let txn = self.db.begin().await?;
        DoctorEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active = to_active_model(doctor);
        active.id = Set(id);
        active.update(&txn).await.map_err(write_error)?;

        delete_times(&txn, id).await?;
        insert_times(&txn, id, doctor.available_times()).await?;
        txn.commit().await?;

        Ok(doctor.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let txn = self.db.begin().await?;
        delete_times(&txn, id).await?;

        let result = DoctorEntity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        txn.commit().await?;
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        crate::infra::ping(&self.db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn doctor_row(id: i64) -> doctor::Model {
        doctor::Model {
            id,
            name: "Meredith Grey".to_string(),
            specialty: "General Surgery".to_string(),
            email: format!("grey{}@seattlegrace.org", id),
            password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
            phone: "2065550100".to_string(),
            years_of_experience: Some(12),
            clinic_address: None,
            rating: Some(5),
        }
    }

    fn slot(doctor_id: i64, position: i32, time_slot: &str) -> doctor_available_time::Model {
        doctor_available_time::Model {
            doctor_id,
            position,
            time_slot: time_slot.to_string(),
        }
    }

    fn new_record() -> DoctorRecord {
        let (_, fields) = to_record(doctor_row(1), vec![slot(1, 0, "09:00-10:00")])
            .unwrap()
            .into_fields();
        DoctorRecord::new(fields).unwrap()
    }

    #[tokio::test]
    async fn test_find_by_id_restores_slot_order() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![doctor_row(1)]])
            .append_query_results([vec![
                slot(1, 1, "10:00-11:00"),
                slot(1, 0, "09:00-10:00"),
            ]])
            .into_connection();

        let doctor = DoctorStore::new(db).find_by_id(1).await.unwrap().unwrap();

        assert_eq!(doctor.id(), Some(1));
        assert_eq!(doctor.available_times(), ["09:00-10:00", "10:00-11:00"]);
        assert_eq!(doctor.rating(), Some(5));
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<doctor::Model>::new()])
            .into_connection();

        assert!(DoctorStore::new(db).find_by_id(9).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_stored_row_is_internal_error() {
        let mut row = doctor_row(1);
        row.name = "Jo".to_string();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row]])
            .append_query_results([Vec::<doctor_available_time::Model>::new()])
            .into_connection();

        let result = DoctorStore::new(db).find_by_id(1).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_insert_assigns_generated_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![doctor_row(42)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let stored = DoctorStore::new(db).insert(&new_record()).await.unwrap();

        assert_eq!(stored.id(), Some(42));
        assert_eq!(stored.available_times(), ["09:00-10:00"]);
    }

    #[tokio::test]
    async fn test_insert_rejects_persisted_record() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let persisted = to_record(doctor_row(3), Vec::new()).unwrap();

        let result = DoctorStore::new(db).insert(&persisted).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_update_transient_record_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = DoctorStore::new(db).update(&new_record()).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();

        let result = DoctorStore::new(db).delete(5).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_rewrites_row_and_replaces_slots() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![doctor_row(1)]])
            .append_query_results([vec![doctor_row(1)]])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                },
            ])
            .into_connection();

        let mut doctor = to_record(doctor_row(1), vec![slot(1, 0, "09:00-10:00")]).unwrap();
        doctor.set_available_times(vec!["13:00-14:00".to_string(), "14:00-15:00".to_string()]);

        let store = DoctorStore::new(db);
        let updated = store.update(&doctor).await.unwrap();
        assert_eq!(updated.id(), Some(1));
        assert_eq!(updated.available_times(), ["13:00-14:00", "14:00-15:00"]);

        let log = format!("{:?}", store.db.into_transaction_log());
        assert!(log.contains("UPDATE"));
        assert!(log.contains("DELETE FROM"));
        assert!(log.contains("INSERT INTO"));
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<doctor::Model>::new()])
            .into_connection();
        let doctor = to_record(doctor_row(4), Vec::new()).unwrap();

        let result = DoctorStore::new(db).update(&doctor).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_existing_doctor() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        assert!(DoctorStore::new(db).delete(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_keeps_id_order_and_slot_positions() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                (doctor_row(1), slot(1, 1, "10:00-11:00")),
                (doctor_row(1), slot(1, 0, "09:00-10:00")),
                (doctor_row(2), slot(2, 0, "08:00-09:00")),
            ]])
            .into_connection();

        let doctors = DoctorStore::new(db).list().await.unwrap();

        let ids: Vec<Option<i64>> = doctors.iter().map(DoctorRecord::id).collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);
        assert_eq!(doctors[0].available_times(), ["09:00-10:00", "10:00-11:00"]);
        assert_eq!(doctors[1].available_times(), ["08:00-09:00"]);
    }

    #[test]
    fn test_unique_violation_maps_to_email_conflict() {
        assert!(is_unique_violation(&SqlErr::UniqueConstraintViolation(
            "duplicate key value violates unique constraint \"idx_doctors_email\"".to_string()
        )));
        assert!(!is_unique_violation(&SqlErr::ForeignKeyConstraintViolation(
            "fk_doctor_available_times_doctor_id".to_string()
        )));
    }

    #[test]
    fn test_other_write_errors_stay_database_errors() {
        let err = write_error(DbErr::Custom("connection reset".to_string()));
        assert!(matches!(err, AppError::Database(_)));
    }
}
