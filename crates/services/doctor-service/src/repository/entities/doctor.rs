//! Doctor database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{DoctorRecord, DomainResult, NewDoctor};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "doctors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub specialty: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 hash, never a plain password
    pub password: String,
    pub phone: String,
    pub years_of_experience: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub clinic_address: Option<String>,
    pub rating: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::doctor_available_time::Entity")]
    AvailableTimes,
}

impl Related<super::doctor_available_time::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AvailableTimes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert a row and its time slots into the domain record.
    ///
    /// Slots are ordered by their stored position.
    pub fn into_record(
        self,
        mut times: Vec<super::doctor_available_time::Model>,
    ) -> DomainResult<DoctorRecord> {
        times.sort_by_key(|t| t.position);

        DoctorRecord::restore(
            self.id,
            NewDoctor {
                name: Some(self.name),
                specialty: Some(self.specialty),
                email: Some(self.email),
                password: Some(self.password),
                phone: Some(self.phone),
                available_times: times.into_iter().map(|t| t.time_slot).collect(),
                years_of_experience: self.years_of_experience,
                clinic_address: self.clinic_address,
                rating: self.rating,
            },
        )
    }
}
