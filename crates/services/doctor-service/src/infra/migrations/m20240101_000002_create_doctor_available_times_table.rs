//! Migration: Create the time slot collection of each doctor.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_doctors_table::Doctors;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DoctorAvailableTimes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DoctorAvailableTimes::DoctorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DoctorAvailableTimes::Position)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DoctorAvailableTimes::TimeSlot)
                            .string()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(DoctorAvailableTimes::DoctorId)
                            .col(DoctorAvailableTimes::Position),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_doctor_available_times_doctor_id")
                            .from(DoctorAvailableTimes::Table, DoctorAvailableTimes::DoctorId)
                            .to(Doctors::Table, Doctors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DoctorAvailableTimes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DoctorAvailableTimes {
    Table,
    DoctorId,
    Position,
    TimeSlot,
}
