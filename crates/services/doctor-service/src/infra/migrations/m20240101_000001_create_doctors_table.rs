//! Migration: Create doctors table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Doctors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Doctors::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Doctors::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Doctors::Specialty).string_len(50).not_null())
                    .col(ColumnDef::new(Doctors::Email).string().not_null())
                    .col(ColumnDef::new(Doctors::Password).string().not_null())
                    .col(ColumnDef::new(Doctors::Phone).string_len(15).not_null())
                    .col(ColumnDef::new(Doctors::YearsOfExperience).big_integer().null())
                    .col(ColumnDef::new(Doctors::ClinicAddress).text().null())
                    .col(ColumnDef::new(Doctors::Rating).big_integer().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_doctors_email")
                    .table(Doctors::Table)
                    .col(Doctors::Email)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Doctors::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Doctors {
    Table,
    Id,
    Name,
    Specialty,
    Email,
    Password,
    Phone,
    YearsOfExperience,
    ClinicAddress,
    Rating,
}
