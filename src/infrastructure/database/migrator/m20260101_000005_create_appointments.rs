//! Create appointments table
//!
//! The (staff_id, status, start_at) index backs both the day-window queries
//! and the transactional overlap guard in the appointment repository.

use sea_orm_migration::prelude::*;

use super::m20260101_000001_create_staff_members::StaffMembers;
use super::m20260101_000002_create_services::Services;
use super::m20260101_000003_create_customers::Customers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Appointments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Appointments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Appointments::CustomerId).uuid().not_null())
                    .col(ColumnDef::new(Appointments::StaffId).uuid().not_null())
                    .col(ColumnDef::new(Appointments::ServiceId).uuid().not_null())
                    .col(
                        ColumnDef::new(Appointments::Status)
                            .string()
                            .not_null()
                            .default("BOOKED"),
                    )
                    .col(ColumnDef::new(Appointments::StartAt).timestamp().not_null())
                    .col(ColumnDef::new(Appointments::EndAt).timestamp().not_null())
                    .col(ColumnDef::new(Appointments::Notes).string())
                    .col(ColumnDef::new(Appointments::CancelledAt).timestamp())
                    .col(ColumnDef::new(Appointments::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Appointments::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_customer")
                            .from(Appointments::Table, Appointments::CustomerId)
                            .to(Customers::Table, Customers::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_staff")
                            .from(Appointments::Table, Appointments::StaffId)
                            .to(StaffMembers::Table, StaffMembers::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_service")
                            .from(Appointments::Table, Appointments::ServiceId)
                            .to(Services::Table, Services::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_appointments_staff_status_start")
                    .table(Appointments::Table)
                    .col(Appointments::StaffId)
                    .col(Appointments::Status)
                    .col(Appointments::StartAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Appointments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Appointments {
    Table,
    Id,
    CustomerId,
    StaffId,
    ServiceId,
    Status,
    StartAt,
    EndAt,
    Notes,
    CancelledAt,
    CreatedAt,
    UpdatedAt,
}
