//! Create availability_rules table
//!
//! Recurring weekly windows per staff member. Overlapping windows for the
//! same staff member and day are allowed.

use sea_orm_migration::prelude::*;

use super::m20260101_000001_create_staff_members::StaffMembers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AvailabilityRules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AvailabilityRules::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AvailabilityRules::StaffId).uuid().not_null())
                    .col(
                        ColumnDef::new(AvailabilityRules::DayOfWeek)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AvailabilityRules::StartMin)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AvailabilityRules::EndMin)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AvailabilityRules::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_availability_rules_staff")
                            .from(AvailabilityRules::Table, AvailabilityRules::StaffId)
                            .to(StaffMembers::Table, StaffMembers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_availability_rules_staff_day")
                    .table(AvailabilityRules::Table)
                    .col(AvailabilityRules::StaffId)
                    .col(AvailabilityRules::DayOfWeek)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AvailabilityRules::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AvailabilityRules {
    Table,
    Id,
    StaffId,
    DayOfWeek,
    StartMin,
    EndMin,
    CreatedAt,
}
