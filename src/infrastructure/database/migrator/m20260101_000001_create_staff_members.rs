//! Create staff_members table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StaffMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StaffMembers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StaffMembers::FullName).string().not_null())
                    .col(
                        ColumnDef::new(StaffMembers::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(StaffMembers::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(StaffMembers::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StaffMembers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum StaffMembers {
    Table,
    Id,
    FullName,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
