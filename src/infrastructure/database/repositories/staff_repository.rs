//! SeaORM implementation of StaffRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::db_err;
use crate::domain::staff::{StaffMember, StaffQuery, StaffRepository};
use crate::domain::{DomainError, DomainResult, Page};
use crate::infrastructure::database::entities::staff_member;

pub struct SeaOrmStaffRepository {
    db: DatabaseConnection,
}

impl SeaOrmStaffRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: staff_member::Model) -> StaffMember {
    StaffMember {
        id: m.id,
        full_name: m.full_name,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(s: StaffMember) -> staff_member::ActiveModel {
    staff_member::ActiveModel {
        id: Set(s.id),
        full_name: Set(s.full_name),
        is_active: Set(s.is_active),
        created_at: Set(s.created_at),
        updated_at: Set(s.updated_at),
    }
}

// ── StaffRepository impl ────────────────────────────────────────

#[async_trait]
impl StaffRepository for SeaOrmStaffRepository {
    async fn insert(&self, staff: StaffMember) -> DomainResult<StaffMember> {
        debug!("Saving staff member: {}", staff.id);
        let model = domain_to_active(staff)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model_to_domain(model))
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<StaffMember>> {
        let model = staff_member::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, staff: StaffMember) -> DomainResult<StaffMember> {
        debug!("Updating staff member: {}", staff.id);
        let existing = staff_member::Entity::find_by_id(staff.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Staff member", staff.id));
        }
        let model = domain_to_active(staff)
            .update(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model_to_domain(model))
    }

    async fn list(&self, query: StaffQuery) -> DomainResult<Page<StaffMember>> {
        let mut select = staff_member::Entity::find();
        if let Some(q) = &query.q {
            select = select.filter(staff_member::Column::FullName.contains(q));
        }
        if let Some(is_active) = query.is_active {
            select = select.filter(staff_member::Column::IsActive.eq(is_active));
        }

        let total = select.clone().count(&self.db).await.map_err(db_err)?;
        let models = select
            .order_by_desc(staff_member::Column::CreatedAt)
            .limit(query.limit)
            .offset(query.offset)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(Page::new(
            models.into_iter().map(model_to_domain).collect(),
            total,
        ))
    }
}
