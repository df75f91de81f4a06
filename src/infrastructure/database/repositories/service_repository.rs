//! SeaORM implementation of ServiceRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::db_err;
use crate::domain::service::{Service, ServiceQuery, ServiceRepository};
use crate::domain::{DomainError, DomainResult, Page};
use crate::infrastructure::database::entities::service;

pub struct SeaOrmServiceRepository {
    db: DatabaseConnection,
}

impl SeaOrmServiceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: service::Model) -> Service {
    Service {
        id: m.id,
        name: m.name,
        duration_min: m.duration_min,
        price_cents: m.price_cents,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(s: Service) -> service::ActiveModel {
    service::ActiveModel {
        id: Set(s.id),
        name: Set(s.name),
        duration_min: Set(s.duration_min),
        price_cents: Set(s.price_cents),
        is_active: Set(s.is_active),
        created_at: Set(s.created_at),
        updated_at: Set(s.updated_at),
    }
}

// ── ServiceRepository impl ──────────────────────────────────────

#[async_trait]
impl ServiceRepository for SeaOrmServiceRepository {
    async fn insert(&self, service: Service) -> DomainResult<Service> {
        debug!("Saving service: {}", service.id);
        let model = domain_to_active(service)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model_to_domain(model))
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Service>> {
        let model = service::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, service: Service) -> DomainResult<Service> {
        debug!("Updating service: {}", service.id);
        let existing = service::Entity::find_by_id(service.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Service", service.id));
        }
        let model = domain_to_active(service)
            .update(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model_to_domain(model))
    }

    async fn list(&self, query: ServiceQuery) -> DomainResult<Page<Service>> {
        let mut select = service::Entity::find();
        if let Some(q) = &query.q {
            select = select.filter(service::Column::Name.contains(q));
        }
        if let Some(is_active) = query.is_active {
            select = select.filter(service::Column::IsActive.eq(is_active));
        }

        let total = select.clone().count(&self.db).await.map_err(db_err)?;
        let models = select
            .order_by_desc(service::Column::CreatedAt)
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
