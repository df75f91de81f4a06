//! SeaORM implementation of CustomerRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::db_err;
use crate::domain::customer::{Customer, CustomerQuery, CustomerRepository};
use crate::domain::{DomainResult, Page};
use crate::infrastructure::database::entities::customer;

pub struct SeaOrmCustomerRepository {
    db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: customer::Model) -> Customer {
    Customer {
        id: m.id,
        full_name: m.full_name,
        phone: m.phone,
        email: m.email,
        created_at: m.created_at,
    }
}

// ── CustomerRepository impl ─────────────────────────────────────

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn insert(&self, c: Customer) -> DomainResult<Customer> {
        debug!("Saving customer: {}", c.id);
        let model = customer::ActiveModel {
            id: Set(c.id),
            full_name: Set(c.full_name),
            phone: Set(c.phone),
            email: Set(c.email),
            created_at: Set(c.created_at),
        };
        let model = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(model))
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Customer>> {
        let model = customer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list(&self, query: CustomerQuery) -> DomainResult<Page<Customer>> {
        let mut select = customer::Entity::find();
        if let Some(q) = &query.q {
            select = select.filter(
                Condition::any()
                    .add(customer::Column::FullName.contains(q))
                    .add(customer::Column::Phone.contains(q))
                    .add(customer::Column::Email.contains(q)),
            );
        }

        let total = select.clone().count(&self.db).await.map_err(db_err)?;
        let models = select
            .order_by_desc(customer::Column::CreatedAt)
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
