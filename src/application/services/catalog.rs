//! Service catalog
//!
//! Management of the bookable offerings (name, duration, price, active
//! flag). The scheduling core only reads these records.

use std::sync::Arc;

use chrono::Utc;
use log::info;
use uuid::Uuid;

use crate::domain::{
    DomainError, DomainResult, Page, RepositoryProvider, Service, ServiceQuery,
};

pub struct CatalogService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CatalogService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(
        &self,
        name: &str,
        duration_min: i32,
        price_cents: Option<i64>,
        is_active: bool,
    ) -> DomainResult<Service> {
        if duration_min < 1 {
            return Err(DomainError::invalid(
                "duration_min must be at least one minute",
            ));
        }
        let service = self
            .repos
            .services()
            .insert(Service::new(name.trim(), duration_min, price_cents, is_active))
            .await?;
        info!("Service created: {} ({})", service.name, service.id);
        Ok(service)
    }

    pub async fn list(&self, query: ServiceQuery) -> DomainResult<Page<Service>> {
        self.repos.services().list(query).await
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Service> {
        self.repos
            .services()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Service", id))
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        duration_min: Option<i32>,
        price_cents: Option<i64>,
        is_active: Option<bool>,
    ) -> DomainResult<Service> {
        let mut service = self.get(id).await?;
        if let Some(name) = name {
            service.name = name.trim().to_string();
        }
        if let Some(duration_min) = duration_min {
            if duration_min < 1 {
                return Err(DomainError::invalid(
                    "duration_min must be at least one minute",
                ));
            }
            service.duration_min = duration_min;
        }
        if price_cents.is_some() {
            service.price_cents = price_cents;
        }
        if let Some(is_active) = is_active {
            service.is_active = is_active;
        }
        service.updated_at = Utc::now().naive_utc();
        self.repos.services().update(service).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryRepositories;

    fn catalog() -> CatalogService {
        CatalogService::new(Arc::new(InMemoryRepositories::new()))
    }

    #[tokio::test]
    async fn create_rejects_zero_duration() {
        let err = catalog().create("Haircut", 0, None, true).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn update_is_partial() {
        let catalog = catalog();
        let service = catalog.create("Haircut", 30, Some(2500), true).await.unwrap();
        let updated = catalog
            .update(service.id, None, Some(45), None, None)
            .await
            .unwrap();
        assert_eq!(updated.duration_min, 45);
        assert_eq!(updated.name, "Haircut");
        assert_eq!(updated.price_cents, Some(2500));
    }
}
