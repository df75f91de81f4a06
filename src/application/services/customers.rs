//! Customer directory service

use std::sync::Arc;

use log::info;
use uuid::Uuid;

use crate::domain::{
    Customer, CustomerQuery, DomainError, DomainResult, Page, RepositoryProvider,
};

pub struct CustomerService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CustomerService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(
        &self,
        full_name: &str,
        phone: Option<String>,
        email: Option<String>,
    ) -> DomainResult<Customer> {
        let phone = phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        let email = email
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty());
        let customer = self
            .repos
            .customers()
            .insert(Customer::new(full_name.trim(), phone, email))
            .await?;
        info!("Customer created: {}", customer.id);
        Ok(customer)
    }

    pub async fn list(&self, query: CustomerQuery) -> DomainResult<Page<Customer>> {
        self.repos.customers().list(query).await
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Customer> {
        self.repos
            .customers()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Customer", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryRepositories;

    #[tokio::test]
    async fn create_normalizes_contact_fields() {
        let service = CustomerService::new(Arc::new(InMemoryRepositories::new()));
        let customer = service
            .create(
                "  Dana Reeve ",
                Some("  ".to_string()),
                Some(" Dana@Example.COM ".to_string()),
            )
            .await
            .unwrap();
        assert_eq!(customer.full_name, "Dana Reeve");
        assert_eq!(customer.phone, None);
        assert_eq!(customer.email.as_deref(), Some("dana@example.com"));
    }
}
