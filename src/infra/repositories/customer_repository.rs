//! Customer repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};
use uuid::Uuid;

use super::entities::customer::{self, ActiveModel, Entity as CustomerEntity};
use crate::domain::{Customer, NewCustomer};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Customer repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// List all customers ordered by name
    async fn list(&self) -> AppResult<Vec<Customer>>;

    /// Count all customers
    async fn count(&self) -> AppResult<u64>;

    /// Create a new customer
    async fn create(&self, customer: NewCustomer) -> AppResult<Customer>;
}

/// Concrete implementation of CustomerRepository
pub struct CustomerStore {
    db: DatabaseConnection,
}

impl CustomerStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerRepository for CustomerStore {
    async fn list(&self) -> AppResult<Vec<Customer>> {
        let models = CustomerEntity::find()
            .order_by_asc(customer::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Customer::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        CustomerEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn create(&self, customer: NewCustomer) -> AppResult<Customer> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(customer.name),
            email: Set(customer.email),
            image_url: Set(customer.image_url),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Customer::from(model))
    }
}
