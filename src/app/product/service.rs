//! 产品业务服务

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::model::{NewProduct, Product, ProductChanges, ProductId};
use super::repository::ProductRepository;
use crate::core::error::{CoreError, Result};

#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, product: NewProduct) -> Result<Product> {
        if let Err(e) = product.ensure_valid() {
            warn!("Rejected product {:?}: {}", product.name, e);
            return Err(e);
        }

        let created = self.repository.insert(product).await?;
        info!("Created product: {} ({})", created.name, created.id);
        Ok(created)
    }

    pub async fn get(&self, id: ProductId) -> Result<Product> {
        debug!("Fetching product {}", id);
        self.repository
            .find(id)
            .await?
            .ok_or(CoreError::NotFound(id))
    }

    pub async fn list(&self) -> Result<Vec<Product>> {
        self.repository.list().await
    }

    pub async fn count(&self) -> Result<u64> {
        self.repository.count().await
    }

    pub async fn rename(&self, id: ProductId, name: impl Into<String>) -> Result<Product> {
        self.update(id, ProductChanges::new().name(name)).await
    }

    pub async fn reprice(&self, id: ProductId, price: f64) -> Result<Product> {
        self.update(id, ProductChanges::new().price(price)).await
    }

    pub async fn update(&self, id: ProductId, changes: ProductChanges) -> Result<Product> {
        if let Err(e) = changes.ensure_valid() {
            warn!("Rejected update of product {}: {}", id, e);
            return Err(e);
        }

        let updated = self.repository.update(id, changes).await?;
        info!("Updated product: {} ({})", updated.name, updated.id);
        Ok(updated)
    }

    pub async fn remove(&self, id: ProductId) -> Result<()> {
        self.repository.delete(id).await?;
        info!("Deleted product: {}", id);
        Ok(())
    }
}
