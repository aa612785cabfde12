//! 内存产品存储
//!
//! 用于测试与离线运行。每个操作持有整张表的锁，ID 分配与唯一性检查是原子的。

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::app::product::model::{NewProduct, Product, ProductChanges, ProductId};
use crate::app::product::repository::ProductRepository;
use crate::core::error::{CoreError, Result};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<ProductId, Product>,
    /// 下一个自动分配的 ID，总是大于已使用的最大 ID
    next_id: i64,
}

impl Table {
    fn allocate(&mut self) -> Result<ProductId> {
        let candidate = self.next_id.max(1) as u64;
        let id = ProductId::new(candidate)?;
        self.bump_past(id);
        Ok(id)
    }

    fn bump_past(&mut self, id: ProductId) {
        let after = id.next().map(ProductId::as_i64).unwrap_or(i64::MAX);
        self.next_id = self.next_id.max(after);
    }
}

#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    table: RwLock<Table>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: NewProduct) -> Result<Product> {
        product.ensure_valid()?;

        let mut table = self.table.write().await;
        let id = match product.id {
            Some(id) if table.rows.contains_key(&id) => return Err(CoreError::DuplicateId(id)),
            Some(id) => {
                table.bump_past(id);
                id
            }
            None => {
                let id = table.allocate()?;
                if table.rows.contains_key(&id) {
                    return Err(CoreError::DuplicateId(id));
                }
                id
            }
        };

        let row = Product {
            id,
            name: product.name,
            price: product.price,
        };
        table.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn find(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Product>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn update(&self, id: ProductId, changes: ProductChanges) -> Result<Product> {
        changes.ensure_valid()?;

        let mut table = self.table.write().await;
        let row = table.rows.get_mut(&id).ok_or(CoreError::NotFound(id))?;
        row.apply(changes);
        Ok(row.clone())
    }

    async fn delete(&self, id: ProductId) -> Result<()> {
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(CoreError::NotFound(id))
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.table.read().await.rows.len() as u64)
    }
}
