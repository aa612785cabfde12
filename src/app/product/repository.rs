//! 产品存储接口

use async_trait::async_trait;

use super::model::{NewProduct, Product, ProductChanges, ProductId};
use crate::core::error::Result;

/// 产品存储
///
/// 实现必须独立拒绝违反名称约束的写入，即便调用方绕过了服务层。
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 插入记录；`id` 为空时分配下一个可用 ID，重复 ID 返回 `DuplicateId`
    async fn insert(&self, product: NewProduct) -> Result<Product>;

    async fn find(&self, id: ProductId) -> Result<Option<Product>>;

    /// 按 ID 升序返回全部记录
    async fn list(&self) -> Result<Vec<Product>>;

    async fn update(&self, id: ProductId, changes: ProductChanges) -> Result<Product>;

    async fn delete(&self, id: ProductId) -> Result<()>;

    async fn count(&self) -> Result<u64>;
}
