//! PostgreSQL 产品存储
//!
//! 名称约束由列定义 (`VARCHAR(100) NOT NULL CHECK (name <> '')`) 强制执行，
//! 驱动返回的错误码在这里映射为 [`CoreError`]。

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use tracing::warn;

use crate::app::product::model::{NewProduct, Product, ProductChanges, ProductId};
use crate::app::product::repository::ProductRepository;
use crate::core::error::{CoreError, Result};

const UNIQUE_VIOLATION: &str = "23505";
const CHECK_VIOLATION: &str = "23514";
const NOT_NULL_VIOLATION: &str = "23502";
const STRING_TOO_LONG: &str = "22001";

const INSERT_AUTO: &str =
    "INSERT INTO products (name, price) VALUES ($1, $2) RETURNING id, name, price";
const INSERT_WITH_ID: &str =
    "INSERT INTO products (id, name, price) VALUES ($1, $2, $3) RETURNING id, name, price";
// 插入期间串行化所有写入方，显式 ID 与序列推进在同一事务内完成
const LOCK_TABLE: &str = "LOCK TABLE products IN SHARE ROW EXCLUSIVE MODE";
// 只在显式 ID 超过序列高水位时推进序列，序列永不回退
const ADVANCE_SEQUENCE: &str = "SELECT setval('products_id_seq', $1) FROM products_id_seq \
     WHERE $1 > CASE WHEN is_called THEN last_value ELSE last_value - 1 END";
const FIND_BY_ID: &str = "SELECT id, name, price FROM products WHERE id = $1";
const LIST_ALL: &str = "SELECT id, name, price FROM products ORDER BY id";
const UPDATE: &str = "UPDATE products SET name = COALESCE($1, name), price = COALESCE($2, price) \
     WHERE id = $3 RETURNING id, name, price";

#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// 将驱动错误映射为领域错误
pub(crate) fn map_error(err: sqlx::Error, id: Option<ProductId>) -> CoreError {
    let code = err
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned());

    match (code.as_deref(), id) {
        (Some(UNIQUE_VIOLATION), Some(id)) => CoreError::DuplicateId(id),
        (Some(CHECK_VIOLATION | NOT_NULL_VIOLATION | STRING_TOO_LONG), _) => {
            warn!("Store rejected product row: {}", err);
            CoreError::Validation(format!("存储层拒绝写入: {}", err))
        }
        _ => CoreError::Database(err),
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn insert(&self, product: NewProduct) -> Result<Product> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(LOCK_TABLE).execute(&mut *tx).await?;

        let row = match product.id {
            None => sqlx::query_as::<_, Product>(INSERT_AUTO)
                .bind(&product.name)
                .bind(product.price)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| map_error(e, None))?,
            Some(id) => {
                let row = sqlx::query_as::<_, Product>(INSERT_WITH_ID)
                    .bind(id)
                    .bind(&product.name)
                    .bind(product.price)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(|e| map_error(e, Some(id)))?;

                sqlx::query(ADVANCE_SEQUENCE)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                row
            }
        };

        tx.commit().await?;
        Ok(row)
    }

    async fn find(&self, id: ProductId) -> Result<Option<Product>> {
        let row = sqlx::query_as::<_, Product>(FIND_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query_as::<_, Product>(LIST_ALL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update(&self, id: ProductId, changes: ProductChanges) -> Result<Product> {
        if changes.is_empty() {
            return Err(CoreError::Validation("没有需要更新的字段".to_string()));
        }

        sqlx::query_as::<_, Product>(UPDATE)
            .bind(changes.name)
            .bind(changes.price)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_error(e, Some(id)))?
            .ok_or(CoreError::NotFound(id))
    }

    async fn delete(&self, id: ProductId) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(id));
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0 as u64)
    }
}
