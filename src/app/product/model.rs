//! 产品数据模型

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::core::error::{CoreError, Result};

/// 名称最大长度（字符数，对应 `VARCHAR(100)`）
pub const NAME_MAX_LEN: usize = 100;

/// 产品主键
///
/// 取值范围为 `1..=i64::MAX`，可以无损映射到 PostgreSQL 的 `BIGINT`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
#[cfg_attr(feature = "database", derive(sqlx::Type))]
#[cfg_attr(feature = "database", sqlx(transparent))]
pub struct ProductId(i64);

impl ProductId {
    pub fn new(value: u64) -> Result<Self> {
        match i64::try_from(value) {
            Ok(v) if v > 0 => Ok(Self(v)),
            _ => Err(CoreError::InvalidId(value.to_string())),
        }
    }

    pub fn get(self) -> u64 {
        self.0 as u64
    }

    pub(crate) fn as_i64(self) -> i64 {
        self.0
    }

    pub(crate) fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl TryFrom<u64> for ProductId {
    type Error = CoreError;

    fn try_from(value: u64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ProductId> for u64 {
    fn from(id: ProductId) -> Self {
        id.get()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let value: u64 = s
            .trim()
            .parse()
            .map_err(|_| CoreError::InvalidId(s.to_string()))?;
        Self::new(value)
    }
}

/// 已持久化的产品记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// 金额，没有币种、符号或精度约束
    pub price: f64,
}

impl Product {
    /// 将更新集合合并到记录中
    pub fn apply(&mut self, changes: ProductChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
    }
}

/// 新建产品请求
///
/// `id` 为空时由存储层分配。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,

    #[validate(length(min = 1, max = 100, message = "名称长度必须在 1 到 100 个字符之间"))]
    pub name: String,

    pub price: f64,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
        }
    }

    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn ensure_valid(&self) -> Result<()> {
        self.validate()?;
        Ok(())
    }
}

/// 更新产品请求，只包含需要修改的字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProductChanges {
    #[validate(length(min = 1, max = 100, message = "名称长度必须在 1 到 100 个字符之间"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl ProductChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none()
    }

    pub fn ensure_valid(&self) -> Result<()> {
        if self.is_empty() {
            return Err(CoreError::Validation("没有需要更新的字段".to_string()));
        }
        self.validate()?;
        Ok(())
    }
}
