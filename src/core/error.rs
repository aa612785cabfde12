//! 核心错误处理模块

use crate::app::product::model::ProductId;
use crate::config::ConfigError;

/// 核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// 名称为空、超长、空的更新集合，或存储层约束拒绝
    #[error("验证失败: {0}")]
    Validation(String),
    #[error("产品不存在: {0}")]
    NotFound(ProductId),
    #[error("产品 ID 已存在: {0}")]
    DuplicateId(ProductId),
    #[error("无效的产品 ID: {0}")]
    InvalidId(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[cfg(feature = "database")]
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
}

impl CoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} 字段无效", field))
                })
            })
            .collect();
        messages.sort();

        CoreError::Validation(messages.join(", "))
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
