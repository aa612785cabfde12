//! # 产品目录存储
//!
//! 产品记录 (`Product`) 及其到关系型数据库的映射：
//! - `app::product` 数据模型、表结构、存储接口与业务服务
//! - `infrastructure` PostgreSQL 与内存存储、数据库连接、日志
//! - `config` TOML 配置与环境变量覆盖
//! - `cli` `product_store` 命令解析与执行

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::product::{
    NewProduct, Product, ProductChanges, ProductId, ProductRepository, ProductService,
    NAME_MAX_LEN,
};
pub use crate::core::error::{CoreError, Result};
