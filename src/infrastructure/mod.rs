//! 基础设施层：日志、数据库连接与存储实现

pub mod logger;
pub mod memory;

#[cfg(feature = "database")]
pub mod database;
#[cfg(feature = "database")]
pub mod postgres;

pub use logger::Logger;
pub use memory::InMemoryProductRepository;

#[cfg(feature = "database")]
pub use database::DatabaseManager;
#[cfg(feature = "database")]
pub use postgres::PgProductRepository;
