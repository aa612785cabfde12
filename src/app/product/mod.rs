//! 产品模块

pub mod model;
pub mod repository;
pub mod schema;
pub mod service;

pub use model::{NewProduct, Product, ProductChanges, ProductId, NAME_MAX_LEN};
pub use repository::ProductRepository;
pub use service::ProductService;
