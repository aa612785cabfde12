use anyhow::Context;
use product_catalog::cli::{self, Command};
use product_catalog::config::{self, Config};
use product_catalog::infrastructure::{InMemoryProductRepository, Logger};
use product_catalog::{ProductRepository, ProductService};
use std::env;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load_config().context("加载配置失败")?;
    Logger::init(&config.logging);
    match config::find_config_file() {
        Some(path) => info!("Loaded configuration from {}", path),
        None => info!("No configuration file found, using defaults"),
    }

    let invocation = cli::parse(env::args().skip(1))?;

    match invocation.command {
        Command::Usage => {
            print!("{}", cli::USAGE);
            Ok(())
        }
        Command::Migrate => migrate(&config, invocation.in_memory).await,
        Command::Store(action) => {
            let service = ProductService::new(open_store(&config, invocation.in_memory).await?);
            let output = cli::run(action, &service).await?;
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
    }
}

#[cfg(feature = "database")]
async fn open_store(
    config: &Config,
    in_memory: bool,
) -> anyhow::Result<Arc<dyn ProductRepository>> {
    use product_catalog::infrastructure::{DatabaseManager, PgProductRepository};

    if in_memory {
        return Ok(Arc::new(InMemoryProductRepository::new()));
    }
    let db = DatabaseManager::new(&config.database)
        .await
        .context("连接数据库失败")?;
    Ok(Arc::new(PgProductRepository::new(db.get_pool().clone())))
}

#[cfg(not(feature = "database"))]
async fn open_store(
    _config: &Config,
    in_memory: bool,
) -> anyhow::Result<Arc<dyn ProductRepository>> {
    if !in_memory {
        info!("Built without the database feature, using the in-memory store");
    }
    Ok(Arc::new(InMemoryProductRepository::new()))
}

#[cfg(feature = "database")]
async fn migrate(config: &Config, in_memory: bool) -> anyhow::Result<()> {
    if in_memory {
        info!("In-memory store needs no schema");
        return Ok(());
    }
    let db = product_catalog::infrastructure::DatabaseManager::new(&config.database)
        .await
        .context("连接数据库失败")?;
    db.migrate().await.context("创建表失败")?;
    info!("Schema is up to date");
    Ok(())
}

#[cfg(not(feature = "database"))]
async fn migrate(_config: &Config, _in_memory: bool) -> anyhow::Result<()> {
    anyhow::bail!("migrate 需要启用 database 特性")
}
