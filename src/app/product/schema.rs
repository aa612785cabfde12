//! 产品表结构

pub const TABLE_NAME: &str = "products";

/// 建表语句，可重复执行
pub const CREATE_PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
    name VARCHAR(100) NOT NULL CHECK (name <> ''),
    price DOUBLE PRECISION NOT NULL
)
"#;

pub const DROP_PRODUCTS_TABLE: &str = "DROP TABLE IF EXISTS products";

#[cfg(feature = "database")]
pub async fn ensure_schema(pool: &sqlx::PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Creating table {} if missing", TABLE_NAME);
    sqlx::query(CREATE_PRODUCTS_TABLE).execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::product::model::NAME_MAX_LEN;

    #[test]
    fn test_schema_declares_constraints() {
        assert!(CREATE_PRODUCTS_TABLE.contains("PRIMARY KEY"));
        assert!(CREATE_PRODUCTS_TABLE.contains(&format!("VARCHAR({})", NAME_MAX_LEN)));
        assert!(CREATE_PRODUCTS_TABLE.contains("NOT NULL CHECK (name <> '')"));
        assert!(CREATE_PRODUCTS_TABLE.contains("price DOUBLE PRECISION NOT NULL"));
        assert!(!CREATE_PRODUCTS_TABLE.contains("CHECK (price"));
    }
}
