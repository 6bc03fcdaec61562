//! # Product Repository
//!
//! Database operations for catalog products.
//!
//! Rows keep a `position` column so the catalog comes back in the order the
//! products were first inserted, matching the storefront's listing order.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use huerto_core::catalog::builtin_products;
use huerto_core::{Money, Product, StaticCatalog};

const UPSERT_SQL: &str = r#"
    INSERT INTO products (
        id, name, description, price, stock,
        category, image_url, origin, unit,
        position, created_at, updated_at
    ) VALUES (
        ?1, ?2, ?3, ?4, ?5,
        ?6, ?7, ?8, ?9,
        (SELECT COALESCE(MAX(position), 0) + 1 FROM products), ?10, ?10
    )
    ON CONFLICT(id) DO UPDATE SET
        name = excluded.name,
        description = excluded.description,
        price = excluded.price,
        stock = excluded.stock,
        category = excluded.category,
        image_url = excluded.image_url,
        origin = excluded.origin,
        unit = excluded.unit,
        updated_at = excluded.updated_at
"#;

const SELECT_COLUMNS: &str =
    "SELECT id, name, description, price, stock, category, image_url, origin, unit FROM products";

/// Raw `products` row.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: String,
    name: String,
    description: String,
    price: i64,
    stock: i64,
    category: String,
    image_url: String,
    origin: String,
    unit: String,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        if row.price < 0 {
            return Err(DbError::corrupt(
                "product",
                format!("{} has negative price {}", row.id, row.price),
            ));
        }
        let stock = u32::try_from(row.stock).map_err(|_| {
            DbError::corrupt("product", format!("{} has stock {}", row.id, row.stock))
        })?;

        Ok(Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: Money::from_pesos(row.price),
            stock,
            category: row.category,
            image_url: row.image_url,
            origin: row.origin,
            unit: row.unit,
        })
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// repo.upsert(&product).await?;
/// let catalog = repo.load_catalog().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product in catalog order.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let rows: Vec<ProductRow> =
            sqlx::query_as(&format!("{} ORDER BY position, id", SELECT_COLUMNS))
                .fetch_all(&self.pool)
                .await?;

        debug!(count = rows.len(), "Loaded product rows");
        rows.into_iter().map(Product::try_from).collect()
    }

    /// Gets a product by its identifier.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(&format!("{} WHERE id = ?1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    /// Inserts a product, or overwrites the stored fields of an existing id.
    ///
    /// An overwritten product keeps its original catalog position.
    pub async fn upsert(&self, product: &Product) -> DbResult<()> {
        debug!(product_id = %product.id, "Upserting product");
        upsert_with(&self.pool, product, Utc::now()).await
    }

    /// Upserts a batch of products in one transaction.
    pub async fn upsert_many(&self, products: &[Product]) -> DbResult<usize> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        for product in products {
            upsert_with(&mut *tx, product, now).await?;
        }

        tx.commit().await?;
        debug!(count = products.len(), "Upserted product batch");
        Ok(products.len())
    }

    /// Counts stored products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Loads the whole table into an immutable catalog snapshot.
    pub async fn load_catalog(&self) -> DbResult<StaticCatalog> {
        let products = self.list_all().await?;
        info!(count = products.len(), "Catalog loaded from database");
        Ok(StaticCatalog::from_products(products))
    }

    /// Writes the built-in product list into an empty table.
    ///
    /// Returns how many products were written; zero when the table already
    /// had rows.
    pub async fn seed_builtin(&self) -> DbResult<usize> {
        let existing = self.count().await?;
        if existing > 0 {
            debug!(existing, "Products table already populated, skipping seed");
            return Ok(0);
        }

        let written = self.upsert_many(&builtin_products()).await?;
        info!(count = written, "Seeded built-in catalog");
        Ok(written)
    }
}

async fn upsert_with<'e, E>(executor: E, product: &Product, now: DateTime<Utc>) -> DbResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(UPSERT_SQL)
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.pesos())
        .bind(i64::from(product.stock))
        .bind(&product.category)
        .bind(&product.image_url)
        .bind(&product.origin)
        .bind(&product.unit)
        .bind(now)
        .execute(executor)
        .await?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use huerto_core::catalog::builtin_products;
    use huerto_core::{Catalog, Money};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_upsert_and_get() {
        let db = db().await;
        let repo = db.products();
        let apples = builtin_products().remove(0);

        repo.upsert(&apples).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);

        let stored = repo.get_by_id("FR001").await.unwrap().unwrap();
        assert_eq!(stored, apples);
        assert!(repo.get_by_id("XX999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_overwrites_and_keeps_position() {
        let db = db().await;
        let repo = db.products();
        let products = builtin_products();
        repo.upsert_many(&products[..3]).await.unwrap();

        let mut apples = products[0].clone();
        apples.price = Money::from_pesos(1300);
        repo.upsert(&apples).await.unwrap();

        let listed = repo.list_all().await.unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].id, "FR001");
        assert_eq!(listed[0].price.pesos(), 1300);
    }

    #[tokio::test]
    async fn test_seed_builtin_once() {
        let db = db().await;
        let repo = db.products();

        assert_eq!(repo.seed_builtin().await.unwrap(), 9);
        assert_eq!(repo.seed_builtin().await.unwrap(), 0);
        assert_eq!(repo.count().await.unwrap(), 9);
    }

    #[tokio::test]
    async fn test_load_catalog_preserves_order() {
        let db = db().await;
        let repo = db.products();
        repo.seed_builtin().await.unwrap();

        let catalog = repo.load_catalog().await.unwrap();
        let ids: Vec<String> = catalog.list_all().into_iter().map(|p| p.id).collect();
        let expected: Vec<String> = builtin_products().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, expected);
        assert_eq!(catalog.find_by_id("PL001").unwrap().unit, "L");
    }

    #[tokio::test]
    async fn test_check_constraint_is_query_failure() {
        let db = db().await;
        let repo = db.products();
        let mut apples = builtin_products().remove(0);
        apples.price = Money::from_pesos(-1);

        let err = repo.upsert(&apples).await.unwrap_err();
        match err {
            DbError::QueryFailed(msg) => assert!(msg.contains("CHECK constraint failed")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_row_is_reported() {
        let db = db().await;
        sqlx::query(
            "INSERT INTO products (id, name, price, stock, category, created_at, updated_at) \
             VALUES ('BAD1', 'Bad', 100, 0, 'frutas', 'x', 'x')",
        )
        .execute(db.pool())
        .await
        .unwrap();
        sqlx::query("UPDATE products SET stock = 5000000000 WHERE id = 'BAD1'")
            .execute(db.pool())
            .await
            .unwrap();

        let err = db.products().get_by_id("BAD1").await.unwrap_err();
        assert!(matches!(err, DbError::CorruptRow { .. }));
    }
}
