//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductId, ProductRecord},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self, limit: i64) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        // The listing always returns the whole table; `limit` is accepted for
        // interface compatibility only.
        debug!(limit, "listing products");

        let products = self.repository.list_products(self.db.pool()).await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError> {
        let product = self.repository.get_product(self.db.pool(), product).await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let created = self
            .repository
            .create_product(self.db.pool(), &product.name, product.price)
            .await?;

        debug!(product_id = %created.id, "created product");

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<u64, ProductsServiceError> {
        let rows_affected = self
            .repository
            .update_product(self.db.pool(), product, &update.name, update.price)
            .await?;

        if rows_affected == 0 {
            debug!(product_id = %product, "update matched no rows");
        }

        Ok(rows_affected)
    }

    async fn delete_product(&self, product: ProductId) -> Result<u64, ProductsServiceError> {
        let rows_affected = self
            .repository
            .delete_product(self.db.pool(), product)
            .await?;

        if rows_affected == 0 {
            debug!(product_id = %product, "delete matched no rows");
        }

        Ok(rows_affected)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products in storage order.
    async fn list_products(&self, limit: i64) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    ///
    /// Returns [`ProductsServiceError::NotFound`] when no row has the id.
    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError>;

    /// Inserts a product and returns it with its generated id.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces name and price of a product, returning the rows affected.
    ///
    /// An unknown id is not an error.
    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<u64, ProductsServiceError>;

    /// Deletes a product, returning the rows affected.
    ///
    /// An unknown id is not an error.
    async fn delete_product(&self, product: ProductId) -> Result<u64, ProductsServiceError>;
}
