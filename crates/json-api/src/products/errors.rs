//! Product Errors

use tracing::error;

use product_app::domain::products::ProductsServiceError;

use crate::errors::ApiError;

pub(crate) const PRODUCT_NOT_FOUND: &str = "No product";

pub(crate) fn into_api_error(error: ProductsServiceError) -> ApiError {
    match error {
        ProductsServiceError::NotFound => ApiError::NotFound(PRODUCT_NOT_FOUND),
        ProductsServiceError::Sql(source) => {
            error!("product store failure: {source}");

            ApiError::Internal(source.to_string())
        }
    }
}
