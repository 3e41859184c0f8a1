//! Product id path parameter parsing.

use salvo::oapi::extract::PathParam;
use tracing::debug;

use product_app::domain::products::records::ProductId;

use crate::errors::ApiError;

pub(crate) trait ProductIdExt {
    /// Parse the segment as a product id, failing with a 400 carrying `message`.
    fn into_product_id(self, message: &'static str) -> Result<ProductId, ApiError>;
}

impl ProductIdExt for PathParam<String> {
    fn into_product_id(self, message: &'static str) -> Result<ProductId, ApiError> {
        let raw = self.into_inner();

        raw.parse::<ProductId>().map_err(|source| {
            debug!(raw = %raw, "rejected product id: {source}");

            ApiError::BadRequest(message)
        })
    }
}
