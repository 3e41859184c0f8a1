//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use product_app::domain::products::records::ProductRecord;

use crate::{errors::ApiError, extensions::*, products::errors::into_api_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// Store-assigned product id
    pub id: i64,

    /// Display name
    pub name: String,

    /// Unit price
    pub price: f64,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            id: product.id.into_i64(),
            name: product.name,
            price: product.price,
        }
    }
}

/// Get Product Handler
///
/// Returns a single product.
#[endpoint(tags("products"), summary = "Get Product")]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = id.into_product_id("Invalid product id")?;

    let product = state
        .app
        .products
        .get_product(id)
        .await
        .map_err(into_api_error)?;

    Ok(Json(product.into()))
}
