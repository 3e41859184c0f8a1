//! Delete Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{errors::ApiError, extensions::*, products::errors::into_api_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeleteProductResponse {
    pub result: String,
}

/// Delete Product Handler
///
/// Succeeds whether or not the product existed.
#[endpoint(tags("products"), summary = "Delete Product")]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<DeleteProductResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = id.into_product_id("invalid product id")?;

    state
        .app
        .products
        .delete_product(id)
        .await
        .map_err(into_api_error)?;

    Ok(Json(DeleteProductResponse {
        result: "success".to_string(),
    }))
}
