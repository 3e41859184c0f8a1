//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use product_app::domain::products::{
    data::ProductUpdate,
    records::{ProductId, ProductRecord},
};

use crate::{
    errors::ApiError,
    extensions::*,
    products::{errors::into_api_error, get::ProductResponse},
    state::State,
};

const BAD_PAYLOAD: &str = "Bad request payload";

/// Update Product Request
///
/// Missing fields take their zero value. An `id` must be an integer if
/// present but the path id always wins.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub price: f64,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            price: request.price,
        }
    }
}

/// Update Product Handler
///
/// Replaces the name and price of a product. Unknown ids are not reported;
/// the response echoes the request either way.
#[endpoint(tags("products"), summary = "Update Product")]
pub(crate) async fn handler(
    id: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id: ProductId = id.into_product_id("invalid product id")?;

    let payload = req.payload().await.map_err(|source| {
        debug!("failed to read update product body: {source}");

        ApiError::BadRequest(BAD_PAYLOAD)
    })?;

    let request: UpdateProductRequest = serde_json::from_slice(payload).map_err(|source| {
        debug!("rejected update product body: {source}");

        ApiError::BadRequest(BAD_PAYLOAD)
    })?;

    if let Some(body_id) = request.id {
        debug!(body_id, path_id = %id, "ignoring product id in update body");
    }

    let update = ProductUpdate::from(request);

    state
        .app
        .products
        .update_product(id, update.clone())
        .await
        .map_err(into_api_error)?;

    Ok(Json(
        ProductRecord {
            id,
            name: update.name,
            price: update.price,
        }
        .into(),
    ))
}
