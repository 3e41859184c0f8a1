//! List Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    errors::ApiError,
    extensions::*,
    products::{errors::into_api_error, get::ProductResponse},
    state::State,
};

/// List Products Handler
///
/// Returns every stored product. `count` is accepted but does not truncate
/// the listing.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    count: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_products(count.into_count())
        .await
        .map_err(into_api_error)?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}
