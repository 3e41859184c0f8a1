//! App Router

use salvo::Router;

use crate::{products, shutdown};

/// Product routes plus the shutdown trigger.
///
/// Literal segments are registered before `{id}` so `/product/Create` never
/// reaches the get handler as an id.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("products").get(products::index::handler))
        .push(
            Router::with_path("product")
                .push(Router::with_path("Create").post(products::create::handler))
                .push(Router::with_path("Update/{id}").put(products::update::handler))
                .push(Router::with_path("Delete/{id}").delete(products::delete::handler))
                .push(Router::with_path("{id}").get(products::get::handler)),
        )
        .push(
            Router::with_path("shutdown")
                .get(shutdown::handler)
                .post(shutdown::handler),
        )
}
