//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use product_app::{
    context::AppContext,
    domain::products::{MockProductsService, records::{ProductId, ProductRecord}},
};

use crate::{shutdown::ShutdownTrigger, state::State};

/// Fail the test on any call beyond those already expected.
///
/// Mockall matches expectations in the order they were added, so apply this
/// after setting up the calls a test relies on.
pub(crate) fn strict_products_mock(mut products: MockProductsService) -> MockProductsService {
    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

pub(crate) fn state_with_products(
    products: MockProductsService,
    shutdown: ShutdownTrigger,
) -> Arc<State> {
    State::from_app_context(AppContext::new(Arc::new(products)), shutdown)
}

pub(crate) fn products_service_with_trigger(
    products: MockProductsService,
    shutdown: ShutdownTrigger,
    route: Router,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_products(products, shutdown)))
            .push(route),
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    products_service_with_trigger(products, ShutdownTrigger::new(), route)
}

pub(crate) fn make_product(id: i64) -> ProductRecord {
    ProductRecord {
        id: ProductId::from_i64(id),
        name: format!("Product {id}"),
        price: 9.99,
    }
}
