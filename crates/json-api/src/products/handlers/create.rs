//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use product_app::domain::products::data::NewProduct;

use crate::{
    errors::ApiError,
    extensions::*,
    products::{errors::into_api_error, get::ProductResponse},
    state::State,
};

const INVALID_REQUEST: &str = "Request is Invalid";

/// Create Product Request
///
/// Missing fields take their zero value. An `id` must be an integer if
/// present but is otherwise ignored; the store assigns one.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub price: f64,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            name: request.name,
            price: request.price,
        }
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let payload = req.payload().await.map_err(|source| {
        debug!("failed to read create product body: {source}");

        ApiError::BadRequest(INVALID_REQUEST)
    })?;

    let request: CreateProductRequest = serde_json::from_slice(payload).map_err(|source| {
        debug!("rejected create product body: {source}");

        ApiError::BadRequest(INVALID_REQUEST)
    })?;

    if let Some(id) = request.id {
        debug!(id, "ignoring client supplied product id");
    }

    let product = state
        .app
        .products
        .create_product(request.into())
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/product/{}", product.id), true)
        .map_err(|source| {
            error!("failed to set location header: {source}");

            ApiError::internal()
        })?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use product_app::domain::products::{
        MockProductsService, ProductsServiceError,
        records::{ProductId, ProductRecord},
    };

    use crate::{
        errors::ErrorResponse,
        test_helpers::{make_product, products_service, strict_products_mock},
    };

    use super::*;

    fn make_service(repo: MockProductsService) -> Service {
        products_service(
            strict_products_mock(repo),
            Router::with_path("product/Create").post(handler),
        )
    }

    fn pen() -> NewProduct {
        NewProduct {
            name: "Pen".to_string(),
            price: 1.5,
        }
    }

    #[tokio::test]
    async fn test_create_product_returns_201_with_generated_id() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product()
            .once()
            .withf(|new| *new == pen())
            .return_once(|new| {
                Ok(ProductRecord {
                    id: ProductId::from_i64(7),
                    name: new.name,
                    price: new.price,
                })
            });

        let mut res = TestClient::post("http://example.com/product/Create")
            .json(&json!({ "name": "Pen", "price": 1.5 }))
            .send(&make_service(repo))
            .await;

        let location = res
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location.as_deref(), Some("/product/7"));
        assert_eq!(body.id, 7);
        assert_eq!(body.name, "Pen");
        assert!((body.price - 1.5).abs() < f64::EPSILON);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_ignores_client_id() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product()
            .once()
            .withf(|new| *new == pen())
            .return_once(|_| Ok(make_product(3)));

        let mut res = TestClient::post("http://example.com/product/Create")
            .json(&json!({ "id": 999, "name": "Pen", "price": 1.5 }))
            .send(&make_service(repo))
            .await;

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.id, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_malformed_json_returns_400() -> TestResult {
        let mut res = TestClient::post("http://example.com/product/Create")
            .raw_json("{not json")
            .send(&make_service(MockProductsService::new()))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "Request is Invalid");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_missing_fields_default_to_zero_values() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product()
            .once()
            .withf(|new| new.name.is_empty() && new.price.abs() < f64::EPSILON)
            .return_once(|new| {
                Ok(ProductRecord {
                    id: ProductId::from_i64(8),
                    name: new.name,
                    price: new.price,
                })
            });

        let mut res = TestClient::post("http://example.com/product/Create")
            .json(&json!({}))
            .send(&make_service(repo))
            .await;

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.id, 8);
        assert_eq!(body.name, "");
        assert!(body.price.abs() < f64::EPSILON);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_missing_price_is_zero() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product()
            .once()
            .withf(|new| new.name == "Pen" && new.price.abs() < f64::EPSILON)
            .return_once(|_| Ok(make_product(4)));

        let res = TestClient::post("http://example.com/product/Create")
            .json(&json!({ "name": "Pen" }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_non_integer_id_returns_400() -> TestResult {
        let mut res = TestClient::post("http://example.com/product/Create")
            .json(&json!({ "id": "abc", "name": "Pen", "price": 1.5 }))
            .send(&make_service(MockProductsService::new()))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "Request is Invalid");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_wrongly_typed_price_returns_400() -> TestResult {
        let mut res = TestClient::post("http://example.com/product/Create")
            .json(&json!({ "name": "Pen", "price": "cheap" }))
            .send(&make_service(MockProductsService::new()))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "Request is Invalid");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_store_failure_returns_500() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let mut res = TestClient::post("http://example.com/product/Create")
            .json(&json!({ "name": "Pen", "price": 1.5 }))
            .send(&make_service(repo))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(body.error, sqlx::Error::PoolTimedOut.to_string());

        Ok(())
    }
}
