use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;
use weatherwear_core::domain::product::Product;
use weatherwear_core::domain::weather::WeatherSummary;
use weatherwear_core::errors::{ApplicationError, DomainError, InterfaceError};
use weatherwear_core::recommendation::decode_weather_query;

use crate::recommendation::{Recommendation, RecommendationService};

#[derive(Clone)]
pub struct ProductsState {
    service: RecommendationService,
}

pub fn router(service: RecommendationService) -> Router {
    Router::new()
        .route("/api/products", post(recommend_products))
        .with_state(ProductsState { service })
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self { id: product.id.0, name: product.name, price: product.price }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecommendationResponse {
    pub products: Vec<ProductView>,
    pub weather: WeatherSummary,
}

impl From<Recommendation> for RecommendationResponse {
    fn from(recommendation: Recommendation) -> Self {
        Self {
            products: recommendation.products.into_iter().map(ProductView::from).collect(),
            weather: recommendation.weather,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
}

/// Failure response rendered as `{ "message": ... }` with the mapped status.
#[derive(Debug)]
pub struct ApiError(InterfaceError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorBody { message: self.0.message() })).into_response()
    }
}

/// `POST /api/products`: suggests garments for the forecast at `weather.city`.
///
/// The body is read raw so that unparseable JSON gets the same `{message}` shape as
/// every other rejection.
pub async fn recommend_products(
    State(state): State<ProductsState>,
    body: Bytes,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let correlation_id = Uuid::new_v4().to_string();

    let query = decode_weather_query(&body).map_err(|error| {
        if let DomainError::MalformedInput { detail } = &error {
            debug!(
                event_name = "http.products.malformed_body",
                correlation_id = %correlation_id,
                detail = %detail,
                "request body is not valid JSON"
            );
        }
        reject(ApplicationError::from(error), &correlation_id)
    })?;

    let recommendation = state
        .service
        .recommend(&query, &correlation_id)
        .await
        .map_err(|error| reject(error, &correlation_id))?;

    Ok(Json(RecommendationResponse::from(recommendation)))
}

fn reject(error: ApplicationError, correlation_id: &str) -> ApiError {
    let interface = error.into_interface(correlation_id);
    info!(
        event_name = "http.products.rejected",
        correlation_id,
        status = interface.status_code(),
        message = interface.message(),
        "recommendation request rejected"
    );
    ApiError(interface)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use weatherwear_core::domain::product::{Product, ProductCategory, ProductId};
    use weatherwear_core::domain::weather::Temperature;
    use weatherwear_db::InMemoryProductRepository;
    use weatherwear_weather::{FixedForecastProvider, NoDataReason, TemperatureLookup};

    use super::router;
    use crate::recommendation::RecommendationService;

    fn catalog() -> Arc<InMemoryProductRepository> {
        let product = |id: i64, name: &str, cents: i64, category| Product {
            id: ProductId(id),
            name: name.to_string(),
            price: Decimal::new(cents, 2),
            category,
        };
        Arc::new(InMemoryProductRepository::with_products([
            product(1, "Pull Gris", 4290, ProductCategory::Cold),
            product(2, "Sweat Bleu", 2990, ProductCategory::Mild),
            product(3, "T-Shirt Rouge", 1550, ProductCategory::Hot),
            product(4, "T-Shirt Vert", 1200, ProductCategory::Hot),
        ]))
    }

    fn app(lookup: TemperatureLookup) -> (Router, Arc<FixedForecastProvider>) {
        let forecasts = Arc::new(FixedForecastProvider::new(lookup));
        let service = RecommendationService::new(catalog(), forecasts.clone());
        (router(service), forecasts)
    }

    fn reading(celsius: f64) -> TemperatureLookup {
        TemperatureLookup::Reading(Temperature::celsius(celsius))
    }

    async fn post(app: Router, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/products")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build");

        let response = app.oneshot(request).await.expect("router should respond");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
        let value = serde_json::from_slice(&bytes).expect("response body should be JSON");
        (status, value)
    }

    #[tokio::test]
    async fn hot_tomorrow_returns_t_shirts() {
        let (app, forecasts) = app(reading(25.0));

        let (status, body) =
            post(app, r#"{"weather":{"city":"Marseille"},"date":"tomorrow"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["weather"], json!({"city": "Marseille", "is": "hot", "date": "tomorrow"}));
        assert_eq!(
            body["products"],
            json!([
                {"id": 3, "name": "T-Shirt Rouge", "price": 15.5},
                {"id": 4, "name": "T-Shirt Vert", "price": 12.0}
            ])
        );
        let calls = forecasts.calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1.get(), 2);
    }

    #[tokio::test]
    async fn omitted_date_defaults_to_today() {
        let (app, forecasts) = app(reading(25.0));

        let (status, body) = post(app, r#"{"weather":{"city":"Marseille"}}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["weather"]["date"], json!("today"));
        assert_eq!(forecasts.calls().await[0].1.get(), 1);
    }

    #[tokio::test]
    async fn mild_temperature_is_reported_as_warm() {
        let (app, _) = app(reading(15.0));

        let (status, body) = post(app, r#"{"weather":{"city":"Lyon"},"date":7}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["weather"], json!({"city": "Lyon", "is": "warm", "date": 7}));
        assert_eq!(body["products"], json!([{"id": 2, "name": "Sweat Bleu", "price": 29.9}]));
    }

    #[tokio::test]
    async fn missing_or_blank_city_is_bad_request() {
        for body in [r#"{"weather":{}}"#, r#"{"weather":{"city":"  "}}"#, r#"{"date":"today"}"#] {
            let (app, forecasts) = app(reading(25.0));

            let (status, payload) = post(app, body).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(payload, json!({"message": "City is required."}));
            assert!(forecasts.calls().await.is_empty());
        }
    }

    #[tokio::test]
    async fn out_of_range_date_is_bad_request() {
        let (app, forecasts) = app(reading(25.0));

        let (status, payload) = post(app, r#"{"weather":{"city":"Marseille"},"date":20}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = payload["message"].as_str().expect("message");
        assert!(message.contains("between 1 and 14"), "{message}");
        assert!(forecasts.calls().await.is_empty());
    }

    #[tokio::test]
    async fn invalid_json_is_bad_request() {
        let (app, _) = app(reading(25.0));

        let (status, payload) = post(app, "{\"weather\":").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload, json!({"message": "Invalid JSON payload."}));
    }

    #[tokio::test]
    async fn upstream_without_data_is_internal_error() {
        for reason in [NoDataReason::Transport, NoDataReason::MalformedPayload] {
            let (app, _) = app(TemperatureLookup::NoData(reason));

            let (status, payload) = post(app, r#"{"weather":{"city":"Marseille"}}"#).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(payload, json!({"message": "Failed to retrieve temperature data."}));
        }
    }

    #[tokio::test]
    async fn repeated_requests_are_identical() {
        let (app, _) = app(reading(8.0));
        let body = r#"{"weather":{"city":"Brest"},"date":"2"}"#;

        let first = post(app.clone(), body).await;
        let second = post(app, body).await;

        assert_eq!(first.0, StatusCode::OK);
        assert_eq!(first, second);
        assert_eq!(first.1["weather"]["is"], json!("cold"));
    }
}
