use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use weatherwear_db::SqlProductRepository;

use crate::bootstrap::Application;
use crate::recommendation::RecommendationService;
use crate::{health, products};

/// Every route served on the main listener.
pub fn build_router(app: &Application) -> Router {
    let catalog = Arc::new(SqlProductRepository::new(app.db_pool.clone()));
    let service = RecommendationService::new(catalog, app.forecasts.clone());

    products::router(service)
        .merge(health::router(app.db_pool.clone()))
        .layer(TraceLayer::new_for_http())
}
