//! Axum-based HTTP server: routes and request handlers.

pub mod handlers;
pub mod routes;

pub use handlers::{
    create_serving_url_handler, delete_serving_url_handler, method_not_found_handler,
    warmup_handler, AppState, ServingUrlQueryParams,
};
pub use routes::{create_router, RouterConfig};
