//! Recipe search proxy
//!
//! A small web backend that forwards browser searches to the Spoonacular
//! recipe API. It validates and filters query parameters, makes one timed
//! outbound call per request, and maps upstream failures onto HTTP status codes.

pub mod app_state;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

pub use app_state::AppState;
pub use routes::app;
