mod error;
pub use error::ApiError;

mod handler;
pub use handler::DashboardHandler;

mod adapter;
pub use adapter::StoreAdapter;

mod http;
pub use http::HttpApi;

pub use axum;
