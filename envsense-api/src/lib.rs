pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use auth::{Authorizer, StaticApiKey};
pub use config::{Config, StoreKind};
pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
