pub mod api;
pub mod config;
pub mod middleware;

pub use api::{create_router, ApiState};
pub use config::Config;
