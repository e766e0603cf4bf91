mod error;
pub mod messages;
mod routes;

pub use error::ApiError;
pub use routes::{AppState, router};
