pub mod chat;
pub mod error;
pub mod models;
pub mod ocr;
pub mod pipeline;
pub mod service;

pub use error::ExtractError;
pub use models::*;
pub use service::{AppState, create_app};
