//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, header inspection)
//!     → candies.rs / admin (dispatch by method and path)
//!     → CandyStore (under its lock)
//!     → response.rs (serialize, map errors to status codes)
//!     → Send to client
//! ```

pub mod candies;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::ApiError;
pub use server::{AppState, HttpServer};
