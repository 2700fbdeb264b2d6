pub mod error;
pub mod service;
pub mod state;

// Re-export commonly used types
pub use error::BoardError;
pub use service::JobBoard;
