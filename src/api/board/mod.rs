pub mod dto;
pub mod handlers;

// Re-export commonly used types
pub use handlers::board_config;
