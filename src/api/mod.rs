pub mod board;
pub mod error;
pub mod health;
pub mod validation;
