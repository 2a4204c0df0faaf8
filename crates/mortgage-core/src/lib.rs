pub mod amortization;
pub mod config;
pub mod error;
pub mod scenario;
pub mod types;

pub use error::MortgageError;
pub use types::*;

/// Standard result type for all mortgage-planner operations
pub type MortgageResult<T> = Result<T, MortgageError>;
