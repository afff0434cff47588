pub mod compliance;
pub mod error;

// Convenience re-exports to simplify imports elsewhere
pub use error::DomainError;
