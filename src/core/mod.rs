// Module declarations
pub mod binding;
pub mod error;
pub mod record;
pub mod value;

// Re-exports for convenience
pub use binding::TableBinding;
pub use error::QueryError;
pub use record::Record;
pub use value::Value;
