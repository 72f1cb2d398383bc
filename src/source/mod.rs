// Module declarations
pub mod loader;
pub mod mapping;

pub use loader::SourceResolver;
pub use mapping::{MappingStore, SourceLocation};
