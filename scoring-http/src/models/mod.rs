pub mod evaluation;
pub mod model;

// Re-export all models for easier imports
pub use evaluation::*;
pub use model::*;
