// Data models module
// Structs that map 1:1 onto the JSON manifests

pub mod asset;
pub mod dcc;
pub mod operation;
pub mod project;

// Re-export all models for convenience
pub use asset::*;
pub use dcc::*;
pub use operation::*;
pub use project::*;
