// Repository Layer
// Provides data access abstractions for the JSON manifests

pub mod parent_manifest_repo;
pub mod project_manifest_repo;

// Re-export commonly used repositories
pub use parent_manifest_repo::ParentManifestRepository;
pub use project_manifest_repo::ProjectManifestRepository;
