// PMT shared library
// Studio project and asset manager: manifests, directory layout and DCC hand-offs

pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;

// Re-export the surface front ends need
pub use models::*;
pub use services::ProjectModel;
pub use utils::config::PmtConfig;
pub use utils::error::{PmtError, PmtErrorCode, PmtResult};
