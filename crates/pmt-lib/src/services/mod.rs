// Services module
// Project Model façade, DCC bridges and host OS integration

pub mod dcc_bridge;
pub mod project_model;
pub mod shell;

pub use dcc_bridge::{ProcessOutput, ProcessRunner, SystemProcessRunner};
pub use project_model::ProjectModel;
