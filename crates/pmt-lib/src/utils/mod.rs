// Utility functions module

pub mod config;
pub mod error;
pub mod fs_ops;
pub mod json_store;
pub mod paths;
