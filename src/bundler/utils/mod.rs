//! Helpers shared by the pipeline stages.
//!
//! - [`fs`] - scratch directory management
//! - [`process`] - external tool execution capability
//! - [`archive`] - zip archive creation and in-place updates

pub mod archive;
pub mod fs;
pub mod process;
