//! # Optimizer Module
//!
//! Separa le responsabilità in sottomoduli:
//! - `batch`: Orchestratore del batch (`run_batch`)
//! - `task`: Pipeline per singolo file (`process_one`)
//! - `path_resolver`: Calcolo centralizzato dei path derivati

pub mod batch;
pub mod path_resolver;
pub mod task;

pub use batch::BatchCompressor;
pub use path_resolver::PathResolver;
pub use task::{FileReport, FileStatus, TaskCompressor};
