//! Utility modules for the documentation pipeline.

pub mod exec;
pub mod fileset;
pub mod log;
