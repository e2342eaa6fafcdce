//! Utility functions for paths and files

pub mod fs;
pub mod path;
