//! Core module - Shared data structures and utilities
//!
//! This module provides:
//! - Result model and error taxonomy
//! - Rendering of reports for different output formats
//! - Path utilities
//! - UTF-8 file reading and backup-then-write

pub mod file_reader;
pub mod model;
pub mod paths;
pub mod render;
