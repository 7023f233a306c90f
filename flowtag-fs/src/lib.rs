//! Filesystem abstraction for flowtag.
//!
//! This crate provides:
//! - Filesystem trait for reading inputs and atomically writing reports
//! - RealFilesystem backed by `std::fs`
//! - MockFilesystem, an in-memory implementation for tests

pub mod filesystem;

pub use filesystem::{temp_path_for, Filesystem, FsError, MockFilesystem, RealFilesystem};
