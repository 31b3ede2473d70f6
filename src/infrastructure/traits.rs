//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io::{self, Read};
use std::path::Path;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Standard input abstraction, read once to the end.
pub trait InputReader: Send + Sync {
    fn read_all(&self) -> io::Result<String>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Reads the process's standard input.
#[derive(Debug, Default)]
pub struct StdinReader;

impl InputReader for StdinReader {
    fn read_all(&self) -> io::Result<String> {
        let mut content = String::new();
        io::stdin().lock().read_to_string(&mut content)?;
        Ok(content)
    }
}
