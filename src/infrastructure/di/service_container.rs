//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::HomeworkService;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, InputReader, RealFileSystem, StdinReader};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Standard input abstraction
    pub stdin: Arc<dyn InputReader>,

    pub homework: HomeworkService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem), Arc::new(StdinReader))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        stdin: Arc<dyn InputReader>,
    ) -> Self {
        let settings = Arc::new(settings);
        let homework = HomeworkService::new(Arc::clone(&fs), &settings);

        Self {
            settings,
            fs,
            stdin,
            homework,
        }
    }
}
