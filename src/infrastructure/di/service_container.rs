//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::ChartService;
use crate::config::Settings;
use crate::infrastructure::traits::{CharWidthMeasurer, FileSystem, RealFileSystem, TextMeasurer};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Label width measurement
    pub measurer: Arc<dyn TextMeasurer>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let measurer = CharWidthMeasurer {
            char_width_em: settings.labels.char_width_em,
        };
        Self::with_deps(settings, Arc::new(RealFileSystem), Arc::new(measurer))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        measurer: Arc<dyn TextMeasurer>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            fs,
            measurer,
        }
    }

    pub fn chart_service(&self) -> ChartService {
        ChartService::new(
            Arc::clone(&self.settings),
            Arc::clone(&self.fs),
            Arc::clone(&self.measurer),
        )
    }
}
