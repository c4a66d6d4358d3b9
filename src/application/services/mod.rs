//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, TextMeasurer)
//! but are themselves concrete structs, not traits.

mod chart;

pub use chart::{Chart, ChartService, RenderedNode};
