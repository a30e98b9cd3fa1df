pub mod collector;
pub mod export;
pub mod percentiles;
pub mod registry;

pub use collector::{LatencySnapshot, LatencyTracker};
pub use registry::MetricsRegistry;
