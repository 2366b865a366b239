//! The charting runtime seam: readiness plus the draw call.

use serde_json::Value;

/// Errors reported by a charting runtime.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("chart rendering failed: {0}")]
    Render(String),
}

/// Externally supplied charting library. Implementations own the real drawing;
/// the mounter only decides what to draw and where.
pub trait ChartingRuntime: Send + Sync {
    /// Whether the library has finished loading.
    fn is_ready(&self) -> bool;

    /// Draw `data`/`layout` into the element with id `element_id`.
    fn render(&self, element_id: &str, data: &Value, layout: &Value) -> Result<(), ChartError>;

    /// Run a chart script verbatim. Used when the script's data and layout
    /// cannot be extracted.
    fn run_script(&self, script: &str) -> Result<(), ChartError>;
}
