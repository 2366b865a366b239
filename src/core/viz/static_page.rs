//! A charting runtime for generated pages: draw calls are recorded as script
//! text and replayed in the browser once the page loads.

use std::sync::Mutex;

use serde_json::Value;

use super::runtime::{ChartError, ChartingRuntime};

/// Draw entry point the recorded calls target.
pub const CHART_ENTRY_POINT: &str = "Plotly.newPlot";

/// Always ready; records calls instead of drawing.
#[derive(Debug, Default)]
pub struct StaticPageRuntime {
    calls: Mutex<Vec<String>>,
}

impl StaticPageRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded calls, in mount order.
    pub fn recorded(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// All recorded calls as one script body. `</` is escaped so no call can
    /// close the surrounding `<script>` element.
    pub fn script(&self) -> String {
        self.recorded()
            .iter()
            .map(|call| format!("try {{\n{}\n}} catch (e) {{ console.error(e); }}\n", call))
            .collect::<String>()
            .replace("</", "<\\/")
    }

    fn record(&self, call: String) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

impl ChartingRuntime for StaticPageRuntime {
    fn is_ready(&self) -> bool {
        true
    }

    fn render(&self, element_id: &str, data: &Value, layout: &Value) -> Result<(), ChartError> {
        let id = serde_json::to_string(element_id).map_err(|e| ChartError::Render(e.to_string()))?;
        self.record(format!("{}({}, {}, {});", CHART_ENTRY_POINT, id, data, layout));
        Ok(())
    }

    fn run_script(&self, script: &str) -> Result<(), ChartError> {
        self.record(script.trim().to_string());
        Ok(())
    }
}
