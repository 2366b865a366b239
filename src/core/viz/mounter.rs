//! Mounting one message's visualization: wait, re-namespace, draw.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::dom::{ChartElement, MountPoint};
use super::literal::{
    LiteralError, LiteralEvaluator, find_declaration, is_reference_list, parse_literal,
};
use super::markup::{self, ChartSource};
use super::runtime::{ChartError, ChartingRuntime};
use super::wait::{self, Cancelled, Readiness};

/// Timing and sizing knobs for the mounter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountSettings {
    /// Fixed delay before the mount point is checked.
    pub mount_delay: Duration,
    pub poll_interval: Duration,
    /// How long to wait for the charting runtime before drawing anyway.
    pub runtime_timeout: Duration,
    pub default_height: String,
    pub default_width: String,
}

impl Default for MountSettings {
    fn default() -> Self {
        Self {
            mount_delay: Duration::from_millis(100),
            poll_interval: Duration::from_millis(100),
            runtime_timeout: Duration::from_secs(5),
            default_height: "450px".to_string(),
            default_width: "100%".to_string(),
        }
    }
}

/// Why a mount attempt failed. Shown inline in the mount point.
#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("chart container is not attached")]
    TargetNotReady,
    #[error("no chart element or script found in visualization")]
    NothingToRender,
    #[error("could not read chart {name}: {source}")]
    Literal {
        name: &'static str,
        #[source]
        source: LiteralError,
    },
    #[error(transparent)]
    Chart(#[from] ChartError),
}

/// How the chart ended up being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPath {
    /// `data`/`layout` were extracted and passed to the draw call.
    Structured,
    /// The rewritten script was run verbatim.
    Script,
}

/// Result of one mount call. Never an `Err`: failures are shown in the mount point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountOutcome {
    Rendered { element_id: Option<String>, path: RenderPath },
    /// Failure shown inline; carries the displayed message.
    Failed(String),
    /// Torn down before the waits resolved; the mount point was not touched.
    Cancelled,
}

/// Mounts visualization markup into per-message mount points.
#[derive(Clone)]
pub struct Mounter {
    runtime: Arc<dyn ChartingRuntime>,
    evaluator: Arc<dyn LiteralEvaluator>,
    settings: MountSettings,
}

impl Mounter {
    pub fn new(
        runtime: Arc<dyn ChartingRuntime>,
        evaluator: Arc<dyn LiteralEvaluator>,
        settings: MountSettings,
    ) -> Self {
        Self {
            runtime,
            evaluator,
            settings,
        }
    }

    /// Mount `markup` for the message at `message_index` into `target`.
    ///
    /// The target is cleared before anything is inserted, so mounting the same
    /// message again replaces its chart instead of stacking a second one.
    pub async fn mount(
        &self,
        markup: &str,
        message_index: usize,
        target: &dyn MountPoint,
        cancel: &CancellationToken,
    ) -> MountOutcome {
        match self.wait_until_mountable(target, cancel).await {
            Err(Cancelled) => {
                log::debug!("mount for message {} cancelled", message_index);
                return MountOutcome::Cancelled;
            }
            Ok(false) => {
                log::warn!("mount point for message {} never attached", message_index);
                return MountOutcome::Failed(MountError::TargetNotReady.to_string());
            }
            Ok(true) => {}
        }

        match self.draw(markup, message_index, target) {
            Ok(outcome) => outcome,
            Err(e) => {
                let message = format!("Error rendering chart: {}", e);
                log::warn!("message {}: {}", message_index, message);
                target.clear();
                target.show_error(&message);
                MountOutcome::Failed(message)
            }
        }
    }

    /// Settle delay, single attachment check, then the runtime wait.
    async fn wait_until_mountable(
        &self,
        target: &dyn MountPoint,
        cancel: &CancellationToken,
    ) -> Result<bool, Cancelled> {
        wait::delay(self.settings.mount_delay, cancel).await?;
        if !target.is_attached() {
            return Ok(false);
        }
        let readiness = wait::wait_for_runtime(
            self.runtime.as_ref(),
            self.settings.poll_interval,
            self.settings.runtime_timeout,
            cancel,
        )
        .await?;
        if readiness == Readiness::TimedOut {
            log::warn!(
                "charting runtime not ready after {:?}, drawing anyway",
                self.settings.runtime_timeout
            );
        }
        // Teardown may race the last poll.
        if cancel.is_cancelled() {
            return Err(Cancelled);
        }
        Ok(target.is_attached())
    }

    fn draw(
        &self,
        markup: &str,
        message_index: usize,
        target: &dyn MountPoint,
    ) -> Result<MountOutcome, MountError> {
        let source = markup::inspect(markup);
        let Some(original_id) = source.element_id.clone() else {
            return self.draw_without_element(&source, target);
        };

        let element_id = markup::render_id(&original_id, message_index);
        target.clear();
        target.insert_chart(ChartElement {
            id: element_id.clone(),
            height: source
                .height
                .clone()
                .unwrap_or_else(|| self.settings.default_height.clone()),
            width: source
                .width
                .clone()
                .unwrap_or_else(|| self.settings.default_width.clone()),
        });

        let Some(script) = source.script.as_deref() else {
            return Err(MountError::NothingToRender);
        };
        let script = markup::rewrite_element_id(script, &original_id, &element_id);

        let path = match self.extract_payload(&script)? {
            Some((data, layout)) => {
                log::debug!("drawing {} from extracted data/layout", element_id);
                self.runtime.render(&element_id, &data, &layout)?;
                RenderPath::Structured
            }
            None => {
                log::debug!("no data declaration for {}, running script", element_id);
                self.runtime.run_script(&script)?;
                RenderPath::Script
            }
        };
        Ok(MountOutcome::Rendered {
            element_id: Some(element_id),
            path,
        })
    }

    /// No element id to namespace: the script is the only thing left to run.
    fn draw_without_element(
        &self,
        source: &ChartSource,
        target: &dyn MountPoint,
    ) -> Result<MountOutcome, MountError> {
        let script = source.script.as_deref().ok_or(MountError::NothingToRender)?;
        log::warn!("visualization has no element id, running script as-is");
        target.clear();
        self.runtime.run_script(script)?;
        Ok(MountOutcome::Rendered {
            element_id: None,
            path: RenderPath::Script,
        })
    }

    /// `data` is required for the structured path; a missing `layout` is `{}`.
    /// A `data` array of variable names only is left to the script.
    fn extract_payload(&self, script: &str) -> Result<Option<(Value, Value)>, MountError> {
        let Some(data_literal) = find_declaration(script, "data") else {
            return Ok(None);
        };
        if is_reference_list(data_literal) {
            return Ok(None);
        }
        let data = parse_literal(data_literal, self.evaluator.as_ref())
            .map_err(|source| MountError::Literal { name: "data", source })?;
        let layout = match find_declaration(script, "layout") {
            Some(literal) => parse_literal(literal, self.evaluator.as_ref())
                .map_err(|source| MountError::Literal { name: "layout", source })?,
            None => Value::Object(Default::default()),
        };
        Ok(Some((data, layout)))
    }
}
