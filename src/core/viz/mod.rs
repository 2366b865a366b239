//! Visualization mounting: take the markup extracted from an answer and draw
//! it into a message's mount point under a collision-free element id.
//!
//! The charting library and the mount points are injected (`ChartingRuntime`,
//! `MountPoint`); the only suspensions are the settle delay and the runtime
//! readiness poll, both cancellable.

mod dom;
mod literal;
mod markup;
mod mounter;
mod registry;
mod runtime;
mod static_page;
mod wait;

pub use dom::MountSlot;
pub use literal::{Json5Evaluator, LiteralEvaluator, StrictJsonEvaluator};
pub use mounter::{MountOutcome, MountSettings, Mounter};
pub use registry::VisualizationMounts;
pub use static_page::StaticPageRuntime;
