//! Live mounts keyed by transcript position.
//!
//! Each message index owns at most one pending mount. Re-mounting an index,
//! unmounting it, restarting the transcript, or dropping the registry cancels
//! the pending waits so nothing is ever drawn into a stale node.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::dom::MountPoint;
use super::mounter::{MountOutcome, Mounter};

struct MountHandle {
    cancel: CancellationToken,
    task: JoinHandle<MountOutcome>,
}

/// Visualization mounts for the currently displayed transcript.
pub struct VisualizationMounts {
    mounter: Mounter,
    active: HashMap<usize, MountHandle>,
}

impl VisualizationMounts {
    pub fn new(mounter: Mounter) -> Self {
        Self {
            mounter,
            active: HashMap::new(),
        }
    }

    /// Start mounting `markup` for `message_index`, cancelling any mount
    /// already pending for that index. Must be called inside a tokio runtime.
    pub fn mount(&mut self, message_index: usize, markup: String, target: Arc<dyn MountPoint>) {
        self.unmount(message_index);
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let mounter = self.mounter.clone();
        let task = tokio::spawn(async move {
            mounter
                .mount(&markup, message_index, target.as_ref(), &token)
                .await
        });
        self.active.insert(message_index, MountHandle { cancel, task });
    }

    /// Cancel the mount for one message. No-op when nothing is mounted.
    pub fn unmount(&mut self, message_index: usize) {
        if let Some(handle) = self.active.remove(&message_index) {
            handle.cancel.cancel();
        }
    }

    /// Cancel every mount; used when the transcript is restarted or the view remounted.
    pub fn restart(&mut self) {
        for (_, handle) in self.active.drain() {
            handle.cancel.cancel();
        }
    }

    #[cfg(test)]
    pub fn is_mounted(&self, message_index: usize) -> bool {
        self.active.contains_key(&message_index)
    }

    /// Wait for every pending mount and forget them, in index order.
    pub async fn settle_all(&mut self) -> Vec<(usize, MountOutcome)> {
        let mut pending: Vec<(usize, MountHandle)> = self.active.drain().collect();
        pending.sort_by_key(|(index, _)| *index);
        let (indices, tasks): (Vec<usize>, Vec<JoinHandle<MountOutcome>>) = pending
            .into_iter()
            .map(|(index, handle)| (index, handle.task))
            .unzip();
        indices
            .into_iter()
            .zip(join_all(tasks).await)
            .filter_map(|(index, joined)| match joined {
                Ok(outcome) => Some((index, outcome)),
                Err(e) => {
                    log::error!("mount task for message {} failed: {}", index, e);
                    None
                }
            })
            .collect()
    }
}

impl Drop for VisualizationMounts {
    fn drop(&mut self) {
        self.restart();
    }
}
