//! # Shared Coordinator Handle
//!
//! The tree itself is single-threaded by design; every mutation happens
//! synchronously on the caller's thread before the call returns. When
//! operations can arrive from more than one place (the UI thread plus timed
//! dismissals), something has to serialize them, and this handle is that
//! something: one mutex around the whole tree, exposed through a closure
//! entry point.
//!
//! Timed dismissal is fire-and-forget: present, capture the generation
//! token, sleep, then attempt a generation-guarded dismiss. If the slot was
//! dismissed or replaced while the timer slept, the dismiss lands as a
//! suppressed no-op instead of tearing down an unrelated presentation.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::debug;

use crate::core::config::ResolvedConfig;
use crate::core::coordinator::{CoordinatorTree, NodeId};
use crate::core::target::FlowTarget;

#[derive(Debug, Clone, Copy)]
enum SlotKind {
    Sheet,
    Cover,
}

/// Cloneable, thread-safe handle to a [`CoordinatorTree`].
pub struct SharedCoordinator<S, L, C> {
    tree: Arc<Mutex<CoordinatorTree<S, L, C>>>,
    auto_dismiss: Duration,
}

impl<S, L, C> Clone for SharedCoordinator<S, L, C> {
    fn clone(&self) -> Self {
        Self {
            tree: Arc::clone(&self.tree),
            auto_dismiss: self.auto_dismiss,
        }
    }
}

impl<S, L, C> SharedCoordinator<S, L, C>
where
    S: Send + 'static,
    L: FlowTarget + Send + 'static,
    C: Send + 'static,
{
    pub fn new(tree: CoordinatorTree<S, L, C>) -> Self {
        Self::with_config(tree, &ResolvedConfig::default())
    }

    pub fn with_config(tree: CoordinatorTree<S, L, C>, config: &ResolvedConfig) -> Self {
        Self {
            tree: Arc::new(Mutex::new(tree)),
            auto_dismiss: config.auto_dismiss,
        }
    }

    /// Runs `f` with exclusive access to the tree. Every read and mutation
    /// goes through here; the lock is the external serialization the
    /// single-threaded core requires.
    pub fn with<R>(&self, f: impl FnOnce(&mut CoordinatorTree<S, L, C>) -> R) -> R {
        // A poisoning panic cannot leave the tree mid-mutation (operations
        // complete or refuse atomically), so the state is safe to reuse.
        let mut tree = self
            .tree
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut tree)
    }

    /// Presents a sheet that dismisses itself after the configured delay,
    /// unless the caller dismisses or replaces it first.
    ///
    /// Must be called within a tokio runtime.
    pub fn present_sheet_auto_dismiss(&self, node: NodeId, sheet: S) {
        let generation = self.with(|tree| tree.present_sheet(node, sheet));
        self.spawn_dismiss(node, generation, SlotKind::Sheet);
    }

    /// Cover counterpart of [`present_sheet_auto_dismiss`].
    ///
    /// [`present_sheet_auto_dismiss`]: SharedCoordinator::present_sheet_auto_dismiss
    pub fn present_cover_auto_dismiss(&self, node: NodeId, cover: C) {
        let generation = self.with(|tree| tree.present_cover(node, cover));
        self.spawn_dismiss(node, generation, SlotKind::Cover);
    }

    fn spawn_dismiss(&self, node: NodeId, generation: u64, kind: SlotKind) {
        let handle = self.clone();
        let delay = self.auto_dismiss;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let dismissed = handle.with(|tree| match kind {
                SlotKind::Sheet => tree.dismiss_sheet_if(node, generation),
                SlotKind::Cover => tree.dismiss_cover_if(node, generation),
            });
            if !dismissed {
                debug!("timed {kind:?} dismissal for {node:?} found the slot changed, skipped");
            }
        });
    }
}
