//! # Coordinator Tree
//!
//! The navigation state machine. A tree of coordinator nodes where each
//! node either owns a navigation stack plus path index, or delegates every
//! stack mutation to its effective owner: the nearest ancestor with no
//! parent. The choice is made once at construction and fixed for the node's
//! lifetime, so an arbitrarily deep tree behaves as if it shared one stack
//! rooted at the outermost coordinator.
//!
//! ```text
//!  set_link(target)        pop_view()               pop_to_view(id)
//!        │                      │                         │
//!        ▼                      ▼                         ▼
//!  stack.push(target)    stack.truncate_by(1)      stack.truncate_by(n)
//!  index.record(id, d)   index.remove(last)        index.prune_above(d)
//!  last_active = id      last_active = None        last_active = id
//! ```
//!
//! Everything above happens on the effective owner. Presentation slots
//! (sheet, cover) are the exception: they always stay on the node they were
//! presented on.
//!
//! States are implicit in data: root-with-empty-stack, mid-navigation, and
//! the two presented slots are independent axes, not an exclusive enum.

use log::{debug, warn};

use crate::core::channels::Channels;
use crate::core::index::PathIndex;
use crate::core::stack::NavigationStack;
use crate::core::target::FlowTarget;

/// Handle to a node in a [`CoordinatorTree`].
///
/// Only meaningful to the tree that created it; handing a tree an id minted
/// by a different tree is a caller bug (and panics on resolution).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One presentation channel: at most one live value, plus a generation
/// counter so a delayed dismissal can tell whether the presentation it was
/// scheduled against is still the one on screen.
#[derive(Debug, Clone)]
struct Slot<T> {
    value: Option<T>,
    generation: u64,
}

impl<T> Slot<T> {
    fn empty() -> Self {
        Self {
            value: None,
            generation: 0,
        }
    }

    fn present(&mut self, value: T) -> u64 {
        self.generation += 1;
        self.value = Some(value);
        self.generation
    }

    fn dismiss(&mut self) {
        self.value = None;
    }

    fn dismiss_if(&mut self, generation: u64) -> bool {
        if self.generation == generation && self.value.is_some() {
            self.value = None;
            true
        } else {
            false
        }
    }
}

struct Node<S, L, C> {
    parent: Option<NodeId>,
    channels: Channels,
    stack: NavigationStack<L>,
    index: PathIndex,
    last_active: Option<String>,
    sheet: Slot<S>,
    cover: Slot<C>,
}

/// The coordinator arena. Nodes are appended, never removed, and the parent
/// reference is a plain index into the arena, so cycles cannot form.
pub struct CoordinatorTree<S, L, C> {
    nodes: Vec<Node<S, L, C>>,
}

impl<S, L, C> CoordinatorTree<S, L, C>
where
    L: FlowTarget,
{
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Adds a node with no parent. It owns its own stack.
    pub fn add_root(&mut self, channels: Channels) -> NodeId {
        self.insert(None, channels)
    }

    /// Adds a node that delegates all stack mutations to `parent`'s owner.
    /// Its own stack state stays permanently empty.
    pub fn add_child(&mut self, parent: NodeId, channels: Channels) -> NodeId {
        self.insert(Some(parent), channels)
    }

    fn insert(&mut self, parent: Option<NodeId>, channels: Channels) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            channels,
            stack: NavigationStack::new(),
            index: PathIndex::new(),
            last_active: None,
            sheet: Slot::empty(),
            cover: Slot::empty(),
        });
        debug!("{id:?} added (parent {parent:?}, channels {channels:?})");
        id
    }

    /// The nearest ancestor with no parent: the node actually holding the
    /// stack and index that `node` observes and mutates.
    pub fn owner_of(&self, node: NodeId) -> NodeId {
        let mut current = node;
        while let Some(parent) = self.nodes[current.0].parent {
            current = parent;
        }
        current
    }

    fn owner_node(&self, node: NodeId) -> &Node<S, L, C> {
        &self.nodes[self.owner_of(node).0]
    }

    // ========================================================================
    // Stack operations (owner-resolved)
    // ========================================================================

    /// The sole navigate-forward entry point: assigning a target is the push.
    ///
    /// Appends to the effective owner's stack, records the target's id at
    /// the post-push depth, and marks it as the last active link. Duplicate
    /// ids alias (last write wins); callers that want several live instances
    /// of one logical screen must mint distinct ids.
    pub fn set_link(&mut self, node: NodeId, target: L) {
        let owner = self.owner_of(node);
        let entry = &mut self.nodes[owner.0];
        let path_id = target.path_id();
        entry.stack.push(target);
        let depth = entry.stack.depth();
        entry.index.record(path_id.clone(), depth);
        entry.last_active = Some(path_id.clone());
        debug!("{owner:?} pushed {path_id:?} at depth {depth}");
    }

    /// Pushes each target in order; equivalent to repeated [`set_link`]
    /// calls.
    ///
    /// [`set_link`]: CoordinatorTree::set_link
    pub fn set_links(&mut self, node: NodeId, targets: impl IntoIterator<Item = L>) {
        for target in targets {
            self.set_link(node, target);
        }
    }

    /// Empties the owner's stack, index, and last active link. Idempotent:
    /// already-empty is a valid final state, not an error.
    pub fn pop_to_root(&mut self, node: NodeId) {
        let owner = self.owner_of(node);
        let entry = &mut self.nodes[owner.0];
        entry.stack.reset();
        entry.index.clear();
        entry.last_active = None;
        debug!("{owner:?} popped to root");
    }

    /// Single-step pop. Truncates the owner's stack by one and drops only
    /// the last active link's index entry; entries that removal skips keep
    /// their recorded depth until a later [`pop_to_view`] sweeps them out.
    /// No-op on an empty stack.
    ///
    /// [`pop_to_view`]: CoordinatorTree::pop_to_view
    pub fn pop_view(&mut self, node: NodeId) {
        let owner = self.owner_of(node);
        let entry = &mut self.nodes[owner.0];
        if entry.stack.is_empty() {
            debug!("{owner:?} pop_view on empty stack, nothing to do");
            return;
        }
        if let Err(e) = entry.stack.truncate_by(1) {
            warn!("{owner:?} pop_view refused by stack: {e}");
            return;
        }
        match entry.last_active.take() {
            Some(path_id) => {
                entry.index.remove(&path_id);
                debug!("{owner:?} popped {path_id:?} to depth {}", entry.stack.depth());
            }
            None => debug!(
                "{owner:?} popped untracked entry to depth {}",
                entry.stack.depth()
            ),
        }
    }

    /// Jumps back to a previously pushed target in one step.
    ///
    /// Truncates the owner's stack down to (and including) the entry
    /// recorded for `path_id`, prunes every index entry above it, marks
    /// `path_id` as the last active link, and returns the pruned
    /// identifiers in push order. Unknown ids are a no-op returning an
    /// empty list. An entry recorded above the live depth is stale (left
    /// behind by earlier single-step pops); it is dropped and treated as a
    /// miss.
    pub fn pop_to_view(&mut self, node: NodeId, path_id: &str) -> Vec<String> {
        let owner = self.owner_of(node);
        let entry = &mut self.nodes[owner.0];
        let Some(recorded) = entry.index.position_of(path_id) else {
            debug!("{owner:?} pop_to_view miss for {path_id:?}");
            return Vec::new();
        };
        let depth = entry.stack.depth();
        if recorded > depth {
            warn!(
                "{owner:?} dropping stale index entry {path_id:?} (recorded {recorded}, live depth {depth})"
            );
            entry.index.remove(path_id);
            return Vec::new();
        }
        if let Err(e) = entry.stack.truncate_by(depth - recorded) {
            // recorded <= depth, so the stack cannot actually refuse here;
            // leave everything untouched if it somehow does
            warn!("{owner:?} pop_to_view refused by stack: {e}");
            return Vec::new();
        }
        let pruned = entry.index.prune_above(recorded);
        entry.last_active = Some(path_id.to_string());
        debug!(
            "{owner:?} popped to {path_id:?} at depth {recorded}, pruned {} entries",
            pruned.len()
        );
        pruned
    }

    // ========================================================================
    // Presentation slots (never delegated)
    // ========================================================================

    /// Fills the node's own sheet slot and returns a generation token
    /// identifying this presentation.
    pub fn present_sheet(&mut self, node: NodeId, sheet: S) -> u64 {
        let generation = self.nodes[node.0].sheet.present(sheet);
        debug!("{node:?} presented sheet (generation {generation})");
        generation
    }

    /// Fills the node's own cover slot and returns a generation token
    /// identifying this presentation.
    pub fn present_cover(&mut self, node: NodeId, cover: C) -> u64 {
        let generation = self.nodes[node.0].cover.present(cover);
        debug!("{node:?} presented cover (generation {generation})");
        generation
    }

    /// Clears the node's sheet slot. No stack interaction.
    pub fn dismiss_sheet(&mut self, node: NodeId) {
        self.nodes[node.0].sheet.dismiss();
        debug!("{node:?} dismissed sheet");
    }

    /// Clears the node's cover slot. No stack interaction.
    pub fn dismiss_cover(&mut self, node: NodeId) {
        self.nodes[node.0].cover.dismiss();
        debug!("{node:?} dismissed cover");
    }

    /// Clears the sheet slot only if it still holds the presentation
    /// identified by `generation`; returns whether anything was dismissed.
    /// A delayed dismissal whose slot was replaced or cleared in the
    /// interim lands here as a suppressed no-op.
    pub fn dismiss_sheet_if(&mut self, node: NodeId, generation: u64) -> bool {
        let dismissed = self.nodes[node.0].sheet.dismiss_if(generation);
        if dismissed {
            debug!("{node:?} dismissed sheet (generation {generation})");
        } else {
            debug!("{node:?} suppressed stale sheet dismissal (generation {generation})");
        }
        dismissed
    }

    /// Cover counterpart of [`dismiss_sheet_if`].
    ///
    /// [`dismiss_sheet_if`]: CoordinatorTree::dismiss_sheet_if
    pub fn dismiss_cover_if(&mut self, node: NodeId, generation: u64) -> bool {
        let dismissed = self.nodes[node.0].cover.dismiss_if(generation);
        if dismissed {
            debug!("{node:?} dismissed cover (generation {generation})");
        } else {
            debug!("{node:?} suppressed stale cover dismissal (generation {generation})");
        }
        dismissed
    }

    // ========================================================================
    // Observable state
    // ========================================================================

    /// Stack depth as observed from `node` (owner-resolved).
    pub fn depth(&self, node: NodeId) -> usize {
        self.owner_node(node).stack.depth()
    }

    /// The stack entries as observed from `node`, in navigation order.
    pub fn stack(&self, node: NodeId) -> &[L] {
        self.owner_node(node).stack.entries()
    }

    /// The top-of-stack target, the one a rendering layer shows when depth
    /// is above zero.
    pub fn top(&self, node: NodeId) -> Option<&L> {
        self.owner_node(node).stack.top()
    }

    /// The path index as observed from `node` (owner-resolved), read-only.
    pub fn path_index(&self, node: NodeId) -> &PathIndex {
        &self.owner_node(node).index
    }

    /// The most recently pushed target's id, if a single-step pop has not
    /// consumed it.
    pub fn last_active(&self, node: NodeId) -> Option<&str> {
        self.owner_node(node).last_active.as_deref()
    }

    /// The node's own presented sheet, if any.
    pub fn sheet(&self, node: NodeId) -> Option<&S> {
        self.nodes[node.0].sheet.value.as_ref()
    }

    /// The node's own presented cover, if any.
    pub fn cover(&self, node: NodeId) -> Option<&C> {
        self.nodes[node.0].cover.value.as_ref()
    }

    pub fn channels(&self, node: NodeId) -> Channels {
        self.nodes[node.0].channels
    }

    /// True iff the node's link channel is active. Consulted by the
    /// container-wrapping rule, not by the state machine.
    pub fn can_work_with_link(&self, node: NodeId) -> bool {
        self.nodes[node.0].channels.link
    }

    /// Whether a rendering layer should wrap this node's content in a fresh
    /// navigation container: true when the node drives links itself and no
    /// ancestor already provides a container.
    pub fn needs_own_container(&self, node: NodeId) -> bool {
        let mut current = self.nodes[node.0].parent;
        while let Some(ancestor) = current {
            if self.nodes[ancestor.0].channels.link {
                return false;
            }
            current = self.nodes[ancestor.0].parent;
        }
        self.nodes[node.0].channels.link
    }
}

impl<S, L, C> Default for CoordinatorTree<S, L, C>
where
    L: FlowTarget,
{
    fn default() -> Self {
        Self::new()
    }
}
