//! # Waypoint
//!
//! A hierarchical navigation-state coordinator: an engine that keeps an
//! application's navigation stack, the identifier-to-depth index over it,
//! and optional modal presentation slots consistent across a tree of
//! coordinator nodes, where a child node can delegate its whole stack to
//! an ancestor.
//!
//! The rendering layer stays outside: it reads the observable state and
//! calls the operations in response to user input. Nothing in here renders,
//! animates, or persists anything.

pub mod core;
pub mod shared;

#[cfg(test)]
pub mod test_support;

pub use crate::core::channels::Channels;
pub use crate::core::config::{
    ConfigError, ResolvedConfig, WaypointConfig, load_config, resolve,
};
pub use crate::core::coordinator::{CoordinatorTree, NodeId};
pub use crate::core::index::PathIndex;
pub use crate::core::stack::{NavigationStack, StackError};
pub use crate::core::target::{FlowTarget, NoTarget};
pub use crate::shared::SharedCoordinator;
