//! # Coordinator Core
//!
//! The navigation state machine and its parts. This module knows nothing
//! about any UI technology: a rendering layer reads the observable state
//! (stack, sheet, cover) and calls the operations in response to user
//! input, nothing more.
//!
//! ```text
//!                  ┌───────────────────────────────┐
//!                  │            CORE               │
//!                  │  (this module)                │
//!                  │                               │
//!                  │  • CoordinatorTree (machine)  │
//!                  │  • NavigationStack (order)    │
//!                  │  • PathIndex (positions)      │
//!                  │  • Channels (capabilities)    │
//!                  │                               │
//!                  │  No I/O. No UI. Synchronous.  │
//!                  └───────────────┬───────────────┘
//!                                  │
//!                    observable state / operations
//!                                  │
//!                                  ▼
//!                      any rendering layer at all
//! ```
//!
//! ## Modules
//!
//! - [`target`]: what a navigation destination is (the `FlowTarget` trait)
//! - [`stack`]: the ordered navigation stack
//! - [`index`]: path-id to depth bookkeeping
//! - [`channels`]: per-node capability flags
//! - [`coordinator`]: the tree and the state machine itself
//! - [`config`]: optional runtime tuning

pub mod channels;
pub mod config;
pub mod coordinator;
pub mod index;
pub mod stack;
pub mod target;
