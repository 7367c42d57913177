//! Personal task management.
//!
//! Tasks are created from validated form drafts, stored per user behind the
//! [`ports::TaskStore`] port, and edited through [`services`]. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
