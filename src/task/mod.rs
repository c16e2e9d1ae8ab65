//! Task store for the tracker.
//!
//! Tasks are created with server-side defaults, validated on every write,
//! updated partially, hard-deleted, and listed in a deterministic
//! presentation order. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
