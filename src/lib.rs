//! Tasktrack: a single-user task tracker.
//!
//! A JSON API over a single `SQLite` table plus a static browser frontend.
//!
//! # Architecture
//!
//! The task store follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//!
//! # Modules
//!
//! - [`task`]: Task validation, persistence, and listing order
//! - [`http`]: REST routes, JSON payloads, and static frontend serving
//! - [`config`]: Command-line and environment configuration
//! - [`server`]: Wiring everything together behind a TCP listener

pub mod config;
pub mod http;
pub mod server;
pub mod task;
