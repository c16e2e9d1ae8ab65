//! Adapter implementations of the task ports.
//!
//! - [`memory`]: process-local storage for tests and throwaway servers
//! - [`sqlite`]: durable storage through Diesel and `SQLite`

pub mod memory;
pub mod sqlite;
