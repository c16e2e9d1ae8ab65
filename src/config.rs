//! Command-line and environment configuration for the tracker server.
//!
//! Every flag can also be supplied through the environment variable named
//! in its help text. The port follows the conventional `PORT` variable.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::task::domain::CreationOrder;

/// Tie-break direction for tasks that share completion state and due date.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CreatedOrderArg {
    /// Earlier-created tasks first.
    #[default]
    OldestFirst,
    /// Later-created tasks first.
    NewestFirst,
}

impl From<CreatedOrderArg> for CreationOrder {
    fn from(arg: CreatedOrderArg) -> Self {
        match arg {
            CreatedOrderArg::OldestFirst => Self::OldestFirst,
            CreatedOrderArg::NewestFirst => Self::NewestFirst,
        }
    }
}

/// Resolved server configuration.
#[derive(clap::Parser, Debug, Clone)]
#[command(version, about = "Task tracker: JSON API and browser frontend")]
pub struct ServerConfig {
    /// TCP port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Interface address to bind.
    #[arg(long, env = "TASKS_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// `SQLite` database file, or `:memory:` for a throwaway store.
    #[arg(long, env = "TASKS_DATABASE", default_value = "data.sqlite")]
    pub database: String,

    /// Directory holding the frontend's `index.html` and assets.
    #[arg(long, env = "TASKS_STATIC_DIR", default_value = "public")]
    pub static_dir: PathBuf,

    /// Direction of the creation-time tie-break in task listings.
    #[arg(long, env = "TASKS_CREATED_ORDER", value_enum, default_value_t = CreatedOrderArg::OldestFirst)]
    pub created_order: CreatedOrderArg,

    /// Log level filter (trace, debug, info, warn, error); `RUST_LOG` wins
    /// when set.
    #[arg(long, env = "TASKS_LOG", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    /// Returns the socket address to bind.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns the configured listing tie-break.
    #[must_use]
    pub fn creation_order(&self) -> CreationOrder {
        self.created_order.into()
    }
}
