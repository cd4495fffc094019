use std::net::SocketAddr;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that stop the server from starting.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: warp::Error,
    },
}
