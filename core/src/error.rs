use std::io;
use std::net::SocketAddr;

use assay_protocols::dns::ProtocolError;
use thiserror::Error;

use crate::resolver::config::ConfigError;

/// Failure of a domain authority check.
///
/// "Not a zone apex" is not an error: it is a successful query returning `false`.
#[derive(Debug, Error)]
pub enum DnsError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("dns exchange with {server} failed")]
    Transport {
        server: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("failed to get a valid answer")]
    NoAnswer,
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl DnsError {
    pub(crate) fn transport(server: SocketAddr, source: io::Error) -> Self {
        DnsError::Transport { server, source }
    }
}

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("cannot guess if the asset is a domain")]
    Domain(#[from] DnsError),
}
