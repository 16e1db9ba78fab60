//! # SOA Probe
//!
//! Decides whether a name is a zone apex by asking the configured
//! recursive servers for its SOA record.
//!
//! Servers are tried in configuration order over UDP with EDNS0. A truncated
//! reply is retried over TCP against the same server. The first successful
//! reply is authoritative for the decision; a server answering with a
//! non-success rcode passes the question to the next one.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use assay_common::config::{Config, DEFAULT_RESOLV_CONF};
use assay_protocols::dns::{self, ReplyHeader};
use tracing::{debug, trace};

use crate::error::DnsError;
use crate::network::transport::{DnsTransport, NetworkTransport, Protocol};
use crate::resolver::config::ResolverConfig;
use crate::resolver::{SharedConfig, system_config};

pub struct SoaProbe {
    config: SharedConfig,
    transport: Box<dyn DnsTransport>,
}

impl SoaProbe {
    pub fn new(config: ResolverConfig, transport: Box<dyn DnsTransport>) -> Self {
        Self {
            config: Ok(Arc::new(config)),
            transport,
        }
    }

    /// Probe backed by the process-wide `/etc/resolv.conf` snapshot.
    pub fn system() -> Self {
        Self {
            config: system_config(),
            transport: Box::new(NetworkTransport::default()),
        }
    }

    /// Probe using a specific configuration file. Read errors surface on
    /// every call to [`SoaProbe::is_domain_name`].
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            config: ResolverConfig::from_file(path).map(Arc::new),
            transport: Box::new(NetworkTransport::default()),
        }
    }

    /// The process-wide probe for the default path, a private one otherwise.
    pub fn from_config(config: &Config) -> Self {
        if config.resolv_conf.as_os_str() == DEFAULT_RESOLV_CONF {
            Self::system()
        } else {
            Self::from_path(&config.resolv_conf)
        }
    }

    pub fn config(&self) -> Result<&ResolverConfig, DnsError> {
        match &self.config {
            Ok(config) => Ok(&**config),
            Err(e) => Err(DnsError::Config(e.clone())),
        }
    }

    /// True if some server returns a SOA record owned by exactly `target`.
    ///
    /// `Ok(false)` covers NXDOMAIN, empty answers and SOA records of a parent
    /// zone. When every server fails with an rcode, the last reply decides.
    pub fn is_domain_name(&self, target: &str) -> Result<bool, DnsError> {
        let config: &ResolverConfig = self.config()?;
        let fqdn: String = format!("{target}.");
        let id: u16 = rand::random();
        let query: Vec<u8> = dns::create_soa_packet(&fqdn, id)?;

        let mut last_reply: Option<Vec<u8>> = None;
        for server in config.socket_addrs() {
            let (header, reply) = self.query_server(&query, id, server)?;
            let success: bool = header.is_success();
            last_reply = Some(reply);
            if success {
                break;
            }
            debug!(%server, rcode = ?header.rcode, "server did not answer, trying next");
        }

        let Some(reply) = last_reply else {
            return Err(DnsError::NoAnswer);
        };

        let is_apex: bool = dns::has_soa_record(&reply, &fqdn)?;
        trace!(target, is_apex, "SOA probe finished");
        Ok(is_apex)
    }

    /// One UDP exchange, upgraded to TCP on this server only when truncated.
    fn query_server(
        &self,
        query: &[u8],
        id: u16,
        server: SocketAddr,
    ) -> Result<(ReplyHeader, Vec<u8>), DnsError> {
        let (header, reply) = self.exchange(query, id, server, Protocol::Udp)?;
        if !header.truncated {
            return Ok((header, reply));
        }

        debug!(%server, "truncated reply, retrying over TCP");
        self.exchange(query, id, server, Protocol::Tcp)
    }

    fn exchange(
        &self,
        query: &[u8],
        id: u16,
        server: SocketAddr,
        protocol: Protocol,
    ) -> Result<(ReplyHeader, Vec<u8>), DnsError> {
        let reply: Vec<u8> = self
            .transport
            .exchange(query, server, protocol)
            .map_err(|e| DnsError::transport(server, e))?;

        let header: ReplyHeader = dns::read_header(&reply)?;
        if header.id != id {
            return Err(DnsError::transport(
                server,
                std::io::Error::new(std::io::ErrorKind::InvalidData, "reply id does not match query"),
            ));
        }
        Ok((header, reply))
    }
}
