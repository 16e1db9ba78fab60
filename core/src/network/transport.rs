//! Blocking DNS message exchange over UDP and TCP.

use std::io::{self, Read, Write};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpStream, UdpSocket};
use std::sync::Arc;
use std::time::Duration;

use assay_protocols::{dns::EDNS_UDP_SIZE, tcp};
use tracing::trace;

/// Dial, read and write timeout of the DNS client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Udp,
    Tcp,
}

/// Sends one DNS message to a server and returns its raw reply.
pub trait DnsTransport: Send + Sync {
    fn exchange(&self, query: &[u8], server: SocketAddr, protocol: Protocol) -> io::Result<Vec<u8>>;
}

impl<T: DnsTransport + ?Sized> DnsTransport for Arc<T> {
    fn exchange(&self, query: &[u8], server: SocketAddr, protocol: Protocol) -> io::Result<Vec<u8>> {
        (**self).exchange(query, server, protocol)
    }
}

/// Talks to real servers through the OS socket API.
#[derive(Debug, Clone, Copy)]
pub struct NetworkTransport {
    timeout: Duration,
}

impl Default for NetworkTransport {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl NetworkTransport {
    fn exchange_udp(&self, query: &[u8], server: SocketAddr) -> io::Result<Vec<u8>> {
        let socket = UdpSocket::bind(unspecified_for(server))?;
        socket.set_read_timeout(Some(self.timeout))?;
        socket.set_write_timeout(Some(self.timeout))?;
        socket.connect(server)?;
        socket.send(query)?;

        let mut buffer: Vec<u8> = vec![0u8; EDNS_UDP_SIZE as usize];
        let len: usize = socket.recv(&mut buffer)?;
        buffer.truncate(len);
        Ok(buffer)
    }

    fn exchange_tcp(&self, query: &[u8], server: SocketAddr) -> io::Result<Vec<u8>> {
        let framed: Vec<u8> =
            tcp::frame_message(query).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let mut stream = TcpStream::connect_timeout(&server, self.timeout)?;
        stream.set_read_timeout(Some(self.timeout))?;
        stream.set_write_timeout(Some(self.timeout))?;
        stream.write_all(&framed)?;

        let mut prefix = [0u8; tcp::FRAME_PREFIX_LEN];
        stream.read_exact(&mut prefix)?;
        let mut reply: Vec<u8> = vec![0u8; tcp::frame_length(prefix)];
        stream.read_exact(&mut reply)?;
        Ok(reply)
    }
}

impl DnsTransport for NetworkTransport {
    fn exchange(&self, query: &[u8], server: SocketAddr, protocol: Protocol) -> io::Result<Vec<u8>> {
        trace!(%server, ?protocol, len = query.len(), "sending dns query");
        match protocol {
            Protocol::Udp => self.exchange_udp(query, server),
            Protocol::Tcp => self.exchange_tcp(query, server),
        }
    }
}

fn unspecified_for(server: SocketAddr) -> SocketAddr {
    let ip_addr: IpAddr = match server {
        SocketAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        SocketAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
    };
    SocketAddr::new(ip_addr, 0)
}
