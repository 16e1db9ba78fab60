use std::collections::HashSet;
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};

use assay_core::detector::Detector;
use assay_core::network::lookup::HostLookup;
use assay_core::network::transport::{DnsTransport, Protocol};
use assay_core::resolver::config::ResolverConfig;
use assay_core::resolver::soa::SoaProbe;
use assay_protocols::dns::{DNS_HDR_LEN, encode_dns_name};

pub const RCODE_NOERROR: u8 = 0;
pub const RCODE_SERVFAIL: u8 = 2;
pub const RCODE_NXDOMAIN: u8 = 3;

pub const TYPE_DNAME: u16 = 39;
pub const TYPE_CAA: u16 = 257;

const TYPE_A: u16 = 1;
const TYPE_SOA: u16 = 6;
const CLASS_IN: u16 = 1;

/*************************************************************
                     Scripted DNS replies
**************************************************************/

pub enum Record {
    Soa,
    A(Ipv4Addr),
    Other(u16, Vec<u8>),
}

/// Reply to whatever question the query carries.
pub struct Reply {
    rcode: u8,
    truncated: bool,
    id_offset: u16,
    answers: Vec<(String, Record)>,
}

impl Reply {
    pub fn noerror() -> Self {
        Self::with_rcode(RCODE_NOERROR)
    }

    pub fn with_rcode(rcode: u8) -> Self {
        Self {
            rcode,
            truncated: false,
            id_offset: 0,
            answers: Vec::new(),
        }
    }

    pub fn truncated(mut self) -> Self {
        self.truncated = true;
        self
    }

    /// Answers with an ID that does not match the query.
    pub fn wrong_id(mut self) -> Self {
        self.id_offset = 1;
        self
    }

    pub fn soa(mut self, owner: &str) -> Self {
        self.answers.push((owner.to_string(), Record::Soa));
        self
    }

    pub fn a(mut self, owner: &str, ip: Ipv4Addr) -> Self {
        self.answers.push((owner.to_string(), Record::A(ip)));
        self
    }

    /// Any record type, with raw RDATA.
    pub fn record(mut self, owner: &str, rtype: u16, rdata: Vec<u8>) -> Self {
        self.answers.push((owner.to_string(), Record::Other(rtype, rdata)));
        self
    }

    pub fn build(&self, query: &[u8]) -> Vec<u8> {
        let id: u16 = u16::from_be_bytes([query[0], query[1]]).wrapping_add(self.id_offset);
        let question_end: usize = question_end(query);

        let mut reply: Vec<u8> = Vec::new();
        reply.extend_from_slice(&id.to_be_bytes());
        // QR, RD; RA and the rcode
        let mut flags_hi: u8 = 0x81;
        if self.truncated {
            flags_hi |= 0x02;
        }
        reply.push(flags_hi);
        reply.push(0x80 | (self.rcode & 0x0f));
        reply.extend_from_slice(&1u16.to_be_bytes());
        reply.extend_from_slice(&(self.answers.len() as u16).to_be_bytes());
        reply.extend_from_slice(&0u16.to_be_bytes());
        reply.extend_from_slice(&0u16.to_be_bytes());
        reply.extend_from_slice(&query[DNS_HDR_LEN..question_end]);

        for (owner, record) in &self.answers {
            let (rtype, rdata): (u16, Vec<u8>) = match record {
                Record::Soa => (TYPE_SOA, soa_rdata()),
                Record::A(ip) => (TYPE_A, ip.octets().to_vec()),
                Record::Other(rtype, rdata) => (*rtype, rdata.clone()),
            };
            reply.extend_from_slice(&encode_dns_name(owner).unwrap());
            reply.extend_from_slice(&rtype.to_be_bytes());
            reply.extend_from_slice(&CLASS_IN.to_be_bytes());
            reply.extend_from_slice(&300u32.to_be_bytes());
            reply.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
            reply.extend_from_slice(&rdata);
        }
        reply
    }
}

fn soa_rdata() -> Vec<u8> {
    let mut rdata: Vec<u8> = Vec::new();
    rdata.extend_from_slice(&encode_dns_name("ns1.example.net.").unwrap());
    rdata.extend_from_slice(&encode_dns_name("hostmaster.example.net.").unwrap());
    for value in [2024010101u32, 7200, 3600, 1209600, 300] {
        rdata.extend_from_slice(&value.to_be_bytes());
    }
    rdata
}

/// Offset just past QTYPE and QCLASS of the single question.
fn question_end(query: &[u8]) -> usize {
    let mut cursor: usize = DNS_HDR_LEN;
    while query[cursor] != 0 {
        cursor += query[cursor] as usize + 1;
    }
    cursor + 1 + 4
}

/// The question name of a query, with a trailing dot.
pub fn question_name(query: &[u8]) -> String {
    let mut labels: Vec<String> = Vec::new();
    let mut cursor: usize = DNS_HDR_LEN;
    while query[cursor] != 0 {
        let len: usize = query[cursor] as usize;
        labels.push(String::from_utf8_lossy(&query[cursor + 1..cursor + 1 + len]).into_owned());
        cursor += len + 1;
    }
    format!("{}.", labels.join("."))
}

/*************************************************************
                      Fake DNS transport
**************************************************************/

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub server: SocketAddr,
    pub protocol: Protocol,
    pub question: String,
}

type Script = dyn Fn(&[u8], SocketAddr, Protocol) -> io::Result<Vec<u8>> + Send + Sync;

pub struct FakeTransport {
    script: Box<Script>,
    calls: Mutex<Vec<Call>>,
}

impl FakeTransport {
    pub fn new<F>(script: F) -> Arc<Self>
    where
        F: Fn(&[u8], SocketAddr, Protocol) -> io::Result<Vec<u8>> + Send + Sync + 'static,
    {
        Arc::new(Self {
            script: Box::new(script),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Same reply from every server over every protocol.
    pub fn always(reply: Reply) -> Arc<Self> {
        Self::new(move |query, _, _| Ok(reply.build(query)))
    }

    /// SOA answer for each name in `apexes`, empty NOERROR otherwise.
    pub fn zones(apexes: &'static [&'static str]) -> Arc<Self> {
        Self::new(move |query, _, _| {
            let question: String = question_name(query);
            let reply = match apexes.iter().find(|apex| **apex == question) {
                Some(apex) => Reply::noerror().soa(apex),
                None => Reply::noerror(),
            };
            Ok(reply.build(query))
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl DnsTransport for FakeTransport {
    fn exchange(&self, query: &[u8], server: SocketAddr, protocol: Protocol) -> io::Result<Vec<u8>> {
        self.calls.lock().unwrap().push(Call {
            server,
            protocol,
            question: question_name(query),
        });
        (self.script)(query, server, protocol)
    }
}

/*************************************************************
                        Fake lookups
**************************************************************/

pub struct FakeLookup {
    known: HashSet<String>,
}

impl FakeLookup {
    pub fn knowing(names: &[&str]) -> Box<Self> {
        Box::new(Self {
            known: names.iter().map(|name| name.to_string()).collect(),
        })
    }
}

impl HostLookup for FakeLookup {
    fn lookup(&self, host: &str) -> io::Result<Vec<IpAddr>> {
        if self.known.contains(host) {
            Ok(vec![IpAddr::V4(Ipv4Addr::new(192, 0, 2, 80))])
        } else {
            Err(io::Error::new(io::ErrorKind::NotFound, "failed to lookup address"))
        }
    }
}

/*************************************************************
                          Builders
**************************************************************/

pub fn server(last_octet: u8) -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 0, 2, last_octet)), 53)
}

pub fn resolvers(last_octets: &[u8]) -> ResolverConfig {
    ResolverConfig::with_servers(last_octets.iter().map(|octet| server(*octet).ip()).collect())
}

pub fn probe(config: ResolverConfig, transport: &Arc<FakeTransport>) -> SoaProbe {
    SoaProbe::new(config, Box::new(transport.clone()))
}

pub fn detector(known_hosts: &[&str], transport: &Arc<FakeTransport>) -> Detector {
    Detector::new(FakeLookup::knowing(known_hosts), probe(resolvers(&[1]), transport))
}
