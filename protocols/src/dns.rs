use pnet::packet::dns::{DnsClass, DnsPacket, DnsQuery, DnsTypes, MutableDnsPacket, Opcode, Retcode};
use thiserror::Error;
use tracing::trace;

pub const DNS_HDR_LEN: usize = 12;
/// Largest UDP payload advertised through EDNS0.
pub const EDNS_UDP_SIZE: u16 = 4096;

const MAX_LABEL_LEN: usize = 63;
const MAX_NAME_LEN: usize = 255;
const TYPE_OPT: u16 = 41;
const TYPE_SOA: u16 = 6;
const POINTER_TAG: u8 = 0xc0;
// a name of at most 255 bytes can not legitimately chain more pointers
const MAX_POINTERS: usize = 126;
const CLASS_IN: DnsClass = DnsClass(1);
// root name, TYPE, CLASS (udp size), TTL (ext rcode, version, flags), RDLENGTH
const OPT_RR_LEN: usize = 1 + 2 + 2 + 4 + 2;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("empty label in domain name {0:?}")]
    EmptyLabel(String),
    #[error("label longer than {MAX_LABEL_LEN} bytes in domain name {0:?}")]
    LabelTooLong(String),
    #[error("domain name longer than {MAX_NAME_LEN} bytes: {0:?}")]
    NameTooLong(String),
    #[error("message too short for a dns header")]
    ShortHeader,
    #[error("malformed dns message: {0}")]
    Malformed(&'static str),
    #[error("message of {0} bytes does not fit a tcp frame")]
    FrameTooLong(usize),
}

/// Header fields of a reply that drive the query loop.
#[derive(Debug, Clone, Copy)]
pub struct ReplyHeader {
    pub id: u16,
    pub truncated: bool,
    pub rcode: Retcode,
}

impl ReplyHeader {
    pub fn is_success(&self) -> bool {
        matches!(self.rcode, Retcode::NoError)
    }
}

/// Builds a recursive SOA question for `fqdn` carrying an EDNS0 OPT record.
///
/// `fqdn` must end with the root label separator (`"example.com."`).
pub fn create_soa_packet(fqdn: &str, id: u16) -> Result<Vec<u8>, ProtocolError> {
    let query: DnsQuery = create_soa_query(fqdn)?;
    let q_fixed_len: usize = 4;
    let qlen: usize = query.qname.len() + q_fixed_len;
    let total: usize = DNS_HDR_LEN + qlen + OPT_RR_LEN;
    let mut buffer: Vec<u8> = vec![0u8; total];

    {
        let mut dns: MutableDnsPacket =
            MutableDnsPacket::new(&mut buffer).ok_or(ProtocolError::ShortHeader)?;
        dns.set_id(id);
        dns.set_is_response(0);
        dns.set_opcode(Opcode::StandardQuery);
        dns.set_is_authoriative(0);
        dns.set_is_truncated(0);
        dns.set_is_recursion_desirable(1);
        dns.set_is_recursion_available(0);
        dns.set_zero_reserved(0);
        dns.set_is_non_authenticated_data(0);
        dns.set_rcode(Retcode::NoError);
        dns.set_query_count(1);
        dns.set_response_count(0);
        dns.set_authority_rr_count(0);
        dns.set_additional_rr_count(1);
    }

    let mut cursor: usize = DNS_HDR_LEN;

    buffer[cursor..cursor + query.qname.len()].copy_from_slice(&query.qname);
    cursor += query.qname.len();

    buffer[cursor..cursor + 2].copy_from_slice(&query.qtype.0.to_be_bytes());
    cursor += 2;

    buffer[cursor..cursor + 2].copy_from_slice(&query.qclass.0.to_be_bytes());
    cursor += 2;

    write_opt_record(&mut buffer[cursor..]);

    trace!(fqdn, id, len = buffer.len(), "built SOA query");
    Ok(buffer)
}

fn create_soa_query(fqdn: &str) -> Result<DnsQuery, ProtocolError> {
    let qname: Vec<u8> = encode_dns_name(fqdn)?;
    let query: DnsQuery = DnsQuery {
        qname,
        qtype: DnsTypes::SOA,
        qclass: CLASS_IN,
        payload: Vec::new(),
    };
    Ok(query)
}

/// OPT pseudo-record: root owner, UDP size in CLASS, zeroed TTL (DO bit clear), no options.
fn write_opt_record(buffer: &mut [u8]) {
    buffer[0] = 0;
    buffer[1..3].copy_from_slice(&TYPE_OPT.to_be_bytes());
    buffer[3..5].copy_from_slice(&EDNS_UDP_SIZE.to_be_bytes());
    buffer[5..9].copy_from_slice(&0u32.to_be_bytes());
    buffer[9..11].copy_from_slice(&0u16.to_be_bytes());
}

/// Encodes a domain name as a sequence of length-prefixed labels.
///
/// A single trailing dot is optional; `"."` and `""` are the root.
pub fn encode_dns_name(name: &str) -> Result<Vec<u8>, ProtocolError> {
    let relative: &str = name.strip_suffix('.').unwrap_or(name);
    let mut encoded: Vec<u8> = Vec::with_capacity(relative.len() + 2);

    if !relative.is_empty() {
        for label in relative.split('.') {
            if label.is_empty() {
                return Err(ProtocolError::EmptyLabel(name.to_string()));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(ProtocolError::LabelTooLong(name.to_string()));
            }
            encoded.push(label.len() as u8);
            encoded.extend_from_slice(label.as_bytes());
        }
    }
    encoded.push(0);

    if encoded.len() > MAX_NAME_LEN {
        return Err(ProtocolError::NameTooLong(name.to_string()));
    }
    Ok(encoded)
}

/// Reads the fixed header of a reply without decoding its sections.
///
/// Truncated replies may end mid-record, so this is all that is safe to
/// read before deciding whether to retry over TCP.
pub fn read_header(payload: &[u8]) -> Result<ReplyHeader, ProtocolError> {
    let dns = DnsPacket::new(payload).ok_or(ProtocolError::ShortHeader)?;
    Ok(ReplyHeader {
        id: dns.get_id(),
        truncated: dns.get_is_truncated() != 0,
        rcode: dns.get_rcode(),
    })
}

/// Owner names, with a trailing dot, of every SOA record in the answer section.
///
/// Records of any other type are skipped by length, whatever their type.
/// Label bytes are kept as received; only `.` and `\` inside a label are
/// escaped.
pub fn soa_owners(payload: &[u8]) -> Result<Vec<Vec<u8>>, ProtocolError> {
    let mut reader = Reader::new(payload);
    let header: &[u8] = reader.take(DNS_HDR_LEN).map_err(|_| ProtocolError::ShortHeader)?;
    let question_count: u16 = u16::from_be_bytes([header[4], header[5]]);
    let answer_count: u16 = u16::from_be_bytes([header[6], header[7]]);

    for _ in 0..question_count {
        reader.name()?;
        // QTYPE, QCLASS
        reader.take(4)?;
    }

    let mut owners: Vec<Vec<u8>> = Vec::new();
    for _ in 0..answer_count {
        let owner: Vec<u8> = reader.name()?;
        let rtype: u16 = reader.u16()?;
        // CLASS, TTL
        reader.take(2 + 4)?;
        let rdlength: u16 = reader.u16()?;
        reader.take(usize::from(rdlength))?;

        if rtype == TYPE_SOA {
            owners.push(owner);
        }
    }
    Ok(owners)
}

/// True if the reply answers with a SOA record owned by exactly `fqdn`.
///
/// The comparison is byte for byte, so case-sensitive. A SOA for a parent
/// zone does not count.
pub fn has_soa_record(payload: &[u8], fqdn: &str) -> Result<bool, ProtocolError> {
    Ok(soa_owners(payload)?.iter().any(|owner| owner.as_slice() == fqdn.as_bytes()))
}

struct Reader<'a> {
    payload: &'a [u8],
    cursor: usize,
}

impl<'a> Reader<'a> {
    fn new(payload: &'a [u8]) -> Self {
        Self { payload, cursor: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], ProtocolError> {
        let bytes: &'a [u8] = slice(self.payload, self.cursor, len)?;
        self.cursor += len;
        Ok(bytes)
    }

    fn u16(&mut self) -> Result<u16, ProtocolError> {
        let bytes: &[u8] = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Reads a possibly compressed name at the cursor, in dotted form.
    fn name(&mut self) -> Result<Vec<u8>, ProtocolError> {
        let mut name: Vec<u8> = Vec::new();
        let mut offset: usize = self.cursor;
        // where the cursor continues once the first pointer is followed
        let mut resume: Option<usize> = None;
        let mut pointers: usize = 0;

        loop {
            let len: u8 = slice(self.payload, offset, 1)?[0];
            match len & POINTER_TAG {
                0 if len == 0 => {
                    offset += 1;
                    break;
                }
                0 => {
                    let label: &[u8] = slice(self.payload, offset + 1, usize::from(len))?;
                    for &byte in label {
                        if byte == b'.' || byte == b'\\' {
                            name.push(b'\\');
                        }
                        name.push(byte);
                    }
                    name.push(b'.');
                    offset += 1 + usize::from(len);
                }
                POINTER_TAG => {
                    let low: u8 = slice(self.payload, offset + 1, 1)?[0];
                    resume.get_or_insert(offset + 2);
                    pointers += 1;
                    if pointers > MAX_POINTERS {
                        return Err(ProtocolError::Malformed("too many compression pointers"));
                    }
                    offset = (usize::from(len & !POINTER_TAG) << 8) | usize::from(low);
                }
                _ => return Err(ProtocolError::Malformed("unsupported label type")),
            }
        }

        self.cursor = resume.unwrap_or(offset);
        if name.is_empty() {
            name.push(b'.');
        }
        Ok(name)
    }
}

fn slice(payload: &[u8], start: usize, len: usize) -> Result<&[u8], ProtocolError> {
    start
        .checked_add(len)
        .and_then(|end| payload.get(start..end))
        .ok_or(ProtocolError::Malformed("message ends mid-record"))
}
