//! Wire formats spoken by the network classifiers.
//!
//! * [`dns`]: SOA questions with an EDNS0 OPT record and reply inspection.
//! * [`tcp`]: the two-byte length framing of DNS over TCP.

pub mod dns;
pub mod tcp;
