//! Cross-crate tests for detection and the SOA probe, run against scripted
//! lookups and DNS transports.

#[cfg(test)]
mod util;
