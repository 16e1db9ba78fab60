//! I/O seams of the network classifiers.
//!
//! Both are traits so detection can run against fakes:
//! * [`lookup`]: forward resolution of hostnames.
//! * [`transport`]: raw DNS message exchange with a server.

pub mod lookup;
pub mod transport;
