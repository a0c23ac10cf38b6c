//! # identr-probes
//!
//! Production implementations of the identity sources: OS resolver lookups,
//! ICMP echo probing, the local environment and the remote-management
//! bridge.

pub mod dns;
pub mod icmp;
pub mod local;
pub mod remote;
