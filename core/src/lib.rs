//! # identr-core
//!
//! The identity resolution pipeline. Consumes the collaborator traits from
//! `identr-common`; knows nothing about how DNS, ICMP or the management
//! channel are actually reached.

pub mod naming;
pub mod resolver;

pub use resolver::{NetworkIdentityResolver, Sources};
