//! # Resolution Error Taxonomy
//!
//! Distinguishes errors that end resolution of the current host (the batch
//! always continues with the next one) from degradations the pipeline can
//! absorb by falling back to an earlier value.

use std::net::IpAddr;
use thiserror::Error;

/// Everything that can go wrong while resolving one host.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The descriptor could not be parsed into a bare computer name.
    #[error("invalid host descriptor '{input}': {reason}")]
    InvalidInput { input: String, reason: String },

    /// Forward DNS failed; without addresses there is nothing to resolve.
    #[error("name resolution failed for '{name}': {detail}")]
    NameResolution { name: String, detail: String },

    /// Reverse DNS failed; the last known hostname stays in effect.
    #[error("reverse resolution failed for {addr}: {detail}")]
    ReverseResolution { addr: IpAddr, detail: String },

    /// No candidate address answered an ICMP echo in time.
    #[error("no address of '{name}' answered ICMP within {timeout_ms} ms")]
    Reachability { name: String, timeout_ms: u64 },

    /// The remote system-identity query failed; DNS-derived values stay.
    #[error("remote identity query failed for '{host}': {detail}")]
    RemoteIdentity { host: String, detail: String },

    /// The remote DNS-suffix probe failed; the DNS domain stands in.
    #[error("DNS suffix query failed for '{host}': {detail}")]
    DnsSuffix { host: String, detail: String },

    /// The assembled full computer name did not resolve at the final check.
    #[error("final lookup failed for '{name}': {detail}")]
    FinalValidation { name: String, detail: String },
}

impl ResolveError {
    /// Fatal kinds end the current host; every other kind is a degradation
    /// the pipeline reports and recovers from.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ResolveError::InvalidInput { .. } | ResolveError::NameResolution { .. }
        )
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
