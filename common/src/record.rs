//! # Identity Record
//!
//! The immutable result of resolving one host, reconciling DNS, reachability
//! and the host's own self-report into a single coherent view.

use std::net::IpAddr;

/// Canonical network identity of one resolved host.
///
/// Exactly one record is produced per successfully resolved input; hosts that
/// fail fatally produce no record at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentityRecord {
    /// The descriptor exactly as supplied by the caller.
    pub input_name: String,
    /// Working computer name; upper-cased in turbo mode.
    pub computer_name: String,
    /// The address selected for the host (reachability-preferred).
    pub ip_address: IpAddr,
    /// Host label as known to DNS, or self-reported when available.
    pub dns_host_name: String,
    /// Effective DNS suffix; None when no source produced one.
    pub dns_domain: Option<String>,
    /// Directory-style domain; None for workgroup hosts or unknown.
    pub domain: Option<String>,
    /// Reported name of the final verification lookup; None if it failed.
    pub dns_host_entry: Option<String>,
    /// hostname joined with the directory domain.
    pub fqdn: String,
    /// hostname joined with the DNS suffix; the only name guaranteed
    /// consistent between directory service and DNS.
    pub full_computer_name: String,
}

/// What a host reports about itself over the management channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemIdentity {
    /// The host's own configured computer name.
    pub hostname: String,
    /// Directory domain the host believes it is joined to; None for
    /// workgroup members.
    pub domain: Option<String>,
}
