//! # Identity Sources
//!
//! Trait seams for everything the resolver has to ask the outside world:
//! DNS, ICMP reachability, the remote-management channel and the local
//! execution environment. The pipeline depends only on these traits, so
//! every stage can be exercised against fakes.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;

use crate::credential::Credential;
use crate::record::SystemIdentity;

/// Result of one forward DNS lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostEntry {
    /// Hostname the resolver reports for the entry; the queried name when
    /// no canonical name is known.
    pub name: String,
    /// Candidate addresses, IPv4 ordered before IPv6, ties in OS order.
    pub addrs: Vec<IpAddr>,
}

/// Forward and reverse name resolution.
#[async_trait]
pub trait NameService: Send + Sync {
    /// Resolves a name to its host entry. An empty address set is an error.
    async fn forward(&self, name: &str) -> anyhow::Result<HostEntry>;

    /// Resolves an address back to a hostname.
    async fn reverse(&self, addr: IpAddr) -> anyhow::Result<String>;
}

/// ICMP echo probing. Purely advisory; implementations report failure
/// rather than erroring when probing is impossible.
#[async_trait]
pub trait Reachability: Send + Sync {
    async fn echo(&self, addr: IpAddr, timeout: Duration) -> bool;
}

/// System-identity queries over a remote-management channel
/// (CIM/WMI-equivalent).
#[async_trait]
pub trait ManagementQuery: Send + Sync {
    async fn system_identity(
        &self,
        host: &str,
        credential: Option<&Credential>,
    ) -> anyhow::Result<SystemIdentity>;
}

/// Read-only command execution on the target host.
#[async_trait]
pub trait RemoteExecutor: Send + Sync {
    /// Queries the primary DNS suffix the host itself is configured with.
    async fn dns_suffix(
        &self,
        host: &str,
        credential: Option<&Credential>,
    ) -> anyhow::Result<String>;
}

/// The resolving process's own environment, injected rather than read
/// ambiently so the normalizer and domain fallback are testable.
pub trait LocalEnvironment: Send + Sync {
    /// This machine's configured bare computer name.
    fn machine_name(&self) -> anyhow::Result<String>;

    /// The environment-configured DNS domain, if any.
    fn dns_domain(&self) -> Option<String>;

    /// Gates whether reachability and remote-identity stages are attempted.
    fn is_windows_like(&self) -> bool;
}
