//! # System Name Service
//!
//! Forward and reverse resolution through the operating system's resolver.
//! Lookups block, so they run on the blocking pool.

use std::net::IpAddr;

use anyhow::{Context, ensure};
use async_trait::async_trait;
use tokio::task;

use identr_common::sources::{HostEntry, NameService};

/// `NameService` backed by the OS resolver.
pub struct SystemNameService;

#[async_trait]
impl NameService for SystemNameService {
    async fn forward(&self, name: &str) -> anyhow::Result<HostEntry> {
        let name = name.to_string();

        task::spawn_blocking(move || {
            let addrs: Vec<IpAddr> = dns_lookup::lookup_host(&name)
                .with_context(|| format!("forward lookup for '{name}'"))?;
            ensure!(!addrs.is_empty(), "'{name}' resolved to an empty address set");

            let addrs = order_by_family(addrs);
            // Canonical name of the preferred address; the queried name
            // stands in when no PTR record exists.
            let reported = dns_lookup::lookup_addr(&addrs[0]).unwrap_or_else(|_| name.clone());

            Ok(HostEntry {
                name: reported,
                addrs,
            })
        })
        .await?
    }

    async fn reverse(&self, addr: IpAddr) -> anyhow::Result<String> {
        task::spawn_blocking(move || {
            dns_lookup::lookup_addr(&addr).with_context(|| format!("reverse lookup for {addr}"))
        })
        .await?
    }
}

/// Orders IPv4 ahead of IPv6, preserving resolver order within each family.
pub fn order_by_family(mut addrs: Vec<IpAddr>) -> Vec<IpAddr> {
    addrs.sort_by_key(|addr| match addr {
        IpAddr::V4(_) => 0u8,
        IpAddr::V6(_) => 1u8,
    });
    addrs
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
