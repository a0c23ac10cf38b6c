//! # ICMP Reachability
//!
//! One echo request per call through `surge-ping`. Reachability is an
//! advisory signal: when the socket cannot be opened (missing privileges)
//! the probe reports unreachable instead of erroring.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use surge_ping::{Client, Config, ICMP, PingIdentifier, PingSequence};
use tracing::debug;

use identr_common::sources::Reachability;

const ECHO_PAYLOAD: [u8; 56] = [0; 56];

/// `Reachability` backed by ICMP echo requests.
pub struct IcmpProber;

#[async_trait]
impl Reachability for IcmpProber {
    async fn echo(&self, addr: IpAddr, timeout: Duration) -> bool {
        let config = match addr {
            IpAddr::V4(_) => Config::default(),
            IpAddr::V6(_) => Config::builder().kind(ICMP::V6).build(),
        };

        let client = match Client::new(&config) {
            Ok(client) => client,
            Err(e) => {
                debug!("cannot open ICMP socket for {addr}: {e}");
                return false;
            }
        };

        let mut pinger = client.pinger(addr, PingIdentifier(rand::random())).await;
        pinger.timeout(timeout);

        match pinger.ping(PingSequence(0), &ECHO_PAYLOAD).await {
            Ok((_reply, latency)) => {
                debug!("{addr} answered ICMP in {latency:?}");
                true
            }
            Err(e) => {
                debug!("{addr} did not answer ICMP: {e}");
                false
            }
        }
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
