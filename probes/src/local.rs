//! # Local Environment
//!
//! The resolving machine's own identity: configured computer name and
//! environment DNS domain. The pipeline receives these injected rather
//! than reading the process environment itself.

use anyhow::Context;

use identr_common::sources::LocalEnvironment;

/// Environment variable Windows populates with the primary DNS suffix.
const DOMAIN_ENV_VAR: &str = "USERDNSDOMAIN";

/// `LocalEnvironment` backed by the operating system.
pub struct LocalSystem;

impl LocalSystem {
    /// The machine's configured host name, which may be fully qualified.
    fn full_name() -> anyhow::Result<String> {
        let name = hostname::get().context("querying local host name")?;
        Ok(name.to_string_lossy().into_owned())
    }
}

impl LocalEnvironment for LocalSystem {
    fn machine_name(&self) -> anyhow::Result<String> {
        let full = Self::full_name()?;
        let bare = full.split('.').next().unwrap_or(&full);
        anyhow::ensure!(!bare.is_empty(), "local host name is empty");

        Ok(bare.to_string())
    }

    fn dns_domain(&self) -> Option<String> {
        if let Ok(domain) = std::env::var(DOMAIN_ENV_VAR) {
            if !domain.is_empty() {
                return Some(domain.to_lowercase());
            }
        }

        domain_of(&Self::full_name().ok()?)
    }

    fn is_windows_like(&self) -> bool {
        cfg!(target_os = "windows")
    }
}

/// Everything after the first dot of a qualified name, lower-cased.
fn domain_of(full_name: &str) -> Option<String> {
    let mut dots = full_name.char_indices().filter(|&(_, c)| c == '.');

    dots.next()
        .map(|(dot, _)| full_name[dot + 1..].to_lowercase())
        .filter(|domain| !domain.is_empty())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
