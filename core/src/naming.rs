//! # Name Derivation
//!
//! Pure helpers for splitting resolved names into hostname and domain.
//! IP-address literals are never treated as dotted names: an address
//! carries no label hierarchy, so it is neither split nor used as a
//! domain source.

use std::net::IpAddr;

/// True when the text parses as a bare IP address.
pub fn is_ip_literal(name: &str) -> bool {
    name.parse::<IpAddr>().is_ok()
}

/// First DNS label of a name; IP literals are returned whole.
pub fn first_label(name: &str) -> &str {
    if is_ip_literal(name) {
        return name;
    }
    name.split('.').next().unwrap_or(name)
}

/// Derives the DNS domain with a fixed precedence: the dotted remainder of
/// `fqdn`, else the dotted remainder of `original_name`, else the caller's
/// environment domain lower-cased.
///
/// When `fqdn` is an IP literal only the original name can contribute a
/// domain; the environment fallback would qualify an address that has no
/// hostname to attach it to.
pub fn derive_domain(
    fqdn: &str,
    original_name: &str,
    env_domain: Option<&str>,
) -> Option<String> {
    if is_ip_literal(fqdn) {
        return domain_after_first_dot(original_name);
    }

    if let Some(domain) = domain_after_first_dot(fqdn) {
        return Some(domain);
    }
    if let Some(domain) = domain_after_first_dot(original_name) {
        return Some(domain);
    }

    env_domain
        .map(|domain| domain.to_lowercase())
        .filter(|domain| !domain.is_empty())
}

fn domain_after_first_dot(name: &str) -> Option<String> {
    if is_ip_literal(name) {
        return None;
    }

    let (_, domain) = name.split_once('.')?;
    (!domain.is_empty()).then(|| domain.to_string())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
