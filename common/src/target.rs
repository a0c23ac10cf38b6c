//! # Host Descriptor Model
//!
//! Defines the accepted inputs for an identity resolution.
//!
//! This module handles parsing and representing host descriptors, which can be:
//! * A plain or fully qualified host name (e.g., `srv1`, `srv1.corp.local`).
//! * An IP literal, IPv4 or IPv6, optionally bracketed (e.g., `[::1]`).
//! * An instance-qualified name (e.g., `srv1\PROD`, `srv1.corp.local\PROD,1433`).
//! * A local-host alias (`.`, `localhost`, `(local)`), substituted later by the
//!   input normalizer.

use std::net::IpAddr;
use std::str::FromStr;

/// Descriptor prefixes that name a transport rather than a host.
const PROTOCOL_PREFIXES: [&str; 3] = ["tcp:", "np:", "lpc:"];

/// Aliases that always denote the machine the resolver runs on.
const LOCAL_ALIASES: [&str; 3] = [".", "localhost", "(local)"];

/// Represents a distinct host reference to be resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostTarget {
    /// A plain or fully qualified host name.
    Hostname { name: String },
    /// A literal IP address.
    IpLiteral { addr: IpAddr },
    /// An instance-qualified name in `host\instance` form.
    Instance { host: String, instance: String },
}

impl HostTarget {
    /// The text the resolver should treat as the machine reference.
    pub fn host_text(&self) -> String {
        match self {
            HostTarget::Hostname { name } => name.clone(),
            HostTarget::IpLiteral { addr } => addr.to_string(),
            HostTarget::Instance { host, .. } => host.clone(),
        }
    }
}

impl FromStr for HostTarget {
    type Err = String;

    /// Parses a string into a `HostTarget`.
    ///
    /// Supported forms:
    /// * **Host**: `srv1`, `srv1.corp.local`, `localhost`, `.`
    /// * **IP literal**: `10.0.0.5`, `fe80::1`, `[fe80::1]`
    /// * **Instance**: `host\instance`
    /// * Any of the above with a `tcp:`/`np:`/`lpc:` prefix or a `,port` suffix,
    ///   both of which are stripped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("descriptor is empty".to_string());
        }

        let stripped = strip_protocol_prefix(trimmed);
        let stripped = strip_port(stripped)?;
        let (host_text, instance) = split_instance(stripped)?;

        let host = if let Some(addr) = parse_bracketed(host_text)? {
            addr.to_string()
        } else {
            if host_text.parse::<IpAddr>().is_err() && !is_local_alias(host_text) {
                validate_host_name(host_text)?;
            }
            host_text.to_string()
        };

        if let Some(instance) = instance {
            return Ok(HostTarget::Instance {
                host,
                instance: instance.to_string(),
            });
        }

        if let Ok(addr) = host.parse::<IpAddr>() {
            return Ok(HostTarget::IpLiteral { addr });
        }

        Ok(HostTarget::Hostname { name: host })
    }
}

/// True for descriptor text that names the resolving machine itself.
pub fn is_local_alias(name: &str) -> bool {
    LOCAL_ALIASES
        .iter()
        .any(|alias| name.eq_ignore_ascii_case(alias))
}

/// Strips a leading transport prefix like `tcp:` (case-insensitive).
fn strip_protocol_prefix(s: &str) -> &str {
    for prefix in PROTOCOL_PREFIXES {
        // The prefix-length byte offset can fall inside a multi-byte
        // character; `get` rejects that where raw slicing would panic.
        let head_matches = s
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
        if head_matches && s.len() > prefix.len() {
            // Matched head is pure ASCII, so the tail starts on a boundary.
            return &s[prefix.len()..];
        }
    }
    s
}

/// Strips a trailing `,port` suffix, validating that the port is numeric.
fn strip_port(s: &str) -> Result<&str, String> {
    let Some((host, port)) = s.rsplit_once(',') else {
        return Ok(s);
    };

    if host.is_empty() {
        return Err(format!("no host before port in '{s}'"));
    }
    port.trim()
        .parse::<u16>()
        .map_err(|e| format!("invalid port '{port}': {e}"))?;

    Ok(host)
}

/// Splits an instance qualifier off a `host\instance` descriptor.
fn split_instance(s: &str) -> Result<(&str, Option<&str>), String> {
    let Some((host, instance)) = s.split_once('\\') else {
        return Ok((s, None));
    };

    if host.is_empty() {
        return Err(format!("no host before instance in '{s}'"));
    }
    if instance.is_empty() || instance.contains('\\') {
        return Err(format!("invalid instance name in '{s}'"));
    }

    Ok((host, Some(instance)))
}

/// Parses a bracketed IPv6 literal like `[fe80::1]`.
fn parse_bracketed(s: &str) -> Result<Option<IpAddr>, String> {
    let Some(inner) = s.strip_prefix('[') else {
        return Ok(None);
    };

    let inner = inner
        .strip_suffix(']')
        .ok_or_else(|| format!("unclosed bracket in '{s}'"))?;

    let addr = inner
        .parse::<IpAddr>()
        .map_err(|e| format!("invalid address literal '{inner}': {e}"))?;

    Ok(Some(addr))
}

/// Rejects host names containing characters DNS could never resolve.
fn validate_host_name(name: &str) -> Result<(), String> {
    for c in name.chars() {
        if !c.is_ascii_alphanumeric() && !matches!(c, '-' | '_' | '.') {
            return Err(format!("illegal character '{c}' in host name '{name}'"));
        }
    }
    Ok(())
}

/// A normalized reference to one host.
///
/// Created once by the input normalizer; the resolver stages read it but
/// never mutate it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostDescriptor {
    /// The descriptor exactly as the caller supplied it.
    pub input: String,
    /// Whether the descriptor denotes the resolving machine itself.
    pub is_local: bool,
    /// Bare computer name with no instance qualifier, port or prefix.
    pub computer_name: String,
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
