//! # Identity Resolution Pipeline
//!
//! Implements the core "Resolve Network Identity" use case.
//!
//! One host descriptor flows through six stages: normalization, forward DNS,
//! domain derivation, reachability selection, remote self-identification and
//! the final merge. Each stage consumes the working [`ResolutionState`] and
//! returns the next one; hosts in a batch are resolved strictly one after
//! another, so a fatal error only ever ends the host that caused it.

use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

use identr_common::config::Config;
use identr_common::credential::Credential;
use identr_common::error::ResolveError;
use identr_common::record::{IdentityRecord, SystemIdentity};
use identr_common::sources::{
    LocalEnvironment, ManagementQuery, NameService, Reachability, RemoteExecutor,
};
use identr_common::target::{HostDescriptor, HostTarget, is_local_alias};
use identr_common::{info, warn};

use crate::naming;

/// One ICMP echo per candidate address, sequential, first answer wins.
const ECHO_TIMEOUT: Duration = Duration::from_millis(1_000);

/// The identity sources the resolver consults.
pub struct Sources {
    pub names: Box<dyn NameService>,
    pub reachability: Box<dyn Reachability>,
    pub management: Box<dyn ManagementQuery>,
    pub executor: Box<dyn RemoteExecutor>,
    pub environment: Box<dyn LocalEnvironment>,
}

/// Working record handed from stage to stage for one host.
///
/// Outside the IP-literal case, `hostname` is always the first label of
/// `fqdn`.
#[derive(Clone, Debug)]
struct ResolutionState {
    hostname: String,
    fqdn: String,
    /// Name reported by the initial forward lookup, kept verbatim.
    entry_name: String,
    addrs: Vec<IpAddr>,
    selected: IpAddr,
    dns_domain: Option<String>,
    dns_suffix: Option<String>,
    remote: Option<SystemIdentity>,
}

/// Application service resolving canonical host identities.
///
/// Reconciles forward/reverse DNS, ICMP reachability, the host's own
/// self-report and directory-style domain suffixes into one
/// [`IdentityRecord`] per host.
pub struct NetworkIdentityResolver {
    sources: Sources,
    config: Config,
    credential: Option<Credential>,
}

impl NetworkIdentityResolver {
    pub fn new(sources: Sources, config: Config) -> Self {
        Self {
            sources,
            config,
            credential: None,
        }
    }

    /// Attaches the credential handed through to the remote channel.
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Resolves a batch sequentially: one result per input, in input order.
    /// A fatal error for one host never aborts the others.
    pub async fn resolve_many(
        &self,
        inputs: &[String],
    ) -> Vec<Result<IdentityRecord, ResolveError>> {
        let mut outcomes = Vec::with_capacity(inputs.len());
        for input in inputs {
            outcomes.push(self.resolve(input).await);
        }
        outcomes
    }

    /// Resolves one descriptor into an identity record.
    pub async fn resolve(&self, input: &str) -> Result<IdentityRecord, ResolveError> {
        let descriptor = self.normalize(input)?;
        info!("Resolving identity of '{}'", descriptor.computer_name);

        let mut state = self.forward_resolve(&descriptor).await?;
        state = self.derive_names(state, &descriptor);

        if self.config.turbo {
            return Ok(self.merge_turbo(state, descriptor));
        }

        if self.sources.environment.is_windows_like() {
            state = self.select_reachable(state).await?;
            state = self.derive_names(state, &descriptor);
            state = self.fetch_remote_identity(state).await?;
        }

        self.merge(state, descriptor).await
    }

    /// Stage 1: parse the descriptor into a bare computer name, substituting
    /// this machine's own name for local aliases.
    fn normalize(&self, input: &str) -> Result<HostDescriptor, ResolveError> {
        let target = HostTarget::from_str(input).map_err(|reason| ResolveError::InvalidInput {
            input: input.to_string(),
            reason,
        })?;

        let text = target.host_text();
        let denotes_local = match text.parse::<IpAddr>() {
            Ok(addr) => addr.is_loopback(),
            Err(_) => is_local_alias(&text),
        };

        let machine = self.sources.environment.machine_name();
        let is_local = denotes_local
            || machine
                .as_ref()
                .map(|name| text.eq_ignore_ascii_case(name))
                .unwrap_or(false);

        let computer_name = if is_local {
            machine.map_err(|e| ResolveError::InvalidInput {
                input: input.to_string(),
                reason: format!("cannot determine the local machine name: {e:#}"),
            })?
        } else {
            text
        };

        Ok(HostDescriptor {
            input: input.to_string(),
            is_local,
            computer_name,
        })
    }

    /// Stage 2: forward resolution. Failure here is fatal for this host.
    async fn forward_resolve(
        &self,
        descriptor: &HostDescriptor,
    ) -> Result<ResolutionState, ResolveError> {
        let name = &descriptor.computer_name;
        let entry =
            self.sources
                .names
                .forward(name)
                .await
                .map_err(|e| ResolveError::NameResolution {
                    name: name.clone(),
                    detail: format!("{e:#}"),
                })?;

        let Some(&selected) = entry.addrs.first() else {
            return Err(ResolveError::NameResolution {
                name: name.clone(),
                detail: "lookup returned no addresses".to_string(),
            });
        };

        Ok(ResolutionState {
            hostname: naming::first_label(&entry.name).to_string(),
            fqdn: entry.name.clone(),
            entry_name: entry.name,
            addrs: entry.addrs,
            selected,
            dns_domain: None,
            dns_suffix: None,
            remote: None,
        })
    }

    /// Stage 3: domain derivation. Re-run after reachability selection
    /// because the FQDN may have changed in between.
    fn derive_names(
        &self,
        mut state: ResolutionState,
        descriptor: &HostDescriptor,
    ) -> ResolutionState {
        state.dns_domain = naming::derive_domain(
            &state.fqdn,
            &descriptor.computer_name,
            self.sources.environment.dns_domain().as_deref(),
        );

        if let Some(domain) = &state.dns_domain {
            if !state.fqdn.contains('.') && !naming::is_ip_literal(&state.fqdn) {
                state.fqdn = format!("{}.{domain}", state.hostname);
            }
        }

        state
    }

    /// Stage 4: select the first candidate that answers ICMP. When the
    /// selection moves off the DNS-preferred address, refresh the name from
    /// reverse DNS exactly once.
    async fn select_reachable(
        &self,
        mut state: ResolutionState,
    ) -> Result<ResolutionState, ResolveError> {
        let mut responder = None;
        for &addr in &state.addrs {
            if self.sources.reachability.echo(addr, ECHO_TIMEOUT).await {
                responder = Some(addr);
                break;
            }
        }

        let Some(addr) = responder else {
            // The DNS-preferred address stays selected.
            self.degrade(ResolveError::Reachability {
                name: state.hostname.clone(),
                timeout_ms: ECHO_TIMEOUT.as_millis() as u64,
            })?;
            return Ok(state);
        };

        if addr == state.selected {
            return Ok(state);
        }

        state.selected = addr;
        match self.sources.names.reverse(addr).await {
            Ok(fresh) => {
                state.hostname = naming::first_label(&fresh).to_string();
                state.fqdn = fresh;
            }
            // The previous FQDN stays in effect.
            Err(e) => self.degrade(ResolveError::ReverseResolution {
                addr,
                detail: format!("{e:#}"),
            })?,
        }

        Ok(state)
    }

    /// Stage 5: the host's self-report beats externally observed DNS.
    async fn fetch_remote_identity(
        &self,
        mut state: ResolutionState,
    ) -> Result<ResolutionState, ResolveError> {
        // Both probes use the name that actually resolved; the overridden
        // FQDN may not exist in DNS on disjoint-domain networks.
        let connect_name = state.fqdn.clone();
        let credential = self.credential.as_ref();

        match self
            .sources
            .management
            .system_identity(&connect_name, credential)
            .await
        {
            Ok(identity) => {
                state.hostname = identity.hostname.clone();
                state.fqdn = match &identity.domain {
                    Some(domain) => format!("{}.{domain}", identity.hostname),
                    None => identity.hostname.clone(),
                };
                state.remote = Some(identity);
            }
            Err(e) => self.degrade(ResolveError::RemoteIdentity {
                host: connect_name.clone(),
                detail: format!("{e:#}"),
            })?,
        }

        match self
            .sources
            .executor
            .dns_suffix(&connect_name, credential)
            .await
        {
            Ok(suffix) => state.dns_suffix = Some(suffix),
            // The derived DNS domain stands in at merge time.
            Err(e) => self.degrade(ResolveError::DnsSuffix {
                host: connect_name,
                detail: format!("{e:#}"),
            })?,
        }

        Ok(state)
    }

    /// Stage 6: assemble the record and verify the full name resolves.
    async fn merge(
        &self,
        state: ResolutionState,
        descriptor: HostDescriptor,
    ) -> Result<IdentityRecord, ResolveError> {
        let suffix = state.dns_suffix.clone().or_else(|| state.dns_domain.clone());
        let full_computer_name = match &suffix {
            Some(suffix) => format!("{}.{suffix}", state.hostname),
            None => state.fqdn.clone(),
        };

        let dns_host_entry = match self.sources.names.forward(&full_computer_name).await {
            Ok(entry) => Some(entry.name),
            Err(e) => {
                // The record still ships, with the entry marked absent.
                self.degrade(ResolveError::FinalValidation {
                    name: full_computer_name.clone(),
                    detail: format!("{e:#}"),
                })?;
                None
            }
        };

        let domain = match &state.remote {
            Some(identity) => identity.domain.clone(),
            None => state.dns_domain.clone(),
        };

        Ok(IdentityRecord {
            input_name: descriptor.input,
            computer_name: state.hostname.clone(),
            ip_address: state.selected,
            dns_host_name: state.hostname,
            dns_domain: suffix,
            domain,
            dns_host_entry,
            fqdn: state.fqdn,
            full_computer_name,
        })
    }

    /// Turbo: DNS-only record, no directory/DNS domain distinction and no
    /// extra validation lookup.
    fn merge_turbo(&self, state: ResolutionState, descriptor: HostDescriptor) -> IdentityRecord {
        let domain = state.dns_domain.clone();
        let full_computer_name = match &domain {
            Some(domain) => format!("{}.{domain}", state.hostname),
            None => state.fqdn.clone(),
        };

        IdentityRecord {
            input_name: descriptor.input,
            computer_name: state.hostname.to_uppercase(),
            ip_address: state.selected,
            dns_host_name: state.hostname,
            dns_domain: domain.clone(),
            domain,
            dns_host_entry: Some(state.entry_name),
            fqdn: state.fqdn,
            full_computer_name,
        }
    }

    /// Degradations warn in friendly mode and become the host's error in
    /// strict mode.
    fn degrade(&self, error: ResolveError) -> Result<(), ResolveError> {
        if self.config.strict {
            return Err(error);
        }

        warn!("{error}");
        Ok(())
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
