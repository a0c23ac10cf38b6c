//! # Resolve Command
//!
//! Wires the system-backed sources into the resolver, walks the requested
//! targets and renders one identity tree per host.

use std::net::IpAddr;
use std::time::{Duration, Instant};

use colored::*;
use tracing::info_span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

use identr_common::config::Config;
use identr_common::credential::Credential;
use identr_common::error::ResolveError;
use identr_common::record::IdentityRecord;
use identr_common::{error, success, warn};
use identr_core::{NetworkIdentityResolver, Sources};
use identr_probes::dns::SystemNameService;
use identr_probes::icmp::IcmpProber;
use identr_probes::local::LocalSystem;
use identr_probes::remote::ShellManagement;

use crate::commands::ResolveArgs;
use crate::iprint;
use crate::terminal::{colors, print};

type Detail = (String, ColoredString);

pub async fn resolve(args: ResolveArgs) -> anyhow::Result<()> {
    if !args.turbo && !is_root::is_root() {
        warn!("not running as root, ICMP reachability checks may degrade");
    }

    let resolver = build_resolver(&args);

    let span = info_span!("resolve", indicatif.pb_show = true);
    span.pb_set_message(&format!("resolving {} host(s)", args.targets.len()));
    let guard = span.enter();

    let started = Instant::now();
    let outcomes = resolver.resolve_many(&args.targets).await;

    drop(guard);
    drop(span);

    report(&args.targets, outcomes, started.elapsed(), args.quiet);
    Ok(())
}

fn build_resolver(args: &ResolveArgs) -> NetworkIdentityResolver {
    let config = Config {
        turbo: args.turbo,
        strict: args.strict,
    };

    let sources = Sources {
        names: Box::new(SystemNameService),
        reachability: Box::new(IcmpProber),
        management: Box::new(ShellManagement),
        executor: Box::new(ShellManagement),
        environment: Box::new(LocalSystem),
    };

    let mut resolver = NetworkIdentityResolver::new(sources, config);

    if let Some(username) = &args.username {
        let password = args.password.clone().unwrap_or_default();
        resolver = resolver.with_credential(Credential::new(username.clone(), password));
    }

    resolver
}

fn report(
    targets: &[String],
    outcomes: Vec<Result<IdentityRecord, ResolveError>>,
    elapsed: Duration,
    quiet: u8,
) {
    let total = targets.len();

    let mut records: Vec<(usize, IdentityRecord)> = Vec::new();
    for (idx, (target, outcome)) in targets.iter().zip(outcomes).enumerate() {
        match outcome {
            Ok(record) => records.push((idx, record)),
            Err(err) => error!("'{target}': {err}"),
        }
    }

    if records.is_empty() {
        print::header("zero identities resolved", quiet);
        print::no_results();
        return;
    }

    print_records(&records, quiet);
    print_summary(records.len(), total, elapsed, quiet);
}

fn print_records(records: &[(usize, IdentityRecord)], quiet: u8) {
    if quiet >= 2 {
        return;
    }

    for (pos, (idx, record)) in records.iter().enumerate() {
        print_record(*idx, record);
        if pos + 1 != records.len() {
            iprint!();
        }
    }
}

fn print_record(idx: usize, record: &IdentityRecord) {
    print::tree_head(idx, &record.computer_name);

    let details: Vec<Detail> = vec![
        ("Input".into(), record.input_name.normal()),
        ("Address".into(), paint_addr(record.ip_address)),
        ("DNS host".into(), record.dns_host_name.normal()),
        ("DNS domain".into(), paint_opt(record.dns_domain.as_deref())),
        ("Domain".into(), paint_opt(record.domain.as_deref())),
        ("DNS entry".into(), paint_opt(record.dns_host_entry.as_deref())),
        ("FQDN".into(), record.fqdn.color(colors::ACCENT)),
        (
            "Full name".into(),
            record.full_computer_name.color(colors::PRIMARY),
        ),
    ];

    print::as_tree_one_level(details);
}

fn paint_addr(addr: IpAddr) -> ColoredString {
    let color = match addr {
        IpAddr::V4(_) => colors::ADDR_V4,
        IpAddr::V6(_) => colors::ADDR_V6,
    };
    addr.to_string().color(color)
}

fn paint_opt(value: Option<&str>) -> ColoredString {
    match value {
        Some(value) => value.color(colors::TEXT_DEFAULT),
        None => "n/a".dimmed(),
    }
}

fn print_summary(resolved: usize, total: usize, elapsed: Duration, quiet: u8) {
    let counts: ColoredString = format!("{resolved}/{total} hosts").bold().green();
    let timing: ColoredString = format!("{:.2}s", elapsed.as_secs_f64()).bold().yellow();
    let output: ColoredString = format!("Resolution complete: {counts} identified in {timing}")
        .color(colors::TEXT_DEFAULT);

    match quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
        }
        _ => {
            iprint!();
            success!("{}", output)
        }
    }
}
