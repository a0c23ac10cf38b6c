#![cfg(test)]
use std::net::IpAddr;

use identr_common::config::Config;
use identr_common::error::ResolveError;

use crate::support::{
    resolver, FakeEnvironment, FakeExecutor, FakeManagement, FakeNames, FakePinger,
};

fn addr(text: &str) -> IpAddr {
    text.parse().unwrap()
}

/// Verifies the full pipeline for a host that is reachable on its
/// DNS-preferred address while remote introspection is unavailable: every
/// identity field falls back to the DNS-derived values.
#[tokio::test]
async fn resolves_a_plain_reachable_host() {
    let names = FakeNames::new()
        .entry("srv1", "srv1.corp.example.com", &["10.0.0.5"])
        .entry("srv1.corp.example.com", "srv1.corp.example.com", &["10.0.0.5"]);
    let forward_calls = names.forward_calls.clone();
    let reverse_calls = names.reverse_calls.clone();

    let resolver = resolver(
        names,
        FakePinger::answering(&["10.0.0.5"]),
        FakeManagement::unavailable(),
        FakeExecutor::unavailable(),
        FakeEnvironment::windows("WS01", None),
        Config::default(),
    );

    let record = resolver.resolve("srv1").await.unwrap();

    assert_eq!(record.input_name, "srv1");
    assert_eq!(record.computer_name, "srv1");
    assert_eq!(record.ip_address, addr("10.0.0.5"));
    assert_eq!(record.dns_host_name, "srv1");
    assert_eq!(record.dns_domain.as_deref(), Some("corp.example.com"));
    assert_eq!(record.domain.as_deref(), Some("corp.example.com"));
    assert_eq!(record.fqdn, "srv1.corp.example.com");
    assert_eq!(record.full_computer_name, "srv1.corp.example.com");
    assert_eq!(
        record.dns_host_entry.as_deref(),
        Some("srv1.corp.example.com")
    );

    // Preferred address answered, so the name never went back through
    // reverse DNS.
    assert!(reverse_calls.lock().unwrap().is_empty());
    assert_eq!(
        *forward_calls.lock().unwrap(),
        vec!["srv1".to_string(), "srv1.corp.example.com".to_string()]
    );
}

#[tokio::test]
async fn a_fatal_host_never_aborts_the_batch() {
    let names = FakeNames::new()
        .entry("srv1", "srv1.corp.example.com", &["10.0.0.5"])
        .entry("srv1.corp.example.com", "srv1.corp.example.com", &["10.0.0.5"]);

    let resolver = resolver(
        names,
        FakePinger::answering(&["10.0.0.5"]),
        FakeManagement::unavailable(),
        FakeExecutor::unavailable(),
        FakeEnvironment::windows("WS01", None),
        Config::default(),
    );

    let targets = ["ghost".to_string(), "srv1".to_string()];
    let outcomes = resolver.resolve_many(&targets).await;

    assert_eq!(outcomes.len(), 2);

    let error = outcomes[0].as_ref().unwrap_err();
    assert!(error.is_fatal());
    assert!(matches!(error, ResolveError::NameResolution { .. }));

    let record = outcomes[1].as_ref().unwrap();
    assert_eq!(record.computer_name, "srv1");
}

/// When the first answering address is not the DNS-preferred one, the name
/// is refreshed from reverse DNS for that address, exactly once.
#[tokio::test]
async fn reselection_refreshes_reverse_dns_exactly_once() {
    let names = FakeNames::new()
        .entry("srv1", "srv1.corp.example.com", &["10.0.0.5", "10.0.0.6"])
        .entry("srv1b.corp.example.com", "srv1b.corp.example.com", &["10.0.0.6"])
        .pointer("10.0.0.6", "srv1b.corp.example.com");
    let reverse_calls = names.reverse_calls.clone();

    let pinger = FakePinger::answering(&["10.0.0.6"]);
    let probes = pinger.probes.clone();

    let resolver = resolver(
        names,
        pinger,
        FakeManagement::unavailable(),
        FakeExecutor::unavailable(),
        FakeEnvironment::windows("WS01", None),
        Config::default(),
    );

    let record = resolver.resolve("srv1").await.unwrap();

    assert_eq!(record.ip_address, addr("10.0.0.6"));
    assert_eq!(record.computer_name, "srv1b");
    assert_eq!(record.fqdn, "srv1b.corp.example.com");

    assert_eq!(*probes.lock().unwrap(), vec![addr("10.0.0.5"), addr("10.0.0.6")]);
    assert_eq!(*reverse_calls.lock().unwrap(), vec![addr("10.0.0.6")]);
}

#[tokio::test]
async fn unreachable_hosts_keep_the_preferred_address() {
    let names = FakeNames::new()
        .entry("srv1", "srv1.corp.example.com", &["10.0.0.5", "10.0.0.6"])
        .entry("srv1.corp.example.com", "srv1.corp.example.com", &["10.0.0.5"]);
    let reverse_calls = names.reverse_calls.clone();

    let pinger = FakePinger::silent();
    let probes = pinger.probes.clone();

    let resolver = resolver(
        names,
        pinger,
        FakeManagement::unavailable(),
        FakeExecutor::unavailable(),
        FakeEnvironment::windows("WS01", None),
        Config::default(),
    );

    let record = resolver.resolve("srv1").await.unwrap();

    // Every candidate was probed, none answered, selection stands.
    assert_eq!(*probes.lock().unwrap(), vec![addr("10.0.0.5"), addr("10.0.0.6")]);
    assert_eq!(record.ip_address, addr("10.0.0.5"));
    assert!(reverse_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn strict_mode_turns_degradations_into_errors() {
    let names = FakeNames::new().entry("srv1", "srv1.corp.example.com", &["10.0.0.5"]);

    let resolver = resolver(
        names,
        FakePinger::silent(),
        FakeManagement::unavailable(),
        FakeExecutor::unavailable(),
        FakeEnvironment::windows("WS01", None),
        Config {
            strict: true,
            ..Config::default()
        },
    );

    let error = resolver.resolve("srv1").await.unwrap_err();

    assert!(!error.is_fatal());
    assert!(matches!(error, ResolveError::Reachability { .. }));
}

/// Disjoint-domain setup: the host reports membership in `corp.local` while
/// its DNS suffix is `dns.example.net`. The two must never be conflated and
/// the full computer name is built from the suffix.
#[tokio::test]
async fn remote_self_report_overrides_dns() {
    let names = FakeNames::new()
        .entry("sql01", "sql01.dns.example.net", &["10.0.0.7"])
        .entry("SQL01.dns.example.net", "sql01.dns.example.net", &["10.0.0.7"]);

    let management = FakeManagement::reporting("SQL01", Some("corp.local"));
    let management_queried = management.queried.clone();
    let executor = FakeExecutor::reporting("dns.example.net");
    let executor_queried = executor.queried.clone();

    let resolver = resolver(
        names,
        FakePinger::answering(&["10.0.0.7"]),
        management,
        executor,
        FakeEnvironment::windows("WS01", None),
        Config::default(),
    );

    let record = resolver.resolve("sql01").await.unwrap();

    assert_eq!(record.computer_name, "SQL01");
    assert_eq!(record.dns_host_name, "SQL01");
    assert_eq!(record.dns_domain.as_deref(), Some("dns.example.net"));
    assert_eq!(record.domain.as_deref(), Some("corp.local"));
    assert_eq!(record.fqdn, "SQL01.corp.local");
    assert_eq!(record.full_computer_name, "SQL01.dns.example.net");
    assert_eq!(
        record.dns_host_entry.as_deref(),
        Some("sql01.dns.example.net")
    );

    // Both remote calls target the name that actually resolved, not the
    // rewritten one.
    assert_eq!(
        *management_queried.lock().unwrap(),
        vec!["sql01.dns.example.net".to_string()]
    );
    assert_eq!(
        *executor_queried.lock().unwrap(),
        vec!["sql01.dns.example.net".to_string()]
    );
}

#[tokio::test]
async fn workgroup_hosts_have_no_directory_domain() {
    let names = FakeNames::new()
        .entry("srv9", "srv9.corp.example.com", &["10.0.0.9"])
        .entry("SRV9.corp.example.com", "srv9.corp.example.com", &["10.0.0.9"]);

    let resolver = resolver(
        names,
        FakePinger::answering(&["10.0.0.9"]),
        FakeManagement::reporting("SRV9", None),
        FakeExecutor::unavailable(),
        FakeEnvironment::windows("WS01", None),
        Config::default(),
    );

    let record = resolver.resolve("srv9").await.unwrap();

    // The self-report is authoritative about the absence of a domain.
    assert_eq!(record.domain, None);
    assert_eq!(record.dns_domain.as_deref(), Some("corp.example.com"));
    assert_eq!(record.fqdn, "SRV9");
    assert_eq!(record.full_computer_name, "SRV9.corp.example.com");
}

#[tokio::test]
async fn final_validation_failure_still_emits_the_record() {
    let names = FakeNames::new().entry("srv1", "srv1.corp.example.com", &["10.0.0.5"]);

    let resolver = resolver(
        names,
        FakePinger::answering(&["10.0.0.5"]),
        FakeManagement::unavailable(),
        FakeExecutor::unavailable(),
        FakeEnvironment::windows("WS01", None),
        Config::default(),
    );

    let record = resolver.resolve("srv1").await.unwrap();

    assert_eq!(record.dns_host_entry, None);
    assert_eq!(record.full_computer_name, "srv1.corp.example.com");
    assert_eq!(record.fqdn, "srv1.corp.example.com");
}

#[tokio::test]
async fn strict_mode_escalates_final_validation() {
    let names = FakeNames::new().entry("srv1", "srv1.corp.example.com", &["10.0.0.5"]);

    let resolver = resolver(
        names,
        FakePinger::answering(&["10.0.0.5"]),
        FakeManagement::unavailable(),
        FakeExecutor::unavailable(),
        FakeEnvironment::windows("WS01", None),
        Config {
            strict: true,
            ..Config::default()
        },
    );

    let error = resolver.resolve("srv1").await.unwrap_err();

    assert!(!error.is_fatal());
    assert!(matches!(error, ResolveError::FinalValidation { .. }));
}

/// On platforms without a remote-management stack the probing stages are
/// skipped entirely; the record is DNS-derived but still validated.
#[tokio::test]
async fn posix_platforms_resolve_from_dns_alone() {
    let names = FakeNames::new()
        .entry("srv1", "srv1.corp.example.com", &["10.0.0.5"])
        .entry("srv1.corp.example.com", "srv1.corp.example.com", &["10.0.0.5"]);
    let forward_calls = names.forward_calls.clone();

    let pinger = FakePinger::answering(&["10.0.0.5"]);
    let probes = pinger.probes.clone();
    let management = FakeManagement::reporting("SRV1", Some("corp.local"));
    let management_queried = management.queried.clone();
    let executor = FakeExecutor::reporting("corp.example.com");
    let executor_queried = executor.queried.clone();

    let resolver = resolver(
        names,
        pinger,
        management,
        executor,
        FakeEnvironment::posix("ws01"),
        Config::default(),
    );

    let record = resolver.resolve("srv1").await.unwrap();

    assert!(probes.lock().unwrap().is_empty());
    assert!(management_queried.lock().unwrap().is_empty());
    assert!(executor_queried.lock().unwrap().is_empty());

    assert_eq!(record.computer_name, "srv1");
    assert_eq!(record.domain.as_deref(), Some("corp.example.com"));
    assert_eq!(
        *forward_calls.lock().unwrap(),
        vec!["srv1".to_string(), "srv1.corp.example.com".to_string()]
    );
}

/// An address input with no pointer record resolves to itself: no domain is
/// invented for it, not even from the caller's environment.
#[tokio::test]
async fn ip_literals_resolve_without_a_domain() {
    let names =
        FakeNames::new().entry("192.168.1.10", "192.168.1.10", &["192.168.1.10"]);

    let resolver = resolver(
        names,
        FakePinger::silent(),
        FakeManagement::unavailable(),
        FakeExecutor::unavailable(),
        FakeEnvironment::windows("WS01", Some("corp.local")),
        Config::default(),
    );

    let record = resolver.resolve("192.168.1.10").await.unwrap();

    assert_eq!(record.computer_name, "192.168.1.10");
    assert_eq!(record.ip_address, addr("192.168.1.10"));
    assert_eq!(record.dns_domain, None);
    assert_eq!(record.domain, None);
    assert_eq!(record.fqdn, "192.168.1.10");
    assert_eq!(record.full_computer_name, "192.168.1.10");
    assert_eq!(record.dns_host_entry.as_deref(), Some("192.168.1.10"));
}

#[tokio::test]
async fn local_aliases_resolve_the_callers_machine() {
    let names = FakeNames::new()
        .entry("WS01", "WS01", &["127.0.0.1"])
        .entry("WS01.corp.example.com", "ws01.corp.example.com", &["127.0.0.1"]);

    let resolver = resolver(
        names,
        FakePinger::answering(&["127.0.0.1"]),
        FakeManagement::unavailable(),
        FakeExecutor::unavailable(),
        FakeEnvironment::windows("WS01", Some("CORP.EXAMPLE.COM")),
        Config::default(),
    );

    let record = resolver.resolve("localhost").await.unwrap();

    assert_eq!(record.input_name, "localhost");
    assert_eq!(record.computer_name, "WS01");
    assert_eq!(record.dns_domain.as_deref(), Some("corp.example.com"));
    assert_eq!(record.fqdn, "WS01.corp.example.com");
    assert_eq!(record.full_computer_name, "WS01.corp.example.com");
}

#[tokio::test]
async fn resolution_is_idempotent() {
    let names = FakeNames::new()
        .entry("srv1", "srv1.corp.example.com", &["10.0.0.5"])
        .entry("srv1.corp.example.com", "srv1.corp.example.com", &["10.0.0.5"]);

    let resolver = resolver(
        names,
        FakePinger::answering(&["10.0.0.5"]),
        FakeManagement::unavailable(),
        FakeExecutor::unavailable(),
        FakeEnvironment::windows("WS01", None),
        Config::default(),
    );

    let first = resolver.resolve("srv1").await.unwrap();
    let second = resolver.resolve("srv1").await.unwrap();

    assert_eq!(first, second);
}
