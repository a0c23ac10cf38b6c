//! # Env Command

use colored::Colorize;

use identr_common::sources::LocalEnvironment;
use identr_probes::local::LocalSystem;

use crate::terminal::print;

const KEYS: [&str; 3] = ["Machine", "DNS domain", "Platform"];

pub fn env() -> anyhow::Result<()> {
    let system = LocalSystem;

    let machine = system.machine_name()?;
    let domain = system.dns_domain();
    let platform = if system.is_windows_like() {
        "windows-like"
    } else {
        "posix"
    };

    print::set_key_width(&KEYS);
    print::aligned_line(KEYS[0], machine);
    match domain {
        Some(domain) => print::aligned_line(KEYS[1], domain),
        None => print::aligned_line(KEYS[1], "not configured".dimmed()),
    }
    print::aligned_line(KEYS[2], platform);
    print::end_of_program();

    Ok(())
}
