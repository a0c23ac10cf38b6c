//! # Remote Management Bridge
//!
//! Queries a target host's self-reported identity through PowerShell
//! remoting. Only meaningful on Windows-like platforms; elsewhere the
//! channel reports itself unavailable and the pipeline keeps its
//! DNS-derived values.

use anyhow::{Context, bail, ensure};
use async_trait::async_trait;
use tokio::process::Command;

use identr_common::credential::Credential;
use identr_common::record::SystemIdentity;
use identr_common::sources::{ManagementQuery, RemoteExecutor};

/// The remote password travels to the child process through this variable,
/// never through argv.
const PASSWORD_VAR: &str = "IDENTR_REMOTE_PASSWORD";

/// `ManagementQuery` and `RemoteExecutor` over `powershell.exe`.
#[derive(Clone)]
pub struct ShellManagement;

impl ShellManagement {
    async fn run_probe(
        &self,
        script: String,
        credential: Option<&Credential>,
    ) -> anyhow::Result<String> {
        if cfg!(not(target_os = "windows")) {
            bail!("remote management requires a Windows-like environment");
        }

        let mut command = Command::new("powershell");
        command.args(["-NoProfile", "-NonInteractive", "-Command", &script]);
        if let Some(credential) = credential {
            command.env(PASSWORD_VAR, &credential.password);
        }

        let output = command.output().await.context("spawning powershell")?;
        ensure!(
            output.status.success(),
            "powershell exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn credential_clause(credential: Option<&Credential>) -> String {
        match credential {
            Some(credential) => format!(
                " -Credential (New-Object System.Management.Automation.PSCredential({}, \
                 (ConvertTo-SecureString $env:{PASSWORD_VAR} -AsPlainText -Force)))",
                ps_quote(&credential.username)
            ),
            None => String::new(),
        }
    }
}

#[async_trait]
impl ManagementQuery for ShellManagement {
    async fn system_identity(
        &self,
        host: &str,
        credential: Option<&Credential>,
    ) -> anyhow::Result<SystemIdentity> {
        let script = format!(
            "$cs = Get-CimInstance -ClassName Win32_ComputerSystem -ComputerName {}{}; \
             Write-Output \"$($cs.DNSHostName)|$($cs.Domain)|$($cs.PartOfDomain)\"",
            ps_quote(host),
            Self::credential_clause(credential)
        );

        let line = self.run_probe(script, credential).await?;
        parse_identity(&line)
    }
}

#[async_trait]
impl RemoteExecutor for ShellManagement {
    async fn dns_suffix(
        &self,
        host: &str,
        credential: Option<&Credential>,
    ) -> anyhow::Result<String> {
        let script = format!(
            "Invoke-Command -ComputerName {}{} -ScriptBlock {{ \
             [System.Net.NetworkInformation.IPGlobalProperties]::GetIPGlobalProperties().DomainName }}",
            ps_quote(host),
            Self::credential_clause(credential)
        );

        let suffix = self.run_probe(script, credential).await?;
        ensure!(!suffix.is_empty(), "'{host}' reports no DNS suffix");

        Ok(suffix)
    }
}

/// Single-quotes a value for PowerShell, doubling embedded quotes.
fn ps_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Parses the `hostname|domain|joined` line the identity script prints.
fn parse_identity(line: &str) -> anyhow::Result<SystemIdentity> {
    let mut fields = line.trim().split('|');

    let hostname = fields
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .context("identity query returned no hostname")?;
    let domain = fields.next().map(str::trim).unwrap_or_default();
    let joined = fields
        .next()
        .map(|flag| flag.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    // Win32_ComputerSystem reports the workgroup name in Domain when the
    // host is not joined; only joined hosts have a directory domain.
    Ok(SystemIdentity {
        hostname: hostname.to_string(),
        domain: (joined && !domain.is_empty()).then(|| domain.to_string()),
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
