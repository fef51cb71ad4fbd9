// Gateway liveness via the sysinfo process table

use crate::config::GatewayConfig;
use crate::models::GatewayStatus;
use std::sync::Arc;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};
use tracing::instrument;

pub struct ProcessRepo {
    sys: Arc<std::sync::Mutex<System>>,
    matcher: Arc<CommandLineMatcher>,
}

/// Matches a joined command line against the two configured substrings.
#[derive(Debug, Clone)]
pub struct CommandLineMatcher {
    process_match: String,
    subcommand_match: String,
}

impl CommandLineMatcher {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            process_match: config.process_match.clone(),
            subcommand_match: config.subcommand_match.clone(),
        }
    }

    pub fn matches(&self, cmdline: &str) -> bool {
        cmdline.contains(&self.process_match) && cmdline.contains(&self.subcommand_match)
    }

    /// First `(pid, cmdline)` pair that matches, in iteration order.
    pub fn find<I, S>(&self, processes: I) -> GatewayStatus
    where
        I: IntoIterator<Item = (u32, S)>,
        S: AsRef<str>,
    {
        processes
            .into_iter()
            .find(|(_, cmdline)| self.matches(cmdline.as_ref()))
            .map(|(pid, _)| GatewayStatus::found(pid))
            .unwrap_or_else(GatewayStatus::not_found)
    }
}

impl ProcessRepo {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            sys: Arc::new(std::sync::Mutex::new(System::new())),
            matcher: Arc::new(CommandLineMatcher::new(config)),
        }
    }

    /// Scans every process, threads excluded. Entries that vanished or whose command line
    /// is unreadable come back with an empty cmd and simply never match.
    #[instrument(skip(self), fields(repo = "process", operation = "gateway_status"))]
    pub async fn gateway_status(&self) -> GatewayStatus {
        let sys = self.sys.clone();
        let matcher = self.matcher.clone();
        let result = tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_processes_specifics(
                ProcessesToUpdate::All,
                true,
                ProcessRefreshKind::nothing().with_cmd(UpdateKind::Always),
            );
            // On Linux the table also lists each process's threads under their own TIDs,
            // all sharing the parent's command line; only real processes may match.
            let processes = sys
                .processes()
                .iter()
                .filter(|(_, process)| process.thread_kind().is_none());
            let status = matcher.find(processes.map(|(pid, process)| {
                let cmdline = process
                    .cmd()
                    .iter()
                    .map(|arg| arg.to_string_lossy())
                    .collect::<Vec<_>>()
                    .join(" ");
                (pid.as_u32(), cmdline)
            }));
            Ok::<_, anyhow::Error>(status)
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))
        .and_then(|r| r);

        match result {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(error = %e, "process scan failed; reporting gateway as stopped");
                GatewayStatus::not_found()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> CommandLineMatcher {
        CommandLineMatcher::new(&GatewayConfig::default())
    }

    #[test]
    fn matches_requires_both_substrings() {
        let m = matcher();
        assert!(m.matches("node /usr/lib/openclaw/cli.js gateway --port 18789"));
        assert!(!m.matches("node /usr/lib/openclaw/cli.js agent"));
        assert!(!m.matches("nginx: gateway worker"));
        assert!(!m.matches(""));
    }

    #[test]
    fn find_returns_first_match() {
        let procs = vec![
            (10, "bash"),
            (42, "openclaw gateway"),
            (43, "openclaw gateway --verbose"),
        ];
        assert_eq!(matcher().find(procs), GatewayStatus::found(42));
    }

    #[tokio::test]
    async fn scan_reports_own_process_id_not_a_thread() {
        let exe = std::env::args().next().expect("argv[0]");
        let repo = ProcessRepo::new(&GatewayConfig {
            process_match: exe.clone(),
            subcommand_match: exe,
        });
        // Extra threads share this process's command line.
        let workers: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| std::thread::sleep(std::time::Duration::from_millis(500)))
            })
            .collect();
        for _ in 0..5 {
            let status = repo.gateway_status().await;
            assert_eq!(status.pid, Some(std::process::id()));
        }
        for w in workers {
            w.join().unwrap();
        }
    }

    #[test]
    fn find_without_match_is_not_running() {
        let procs = vec![(1, "init"), (2, "openclaw agent"), (3, "gateway")];
        let status = matcher().find(procs);
        assert!(!status.running);
        assert_eq!(status.pid, None);
    }
}
