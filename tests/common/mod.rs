// Shared test helpers

#![allow(dead_code)]

use statuspage::config::AppConfig;
use std::path::Path;

/// Config pointing the log reader at `log_dir` and the process scan at names no process uses.
pub fn test_config(log_dir: &Path) -> AppConfig {
    let toml = format!(
        r#"
[server]
port = 7860
host = "127.0.0.1"

[gateway]
process_match = "statuspage-test-no-such-binary-7f3a9c"
subcommand_match = "gateway"

[logs]
dir = '{}'
prefix = "openclaw"
read_timeout_ms = 2000

[metrics]
cpu_sample_ms = 200

[page]
model_env = "STATUSPAGE_TEST_UNSET_MODEL_VAR"
"#,
        log_dir.display()
    );
    AppConfig::load_from_str(&toml).unwrap()
}

/// Writes today's dated log (`openclaw-YYYY-MM-DD.log`) into `dir`.
pub fn write_today_log(dir: &Path, content: &str) {
    let name = format!(
        "openclaw-{}.log",
        chrono::Local::now().date_naive().format("%Y-%m-%d")
    );
    std::fs::write(dir.join(name), content).unwrap();
}
