// Dashboard HTML rendering

use chrono::{DateTime, Local};

use crate::config::PageConfig;
use crate::format::{escape_html, format_bytes, format_uptime};
use crate::models::{ConnectionStatus, GatewayStatus, SystemMetrics};

const RUNNING_COLOR: &str = "#00e676";
const STOPPED_COLOR: &str = "#f44336";

const STYLE: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body {
    font-family: 'Segoe UI', -apple-system, BlinkMacSystemFont, sans-serif;
    background: linear-gradient(135deg, #0f0c29, #302b63, #24243e);
    min-height: 100vh;
    color: #e0e0e0;
    padding: 20px;
}
.container { max-width: 800px; margin: 0 auto; }
.header { text-align: center; padding: 40px 20px 30px; }
.header h1 {
    font-size: 2.2em;
    background: linear-gradient(135deg, #667eea, #764ba2);
    -webkit-background-clip: text;
    -webkit-text-fill-color: transparent;
    margin-bottom: 8px;
}
.header p { color: #9e9e9e; font-size: 0.95em; }
.cards { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; margin-top: 24px; }
.card {
    background: rgba(255,255,255,0.06);
    backdrop-filter: blur(12px);
    border: 1px solid rgba(255,255,255,0.08);
    border-radius: 16px;
    padding: 24px;
    transition: transform 0.2s, box-shadow 0.2s;
}
.card:hover { transform: translateY(-2px); box-shadow: 0 8px 32px rgba(102,126,234,0.15); }
.card-title {
    font-size: 0.85em;
    color: #9e9e9e;
    text-transform: uppercase;
    letter-spacing: 1px;
    margin-bottom: 12px;
}
.card-value { font-size: 1.4em; font-weight: 600; }
.status-dot {
    display: inline-block;
    width: 10px; height: 10px;
    border-radius: 50%;
    margin-right: 8px;
    animation: pulse 2s infinite;
}
@keyframes pulse { 0%, 100% { opacity: 1; } 50% { opacity: 0.5; } }
.card-full { grid-column: 1 / -1; }
.stats-grid { display: grid; grid-template-columns: repeat(3, 1fr); gap: 12px; margin-top: 12px; }
.stat { text-align: center; }
.stat-value { font-size: 1.6em; font-weight: 700; color: #667eea; }
.stat-label { font-size: 0.8em; color: #9e9e9e; margin-top: 4px; }
.progress-bar {
    width: 100%;
    height: 8px;
    background: rgba(255,255,255,0.1);
    border-radius: 4px;
    margin-top: 8px;
    overflow: hidden;
}
.progress-fill { height: 100%; border-radius: 4px; transition: width 0.5s; }
.footer { text-align: center; padding: 30px; color: #616161; font-size: 0.85em; }
@media (max-width: 600px) {
    .cards { grid-template-columns: 1fr; }
    .stats-grid { grid-template-columns: 1fr; }
}
"#;

/// Everything one page render needs, gathered by the handler.
#[derive(Debug, Clone)]
pub(super) struct PageData {
    pub gateway: GatewayStatus,
    pub feishu: ConnectionStatus,
    pub messages: u64,
    pub metrics: SystemMetrics,
    pub model_name: String,
    pub started_at: DateTime<Local>,
    pub generated_at: DateTime<Local>,
}

fn gateway_card(gateway: &GatewayStatus) -> (&'static str, String) {
    match gateway.pid {
        Some(pid) if gateway.running => (RUNNING_COLOR, format!("✅ Running (PID {})", pid)),
        _ => (STOPPED_COLOR, "❌ Stopped".to_string()),
    }
}

pub(super) fn render_page(config: &PageConfig, data: &PageData) -> String {
    let (gw_color, gw_text) = gateway_card(&data.gateway);
    let cpu = data.metrics.cpu_percent;
    let mem = &data.metrics.memory;
    let title = escape_html(&config.title);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<meta http-equiv="refresh" content="{refresh}">
<title>{title} · Status</title>
<style>{style}</style>
</head>
<body>
<div class="container">
    <div class="header">
        <h1>🤖 {title}</h1>
        <p>{subtitle}</p>
    </div>

    <div class="cards">
        <div class="card">
            <div class="card-title">Gateway</div>
            <div class="card-value">
                <span class="status-dot" style="background:{gw_color}"></span>
                {gw_text}
            </div>
        </div>

        <div class="card">
            <div class="card-title">Feishu connection</div>
            <div class="card-value" data-status="{feishu_status}">
                <span class="status-dot" style="background:{feishu_color}"></span>
                {feishu_text}
            </div>
        </div>

        <div class="card card-full">
            <div class="card-title">Overview</div>
            <div class="stats-grid">
                <div class="stat">
                    <div class="stat-value">{uptime}</div>
                    <div class="stat-label">Uptime</div>
                </div>
                <div class="stat">
                    <div class="stat-value">{messages}</div>
                    <div class="stat-label">Messages today</div>
                </div>
                <div class="stat">
                    <div class="stat-value">{model}</div>
                    <div class="stat-label">Model</div>
                </div>
            </div>
        </div>

        <div class="card">
            <div class="card-title">CPU usage</div>
            <div class="card-value">{cpu:.1}%</div>
            <div class="progress-bar">
                <div class="progress-fill" style="width:{cpu:.1}%;background:linear-gradient(90deg,#667eea,#764ba2)"></div>
            </div>
        </div>

        <div class="card">
            <div class="card-title">Memory</div>
            <div class="card-value">{mem_used} / {mem_total}</div>
            <div class="progress-bar">
                <div class="progress-fill" style="width:{mem_percent:.1}%;background:linear-gradient(90deg,#00e676,#00c853)"></div>
            </div>
        </div>
    </div>

    <div class="footer">
        Up since {started_at} · last updated: {generated_at} · auto-refresh {refresh}s
    </div>
</div>
</body>
</html>"#,
        refresh = config.refresh_secs,
        title = title,
        style = STYLE,
        subtitle = escape_html(&config.subtitle),
        gw_color = gw_color,
        gw_text = gw_text,
        feishu_status = data.feishu.as_str(),
        feishu_color = data.feishu.color(),
        feishu_text = data.feishu.label(),
        uptime = format_uptime(data.metrics.uptime),
        messages = data.messages,
        model = escape_html(&data.model_name),
        cpu = cpu,
        mem_used = format_bytes(mem.used),
        mem_total = format_bytes(mem.total),
        mem_percent = mem.percent,
        started_at = data.started_at.format("%Y-%m-%d %H:%M:%S"),
        generated_at = data.generated_at.format("%Y-%m-%d %H:%M:%S"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MemoryStats;
    use chrono::TimeZone;
    use std::time::Duration;

    fn sample(gateway: GatewayStatus, feishu: ConnectionStatus) -> PageData {
        PageData {
            gateway,
            feishu,
            messages: 7,
            metrics: SystemMetrics {
                cpu_percent: 12.34,
                memory: MemoryStats::from_total_available(2048, 512),
                uptime: Duration::from_secs(3661),
            },
            model_name: "<script>".into(),
            started_at: Local.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
            generated_at: Local::now(),
        }
    }

    #[test]
    fn renders_refresh_and_values() {
        let html = render_page(
            &PageConfig::default(),
            &sample(GatewayStatus::found(4242), ConnectionStatus::Connected),
        );
        assert!(html.contains(r#"<meta http-equiv="refresh" content="30">"#));
        assert!(html.contains("✅ Running (PID 4242)"));
        assert!(html.contains(ConnectionStatus::Connected.label()));
        assert!(html.contains("1:01:01"));
        assert!(html.contains("12.3%"));
        assert!(html.contains("1.5 KB / 2.0 KB"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Up since 2026-01-02 03:04:05"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn stopped_gateway_uses_stopped_color() {
        let html = render_page(
            &PageConfig::default(),
            &sample(GatewayStatus::not_found(), ConnectionStatus::Unknown),
        );
        assert!(html.contains("❌ Stopped"));
        assert!(html.contains(STOPPED_COLOR));
        assert!(html.contains(r#"data-status="unknown""#));
    }
}
