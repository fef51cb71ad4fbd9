// Gateway liveness, connection status and the /health payload

use serde::{Deserialize, Serialize};

/// Result of one process-table scan. `pid` is set exactly when `running` is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayStatus {
    pub running: bool,
    pub pid: Option<u32>,
}

impl GatewayStatus {
    pub fn found(pid: u32) -> Self {
        Self {
            running: true,
            pid: Some(pid),
        }
    }

    pub fn not_found() -> Self {
        Self {
            running: false,
            pid: None,
        }
    }
}

/// Heuristic state of the messaging integration; serializes to lowercase JSON (e.g. "connected").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    Reconnecting,
    Initializing,
    #[serde(other)]
    Unknown,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Reconnecting => "reconnecting",
            ConnectionStatus::Initializing => "initializing",
            ConnectionStatus::Unknown => "unknown",
        }
    }

    /// Human-readable label shown on the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "✅ Connected",
            ConnectionStatus::Reconnecting => "🔄 Reconnecting",
            ConnectionStatus::Initializing => "⏳ Initializing",
            ConnectionStatus::Unknown => "❓ Unknown",
        }
    }

    /// Indicator dot colour (CSS hex).
    pub fn color(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "#00e676",
            ConnectionStatus::Reconnecting => "#ffc107",
            ConnectionStatus::Initializing => "#2196f3",
            ConnectionStatus::Unknown => "#9e9e9e",
        }
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Ok,
    Error,
}

/// Body of GET /health.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthState,
    pub gateway: GatewayStatus,
    pub feishu: ConnectionStatus,
    /// Seconds since the dashboard started.
    pub uptime: f64,
}

impl HealthReport {
    pub fn new(gateway: GatewayStatus, feishu: ConnectionStatus, uptime: f64) -> Self {
        let status = if gateway.running {
            HealthState::Ok
        } else {
            HealthState::Error
        };
        Self {
            status,
            gateway,
            feishu,
            uptime,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthState::Ok
    }
}
