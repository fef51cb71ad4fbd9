// Host CPU/memory metrics and dashboard uptime

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStats {
    pub used: u64,
    pub total: u64,
    pub percent: f64,
}

impl MemoryStats {
    /// Builds stats from total and available bytes; `used` never exceeds `total`.
    pub fn from_total_available(total: u64, available: u64) -> Self {
        let used = total.saturating_sub(available);
        let percent = if total > 0 {
            (used as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        Self {
            used,
            total,
            percent: percent.clamp(0.0, 100.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMetrics {
    pub cpu_percent: f64,
    pub memory: MemoryStats,
    pub uptime: Duration,
}

impl SystemMetrics {
    /// Placeholder used when sysinfo cannot be read; keeps the real uptime.
    pub fn unavailable(uptime: Duration) -> Self {
        Self {
            cpu_percent: 0.0,
            memory: MemoryStats::from_total_available(0, 0),
            uptime,
        }
    }
}

/// Moment the dashboard process started. Captured once in `main` and shared read-only.
#[derive(Debug, Clone, Copy)]
pub struct StartTime {
    instant: Instant,
    wall: DateTime<Local>,
}

impl StartTime {
    pub fn now() -> Self {
        Self {
            instant: Instant::now(),
            wall: Local::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.instant.elapsed()
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.wall
    }
}
