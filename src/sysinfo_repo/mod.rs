// Host CPU and memory via sysinfo

use crate::models::{MemoryStats, StartTime, SystemMetrics};
use std::sync::Arc;
use std::time::Duration;
use sysinfo::System;
use tracing::instrument;

pub struct SysinfoRepo {
    sys: Arc<std::sync::Mutex<System>>,
    cpu_sample: Duration,
}

impl SysinfoRepo {
    /// `cpu_sample` is raised to sysinfo's minimum update interval if shorter.
    pub fn new(cpu_sample: Duration) -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        sys.refresh_memory();
        Self {
            sys: Arc::new(std::sync::Mutex::new(sys)),
            cpu_sample: cpu_sample.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }

    /// Blocks for the CPU sampling window; callers wait for it.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_cpu_percent"))]
    pub async fn get_cpu_percent(&self) -> anyhow::Result<f64> {
        let sys = self.sys.clone();
        let window = self.cpu_sample;
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_cpu_usage();
            std::thread::sleep(window);
            sys.refresh_cpu_usage();
            Ok((sys.global_cpu_usage() as f64).clamp(0.0, 100.0))
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_memory_stats"))]
    pub async fn get_memory_stats(&self) -> anyhow::Result<MemoryStats> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_memory();
            Ok(MemoryStats::from_total_available(
                sys.total_memory(),
                sys.available_memory(),
            ))
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    pub async fn system_metrics(&self, started: &StartTime) -> anyhow::Result<SystemMetrics> {
        let cpu_percent = self.get_cpu_percent().await?;
        let memory = self.get_memory_stats().await?;
        Ok(SystemMetrics {
            cpu_percent,
            memory,
            uptime: started.elapsed(),
        })
    }
}
