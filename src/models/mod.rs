// Request-scoped status models

mod gateway;
mod system;

pub use gateway::{ConnectionStatus, GatewayStatus, HealthReport, HealthState};
pub use system::{MemoryStats, StartTime, SystemMetrics};
