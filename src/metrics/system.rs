//! System metrics collection
//!
//! Collects process-level metrics like memory and CPU time using sysinfo.
//! A background task periodically refreshes these metrics.

use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};
use sysinfo::{Pid, ProcessesToUpdate, System};
use tokio::time::{Duration, interval};

use super::MetricsRecorder;

/// Cached system info for metrics collection
static SYSTEM: Lazy<Mutex<System>> = Lazy::new(|| Mutex::new(System::new()));

/// Spawn a background task that periodically updates system metrics.
///
/// Should be called once during server startup. An interval of zero
/// disables the task; the scrape handler still refreshes on demand.
pub fn spawn_system_metrics_updater(metrics: Arc<dyn MetricsRecorder>, interval_secs: u64) {
    if interval_secs == 0 {
        tracing::debug!("System metrics updater disabled");
        return;
    }

    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(interval_secs));
        loop {
            ticker.tick().await;
            update_system_metrics(metrics.as_ref());
        }
    });
}

/// Update system metrics (memory and CPU time)
pub fn update_system_metrics(metrics: &dyn MetricsRecorder) {
    let pid = Pid::from_u32(std::process::id());

    let mut sys = match SYSTEM.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("System metrics mutex was poisoned, recovering");
            poisoned.into_inner()
        }
    };

    // Refresh only the current process
    sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

    if let Some(process) = sys.process(pid) {
        metrics.set_process_memory_bytes("rss", process.memory() as f64);
        metrics.set_process_memory_bytes("virtual", process.virtual_memory() as f64);

        // CPU time (accumulated, in milliseconds -> convert to seconds)
        let cpu_time_seconds = process.accumulated_cpu_time() as f64 / 1000.0;
        metrics.set_process_cpu_seconds(cpu_time_seconds);
    }
}
