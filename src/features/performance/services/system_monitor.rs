use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use sysinfo::{Disks, Networks, Pid, ProcessesToUpdate, System};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::features::performance::dtos::{ResourceAveragesDto, ResourceReportDto};
use crate::features::performance::models::{
    CpuMetrics, DiskMetrics, MemoryMetrics, MonitoringPoint, NetworkMetrics, PerformanceAlert,
    ProcessMemory, ProcessMetrics, SystemMetrics,
};
use crate::shared::stats::round2;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
const REPORT_WINDOW: usize = 10;

/// Host and process sampler with a bounded in-memory history
///
/// CPU figures are deltas between refreshes, so the very first reading
/// after startup reports 0%.
pub struct SystemMonitor {
    system: Mutex<System>,
    history: RwLock<VecDeque<MonitoringPoint>>,
    history_size: usize,
    pid: Pid,
}

impl SystemMonitor {
    pub fn new(history_size: usize) -> Self {
        Self {
            system: Mutex::new(System::new()),
            history: RwLock::new(VecDeque::with_capacity(history_size.min(1024))),
            history_size: history_size.max(1),
            pid: Pid::from_u32(std::process::id()),
        }
    }

    pub async fn system_metrics(&self) -> SystemMetrics {
        let mut system = self.system.lock().await;
        system.refresh_cpu_all();
        system.refresh_memory();

        let cpu = CpuMetrics {
            percent: round2(system.global_cpu_usage() as f64),
            count: system.cpus().len(),
            frequency_mhz: system.cpus().first().map(|c| c.frequency()).unwrap_or(0),
        };

        let memory = MemoryMetrics {
            total_gb: gb(system.total_memory()),
            available_gb: gb(system.available_memory()),
            used_gb: gb(system.used_memory()),
            percent: percent(
                system.total_memory().saturating_sub(system.available_memory()),
                system.total_memory(),
            ),
            swap_percent: percent(system.used_swap(), system.total_swap()),
        };
        drop(system);

        SystemMetrics {
            timestamp: Utc::now(),
            cpu,
            memory,
            disk: root_disk(),
            network: network_totals(),
        }
    }

    pub async fn process_metrics(&self) -> ProcessMetrics {
        let mut system = self.system.lock().await;
        system.refresh_memory();
        system.refresh_processes(ProcessesToUpdate::Some(&[self.pid]), true);
        let total_memory = system.total_memory();

        match system.process(self.pid) {
            Some(process) => ProcessMetrics {
                timestamp: Utc::now(),
                pid: self.pid.as_u32(),
                name: process.name().to_string_lossy().into_owned(),
                status: process.status().to_string(),
                cpu_percent: round2(process.cpu_usage() as f64),
                memory_percent: percent(process.memory(), total_memory),
                memory_info: ProcessMemory {
                    rss_mb: mb(process.memory()),
                    vms_mb: mb(process.virtual_memory()),
                },
                num_threads: process.tasks().map(|tasks| tasks.len()),
            },
            None => ProcessMetrics {
                timestamp: Utc::now(),
                pid: self.pid.as_u32(),
                name: String::new(),
                status: "unknown".to_string(),
                cpu_percent: 0.0,
                memory_percent: 0.0,
                memory_info: ProcessMemory {
                    rss_mb: 0.0,
                    vms_mb: 0.0,
                },
                num_threads: None,
            },
        }
    }

    pub async fn alerts(&self) -> Vec<PerformanceAlert> {
        PerformanceAlert::evaluate(&self.system_metrics().await)
    }

    /// Take one sample and append it to the history
    pub async fn sample(&self) -> MonitoringPoint {
        let point = MonitoringPoint {
            timestamp: Utc::now(),
            system: self.system_metrics().await,
            process: self.process_metrics().await,
        };
        self.push(point.clone()).await;
        point
    }

    async fn push(&self, point: MonitoringPoint) {
        let mut history = self.history.write().await;
        history.push_back(point);
        while history.len() > self.history_size {
            history.pop_front();
        }
    }

    /// Most recent `limit` points, oldest first
    pub async fn history(&self, limit: usize) -> Vec<MonitoringPoint> {
        let history = self.history.read().await;
        let skip = history.len().saturating_sub(limit);
        history.iter().skip(skip).cloned().collect()
    }

    pub async fn report(&self) -> ResourceReportDto {
        let (averages, data_points_count) = {
            let history = self.history.read().await;
            let skip = history.len().saturating_sub(REPORT_WINDOW);
            let recent: Vec<&MonitoringPoint> = history.iter().skip(skip).collect();
            (averages(&recent), history.len())
        };

        let current_metrics = self.system_metrics().await;
        let alerts = PerformanceAlert::evaluate(&current_metrics);

        ResourceReportDto {
            generated_at: Utc::now(),
            process_metrics: self.process_metrics().await,
            current_metrics,
            averages,
            alerts,
            data_points_count,
        }
    }

    /// Sample every `interval` until the task is aborted
    pub fn spawn_sampler(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        info!(
            "Starting system monitoring with {}s interval",
            interval.as_secs()
        );
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let point = self.sample().await;
                debug!(
                    "Sampled cpu={}% memory={}% disk={}%",
                    point.system.cpu.percent, point.system.memory.percent, point.system.disk.percent
                );
            }
        })
    }
}

fn averages(points: &[&MonitoringPoint]) -> Option<ResourceAveragesDto> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let avg = |f: fn(&SystemMetrics) -> f64| round2(points.iter().map(|p| f(&p.system)).sum::<f64>() / n);

    Some(ResourceAveragesDto {
        cpu_percent: avg(|s| s.cpu.percent),
        memory_percent: avg(|s| s.memory.percent),
        disk_percent: avg(|s| s.disk.percent),
        sample_size: points.len(),
    })
}

fn root_disk() -> DiskMetrics {
    let disks = Disks::new_with_refreshed_list();
    let root = disks
        .list()
        .iter()
        .find(|d| d.mount_point() == Path::new("/"))
        .or_else(|| disks.list().first());

    let (total, free) = root
        .map(|d| (d.total_space(), d.available_space()))
        .unwrap_or((0, 0));
    let used = total.saturating_sub(free);

    DiskMetrics {
        total_gb: gb(total),
        used_gb: gb(used),
        free_gb: gb(free),
        percent: percent(used, total),
    }
}

fn network_totals() -> NetworkMetrics {
    let networks = Networks::new_with_refreshed_list();
    let (mut sent, mut recv, mut packets_sent, mut packets_recv) = (0u64, 0u64, 0u64, 0u64);
    for data in networks.list().values() {
        sent += data.total_transmitted();
        recv += data.total_received();
        packets_sent += data.total_packets_transmitted();
        packets_recv += data.total_packets_received();
    }

    NetworkMetrics {
        bytes_sent_mb: mb(sent),
        bytes_recv_mb: mb(recv),
        packets_sent,
        packets_recv,
    }
}

fn gb(bytes: u64) -> f64 {
    round2(bytes as f64 / BYTES_PER_GB)
}

fn mb(bytes: u64) -> f64 {
    round2(bytes as f64 / BYTES_PER_MB)
}

fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(part as f64 / total as f64 * 100.0)
}
