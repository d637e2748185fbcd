//! Runtime performance
//!
//! Connection pool and `pg_stat_database` figures, per-route request
//! timings gathered by [`services::profile_requests`], and host/process
//! metrics sampled into a bounded history.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/performance/db/connections` | Pool size, idle, active, utilization |
//! | GET | `/api/performance/db/stats` | Database activity counters |
//! | GET | `/api/performance/profiling/profiles` | All request profiles |
//! | GET | `/api/performance/profiling/profile?name=` | One request profile |
//! | DELETE | `/api/performance/profiling/profiles` | Clear request profiles |
//! | GET | `/api/performance/monitoring/system` | CPU, memory, disk, network |
//! | GET | `/api/performance/monitoring/process` | This process |
//! | GET | `/api/performance/monitoring/alerts` | Threshold alerts |
//! | GET | `/api/performance/monitoring/report` | Current figures with recent averages |
//! | GET | `/api/performance/monitoring/history` | Sampled history |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::{profile_requests, PerformanceService};
