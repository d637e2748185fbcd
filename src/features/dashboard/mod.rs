//! Dashboard analytics over stored content
//!
//! Every endpoint takes an optional `uploaded_by` filter.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/dashboard/summary` | Totals, averages, content types |
//! | GET | `/api/dashboard/trends` | Daily trends and slope |
//! | GET | `/api/dashboard/trends/analysis` | Direction, patterns, correlations, anomalies |
//! | GET | `/api/dashboard/verification-summary` | Counts per assessment band |
//! | GET | `/api/dashboard/third-party-stats` | Fact-check verdicts per provider |
//! | GET | `/api/dashboard/correlation` | Score vs deepfake probability |
//! | GET | `/api/dashboard/insights` | Rule-based insights |
//! | GET | `/api/dashboard/custom` | Selected widgets with a grid layout |
//! | GET | `/api/dashboard/export` | JSON or CSV download of every section |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::DashboardService;
