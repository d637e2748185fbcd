mod dashboard_service;
mod export;
mod insights;
mod trend_analyzer;

pub use dashboard_service::DashboardService;
pub use export::to_csv;
