mod dashboard_handler;

pub use dashboard_handler::{
    __path_export_dashboard, __path_get_correlation, __path_get_custom_dashboard,
    __path_get_insights, __path_get_summary, __path_get_third_party_stats,
    __path_get_trend_analysis, __path_get_trends, __path_get_verification_summary,
    export_dashboard, get_correlation, get_custom_dashboard, get_insights, get_summary,
    get_third_party_stats, get_trend_analysis, get_trends, get_verification_summary,
};
