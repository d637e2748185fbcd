mod performance_handler;

pub use performance_handler::{
    __path_clear_profiles, __path_get_alerts, __path_get_connection_stats,
    __path_get_database_stats, __path_get_history, __path_get_process_metrics, __path_get_profile,
    __path_get_report, __path_get_system_metrics, __path_list_profiles, clear_profiles,
    get_alerts, get_connection_stats, get_database_stats, get_history, get_process_metrics,
    get_profile, get_report, get_system_metrics, list_profiles,
};
