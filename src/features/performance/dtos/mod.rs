mod performance_dto;

pub use performance_dto::{
    AlertsDto, ClearedProfilesDto, ConnectionStatsDto, DatabaseStatsDto, HistoryQuery,
    ProfileListDto, ProfileQuery, ResourceAveragesDto, ResourceReportDto,
};
