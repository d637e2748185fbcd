use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::performance::dtos::{ConnectionStatsDto, DatabaseStatsDto};
use crate::shared::stats::round2;

#[derive(sqlx::FromRow)]
struct DatabaseActivityRow {
    database_name: String,
    active_backends: i64,
    xact_commit: i64,
    xact_rollback: i64,
    blks_read: i64,
    blks_hit: i64,
    tup_returned: i64,
    tup_fetched: i64,
    tup_inserted: i64,
    tup_updated: i64,
    tup_deleted: i64,
    deadlocks: i64,
    size_bytes: i64,
}

/// Connection pool and server-side statistics for the application database
pub struct DatabaseMonitor {
    pool: PgPool,
}

impl DatabaseMonitor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn connection_stats(&self) -> ConnectionStatsDto {
        connection_stats(
            self.pool.size(),
            self.pool.num_idle(),
            self.pool.options().get_max_connections(),
        )
    }

    pub async fn database_stats(&self) -> Result<DatabaseStatsDto> {
        let row = sqlx::query_as::<_, DatabaseActivityRow>(
            r#"
            SELECT
                datname::TEXT AS database_name,
                numbackends::BIGINT AS active_backends,
                xact_commit,
                xact_rollback,
                blks_read,
                blks_hit,
                tup_returned,
                tup_fetched,
                tup_inserted,
                tup_updated,
                tup_deleted,
                deadlocks,
                pg_database_size(datname) AS size_bytes
            FROM pg_stat_database
            WHERE datname = current_database()
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to read pg_stat_database: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("No statistics for the current database".to_string()))?;

        Ok(DatabaseStatsDto {
            cache_hit_ratio: cache_hit_ratio(row.blks_hit, row.blks_read),
            database_name: row.database_name,
            active_backends: row.active_backends,
            transactions_committed: row.xact_commit,
            transactions_rolled_back: row.xact_rollback,
            blocks_read: row.blks_read,
            blocks_hit: row.blks_hit,
            rows_returned: row.tup_returned,
            rows_fetched: row.tup_fetched,
            rows_inserted: row.tup_inserted,
            rows_updated: row.tup_updated,
            rows_deleted: row.tup_deleted,
            deadlocks: row.deadlocks,
            size_mb: round2(row.size_bytes as f64 / (1024.0 * 1024.0)),
            pool: self.connection_stats(),
        })
    }
}

fn connection_stats(size: u32, idle: usize, max: u32) -> ConnectionStatsDto {
    let active = (size as usize).saturating_sub(idle) as u32;
    let utilization_percent = if max == 0 {
        0.0
    } else {
        round2(active as f64 / max as f64 * 100.0)
    };

    ConnectionStatsDto {
        size,
        idle: idle as u32,
        active,
        max_connections: max,
        utilization_percent,
    }
}

/// Share of block reads served from shared buffers
fn cache_hit_ratio(hit: i64, read: i64) -> Option<f64> {
    let total = hit + read;
    (total > 0).then(|| round2(hit as f64 / total as f64))
}
