use sqlx::{postgres::PgPoolOptions, PgPool};

/// Pool that only connects when a query actually runs; for tests that are
/// rejected before reaching the database.
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy("postgres://localhost/veritas_test")
        .unwrap()
}
