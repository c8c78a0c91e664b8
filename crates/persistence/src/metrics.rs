//! Database metrics.

use metrics::{counter, gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

/// Records the duration of one named query.
///
/// ```ignore
/// let timer = QueryTimer::new("get_document");
/// let row = sqlx::query_as::<_, DocumentEntity>(...).fetch_optional(&pool).await;
/// timer.record();
/// ```
pub struct QueryTimer {
    query_name: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query_name: &'static str) -> Self {
        Self {
            query_name,
            start: Instant::now(),
        }
    }

    pub fn record(self) {
        histogram!("database_query_duration_seconds", "query" => self.query_name)
            .record(self.start.elapsed().as_secs_f64());
    }
}

/// Counts a document write by collection and operation.
pub fn record_document_write(collection: &'static str, operation: &'static str) {
    counter!(
        "document_writes_total",
        "collection" => collection,
        "operation" => operation
    )
    .increment(1);
}

/// Connection pool gauges, sampled when metrics are scraped.
pub fn record_pool_metrics(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();

    gauge!("database_connections_active").set(size.saturating_sub(idle) as f64);
    gauge!("database_connections_idle").set(idle as f64);
    gauge!("database_connections_total").set(size as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_timer_keeps_name() {
        let timer = QueryTimer::new("get_document");
        assert_eq!(timer.query_name, "get_document");
        timer.record();
    }

    #[test]
    fn test_document_write_without_recorder() {
        record_document_write("pets", "insert");
    }
}
