//! Prometheus counters for store mutations and background processing.

use metrics::{counter, describe_counter};
use tracing::debug;

// === Metric Name Constants ===

/// Items created counter metric name.
pub const METRIC_ITEMS_CREATED: &str = "items_created_total";
/// Items updated counter metric name.
pub const METRIC_ITEMS_UPDATED: &str = "items_updated_total";
/// Items deleted counter metric name.
pub const METRIC_ITEMS_DELETED: &str = "items_deleted_total";
/// Users upserted counter metric name.
pub const METRIC_USERS_UPSERTED: &str = "users_upserted_total";
/// Users deleted counter metric name.
pub const METRIC_USERS_DELETED: &str = "users_deleted_total";
/// WebSocket connections counter metric name.
pub const METRIC_WS_CONNECTIONS: &str = "ws_connections_total";
/// Processing tasks scheduled counter metric name.
pub const METRIC_PROCESSING_SCHEDULED: &str = "processing_tasks_scheduled_total";
/// Processing tasks completed counter metric name.
pub const METRIC_PROCESSING_COMPLETED: &str = "processing_tasks_completed_total";
/// Processing tasks skipped counter metric name.
pub const METRIC_PROCESSING_SKIPPED: &str = "processing_tasks_skipped_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(METRIC_ITEMS_CREATED, "Total number of items created");
    describe_counter!(METRIC_ITEMS_UPDATED, "Total number of items updated");
    describe_counter!(METRIC_ITEMS_DELETED, "Total number of items deleted");
    describe_counter!(
        METRIC_USERS_UPSERTED,
        "Total number of users created or overwritten"
    );
    describe_counter!(METRIC_USERS_DELETED, "Total number of users deleted");
    describe_counter!(
        METRIC_WS_CONNECTIONS,
        "Total number of WebSocket connections accepted"
    );
    describe_counter!(
        METRIC_PROCESSING_SCHEDULED,
        "Total number of background processing tasks scheduled"
    );
    describe_counter!(
        METRIC_PROCESSING_COMPLETED,
        "Total number of background processing tasks that marked their item"
    );
    describe_counter!(
        METRIC_PROCESSING_SKIPPED,
        "Total number of background processing tasks whose item was gone"
    );

    debug!("Metrics initialized");
}

/// Increment items created counter.
pub fn inc_items_created() {
    counter!(METRIC_ITEMS_CREATED).increment(1);
}

/// Increment items updated counter.
pub fn inc_items_updated() {
    counter!(METRIC_ITEMS_UPDATED).increment(1);
}

/// Increment items deleted counter.
pub fn inc_items_deleted() {
    counter!(METRIC_ITEMS_DELETED).increment(1);
}

/// Increment users upserted counter.
pub fn inc_users_upserted() {
    counter!(METRIC_USERS_UPSERTED).increment(1);
}

/// Increment users deleted counter.
pub fn inc_users_deleted() {
    counter!(METRIC_USERS_DELETED).increment(1);
}

/// Increment WebSocket connections counter.
pub fn inc_ws_connections() {
    counter!(METRIC_WS_CONNECTIONS).increment(1);
}

/// Increment processing tasks scheduled counter.
pub fn inc_processing_scheduled() {
    counter!(METRIC_PROCESSING_SCHEDULED).increment(1);
}

/// Increment processing tasks completed counter.
pub fn inc_processing_completed() {
    counter!(METRIC_PROCESSING_COMPLETED).increment(1);
}

/// Increment processing tasks skipped counter.
pub fn inc_processing_skipped() {
    counter!(METRIC_PROCESSING_SKIPPED).increment(1);
}
