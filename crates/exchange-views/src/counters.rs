use metrics::{counter, describe_counter};

/// Initialize counter descriptions
pub fn init() {
    describe_counter!(
        "exchange_views_computed_total",
        "Total number of view recomputations"
    );
    describe_counter!(
        "exchange_views_cache_hits_total",
        "Total number of views served from the memo cache"
    );
    describe_counter!(
        "exchange_records_excluded_total",
        "Total number of records left out of a view"
    );
    describe_counter!(
        "exchange_events_processed_total",
        "Total number of contract events processed"
    );
}

/// Increment view recomputation counter
pub fn view_computed(view: &'static str) {
    counter!("exchange_views_computed_total", "view" => view).increment(1);
}

/// Increment memo hit counter
pub fn view_cache_hit(view: &'static str) {
    counter!("exchange_views_cache_hits_total", "view" => view).increment(1);
}

/// Increment excluded records counter
pub fn records_excluded(reason: &'static str, count: u64) {
    counter!("exchange_records_excluded_total", "reason" => reason).increment(count);
}

/// Increment processed events counter
pub fn events_processed(event: &'static str) {
    counter!("exchange_events_processed_total", "event" => event).increment(1);
}
