//! Metrics collection and exposition.
//!
//! # Metrics
//! - `candy_requests_total` (counter): requests by method, route, status
//! - `candy_request_duration_seconds` (histogram): latency by method, route
//! - `candy_records` (gauge): records currently stored
//! - `candy_created_total` (counter): successful inserts

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let method = method.to_string();
    let route = route.to_string();

    counter!(
        "candy_requests_total",
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        "candy_request_duration_seconds",
        "method" => method,
        "route" => route
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a successful insert.
///
/// The store only grows, so the record gauge is incremented rather than set;
/// concurrent inserts cannot leave it behind the real count.
pub fn record_created() {
    counter!("candy_created_total").increment(1);
    gauge!("candy_records").increment(1.0);
}


#[cfg(test)]
mod tests {
    use super::test_support::{capture, find, labels};
    use super::*;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};
    use metrics_util::MetricKind;

    #[test]
    fn test_record_request_names_and_labels() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        ::metrics::with_local_recorder(&recorder, || {
            record_request("GET", "/candies/{id}", 404, Instant::now());
        });

        let captured = capture(&snapshotter);

        let (kind, _, got_labels, value) = find(&captured, "candy_requests_total");
        assert_eq!(*kind, MetricKind::Counter);
        assert_eq!(
            *got_labels,
            labels(&[("method", "GET"), ("route", "/candies/{id}"), ("status", "404")])
        );
        assert!(matches!(value, DebugValue::Counter(1)));

        let (kind, _, got_labels, value) = find(&captured, "candy_request_duration_seconds");
        assert_eq!(*kind, MetricKind::Histogram);
        assert_eq!(
            *got_labels,
            labels(&[("method", "GET"), ("route", "/candies/{id}")])
        );
        match value {
            DebugValue::Histogram(samples) => {
                assert_eq!(samples.len(), 1);
                assert!(samples[0].into_inner() >= 0.0);
            }
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn test_record_created_tracks_store_size() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        ::metrics::with_local_recorder(&recorder, || {
            for _ in 0..3 {
                record_created();
            }
        });

        let captured = capture(&snapshotter);

        let (kind, _, _, value) = find(&captured, "candy_created_total");
        assert_eq!(*kind, MetricKind::Counter);
        assert!(matches!(value, DebugValue::Counter(3)));

        let (kind, _, got_labels, value) = find(&captured, "candy_records");
        assert_eq!(*kind, MetricKind::Gauge);
        assert!(got_labels.is_empty());
        match value {
            DebugValue::Gauge(v) => assert_eq!(v.into_inner(), 3.0),
            other => panic!("unexpected value {:?}", other),
        }
    }
}
