pub mod error_tracking;

use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};

/// The four location searches the API offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Radius,
    Nearest,
    Accessibility,
    Availability,
}

impl SearchKind {
    pub const ALL: [SearchKind; 4] = [
        SearchKind::Radius,
        SearchKind::Nearest,
        SearchKind::Accessibility,
        SearchKind::Availability,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SearchKind::Radius => "radius",
            SearchKind::Nearest => "nearest",
            SearchKind::Accessibility => "accessibility",
            SearchKind::Availability => "availability",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Process-wide counters, rendered in Prometheus text format.
#[derive(Default)]
pub struct AppMetrics {
    request_count: AtomicU64,
    client_error_count: AtomicU64,
    error_count: AtomicU64,
    latency_total_ms: AtomicU64,
    searches: [AtomicU64; 4],
    search_results: [AtomicU64; 4],
}

impl AppMetrics {
    pub fn record_request(&self, status: u16, latency_ms: u64) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        self.latency_total_ms.fetch_add(latency_ms, Ordering::Relaxed);
        match status {
            400..=499 => self.client_error_count.fetch_add(1, Ordering::Relaxed),
            500.. => self.error_count.fetch_add(1, Ordering::Relaxed),
            _ => 0,
        };
    }

    /// Counts one completed search and the rows it returned.
    pub fn record_search(&self, kind: SearchKind, results: usize) {
        self.searches[kind.index()].fetch_add(1, Ordering::Relaxed);
        self.search_results[kind.index()].fetch_add(results as u64, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self, db_size: u32, db_idle: usize) -> String {
        let requests = self.request_count.load(Ordering::Relaxed);
        let avg_latency =
            self.latency_total_ms.load(Ordering::Relaxed) as f64 / requests.max(1) as f64;

        let mut out = format!(
            concat!(
                "# TYPE http_requests_total counter\n",
                "http_requests_total {}\n",
                "# TYPE http_client_error_total counter\n",
                "http_client_error_total {}\n",
                "# TYPE http_error_total counter\n",
                "http_error_total {}\n",
                "# TYPE http_latency_avg_ms gauge\n",
                "http_latency_avg_ms {:.2}\n",
                "# TYPE db_pool_size gauge\n",
                "db_pool_size {}\n",
                "# TYPE db_pool_idle gauge\n",
                "db_pool_idle {}\n",
            ),
            requests,
            self.client_error_count.load(Ordering::Relaxed),
            self.error_count.load(Ordering::Relaxed),
            avg_latency,
            db_size,
            db_idle,
        );

        render_by_kind(&mut out, "location_searches_total", &self.searches);
        render_by_kind(&mut out, "location_search_results_total", &self.search_results);
        out
    }
}

fn render_by_kind(out: &mut String, name: &str, counters: &[AtomicU64; 4]) {
    let _ = writeln!(out, "# TYPE {name} counter");
    for kind in SearchKind::ALL {
        let value = counters[kind.index()].load(Ordering::Relaxed);
        let _ = writeln!(out, "{name}{{kind=\"{}\"}} {value}", kind.label());
    }
}
