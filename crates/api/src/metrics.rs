use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

pub struct Metrics {
    // Counters
    total_requests: AtomicUsize,
    successful_requests: AtomicUsize,
    failed_requests: AtomicUsize,

    // Timing (in microseconds)
    total_transcribe_time_us: AtomicU64,
    total_extract_time_us: AtomicU64,
    total_save_time_us: AtomicU64,

    // Counts
    total_transcripts: AtomicUsize,
    total_records_extracted: AtomicUsize,
    total_saves: AtomicUsize,
    total_rows_saved: AtomicUsize,
}

impl Metrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            total_requests: AtomicUsize::new(0),
            successful_requests: AtomicUsize::new(0),
            failed_requests: AtomicUsize::new(0),
            total_transcribe_time_us: AtomicU64::new(0),
            total_extract_time_us: AtomicU64::new(0),
            total_save_time_us: AtomicU64::new(0),
            total_transcripts: AtomicUsize::new(0),
            total_records_extracted: AtomicUsize::new(0),
            total_saves: AtomicUsize::new(0),
            total_rows_saved: AtomicUsize::new(0),
        })
    }

    pub fn record_request(&self, success: bool) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        if success {
            self.successful_requests.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_requests.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_transcribe(&self, duration: std::time::Duration) {
        self.total_transcribe_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
        self.total_transcripts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_extract(&self, duration: std::time::Duration, records: usize) {
        self.total_extract_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
        self.total_records_extracted
            .fetch_add(records, Ordering::Relaxed);
    }

    pub fn record_save(&self, duration: std::time::Duration, rows: usize) {
        self.total_save_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
        self.total_saves.fetch_add(1, Ordering::Relaxed);
        self.total_rows_saved.fetch_add(rows, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let transcripts = self.total_transcripts.load(Ordering::Relaxed);
        let saves = self.total_saves.load(Ordering::Relaxed);
        MetricsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            successful_requests: self.successful_requests.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            avg_transcribe_time_ms: self.avg_time_ms(&self.total_transcribe_time_us, transcripts),
            avg_extract_time_ms: self.avg_time_ms(
                &self.total_extract_time_us,
                self.total_requests.load(Ordering::Relaxed),
            ),
            avg_save_time_ms: self.avg_time_ms(&self.total_save_time_us, saves),
            total_transcripts: transcripts,
            total_records_extracted: self.total_records_extracted.load(Ordering::Relaxed),
            total_saves: saves,
            total_rows_saved: self.total_rows_saved.load(Ordering::Relaxed),
        }
    }

    fn avg_time_ms(&self, total_us: &AtomicU64, count: usize) -> f64 {
        let total = total_us.load(Ordering::Relaxed) as f64;
        if count > 0 {
            total / count as f64 / 1000.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: usize,
    pub successful_requests: usize,
    pub failed_requests: usize,
    pub avg_transcribe_time_ms: f64,
    pub avg_extract_time_ms: f64,
    pub avg_save_time_ms: f64,
    pub total_transcripts: usize,
    pub total_records_extracted: usize,
    pub total_saves: usize,
    pub total_rows_saved: usize,
}

pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_snapshot_counts() {
        let metrics = Metrics::new();
        metrics.record_request(true);
        metrics.record_request(false);
        metrics.record_transcribe(Duration::from_millis(10));
        metrics.record_extract(Duration::from_millis(2), 4);
        metrics.record_save(Duration::from_millis(1), 4);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_requests, 2);
        assert_eq!(snapshot.successful_requests, 1);
        assert_eq!(snapshot.failed_requests, 1);
        assert_eq!(snapshot.total_transcripts, 1);
        assert_eq!(snapshot.total_records_extracted, 4);
        assert_eq!(snapshot.total_saves, 1);
        assert_eq!(snapshot.total_rows_saved, 4);
    }

    #[test]
    fn test_save_average_uses_save_count() {
        let metrics = Metrics::new();
        // Two saves, no transcription in between.
        metrics.record_save(Duration::from_millis(4), 2);
        metrics.record_save(Duration::from_millis(2), 2);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_saves, 2);
        assert_eq!(snapshot.total_transcripts, 0);
        assert!((snapshot.avg_save_time_ms - 3.0).abs() < 0.1);
    }
}
