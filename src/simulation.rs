//! Synthetic load generation.
//!
//! Periodic tasks that feed plausible values into the gauges and the
//! transaction totals, so a scrape of a freshly started exporter already
//! shows live-looking data. The simulator is a collaborator over
//! [`MetricsRecorder`]; the metrics engine knows nothing about it.

use std::time::Duration;

use rand::Rng;
use tokio::time::interval;
use tracing::debug;

use crate::config::SimulationConfig;
use crate::metrics::MetricsRecorder;

/// Periodically feeds synthetic values into a metrics recorder.
pub struct LoadSimulator<R: MetricsRecorder> {
    recorder: R,
    config: SimulationConfig,
}

impl<R: MetricsRecorder> LoadSimulator<R> {
    pub fn new(recorder: R, config: SimulationConfig) -> Self {
        LoadSimulator { recorder, config }
    }

    /// Spawns the interval tasks. Does nothing when simulation is disabled.
    pub fn spawn(self) {
        if !self.config.enabled {
            debug!("Load simulation disabled");
            return;
        }
        let LoadSimulator { recorder, config } = self;

        let users_recorder = recorder.clone();
        let mut users_interval = interval(Duration::from_secs(config.active_users_interval_secs));
        tokio::spawn(async move {
            loop {
                users_interval.tick().await;
                tick_active_users(&users_recorder);
            }
        });

        let db_recorder = recorder.clone();
        let mut db_interval = interval(Duration::from_secs(
            config.database_connections_interval_secs,
        ));
        tokio::spawn(async move {
            loop {
                db_interval.tick().await;
                tick_database_connections(&db_recorder);
            }
        });

        let mut transactions_interval = interval(Duration::from_secs(
            config.business_transactions_interval_secs,
        ));
        tokio::spawn(async move {
            loop {
                transactions_interval.tick().await;
                tick_business_transactions(&recorder);
            }
        });
    }
}

/// Simulates between 50 and 149 concurrently active users.
fn tick_active_users<R: MetricsRecorder>(recorder: &R) {
    let count = rand::thread_rng().gen_range(50..150);
    recorder.set_active_users(count as f64);
}

/// Simulates between 10 and 59 open database connections.
fn tick_database_connections<R: MetricsRecorder>(recorder: &R) {
    let count = rand::thread_rng().gen_range(10..60);
    recorder.set_database_connections(count as f64);
}

/// Simulates a burst of purchases, with about half as many registrations.
fn tick_business_transactions<R: MetricsRecorder>(recorder: &R) {
    let purchases: u32 = rand::thread_rng().gen_range(0..10);
    recorder.add_business_transactions("purchase", purchases as f64);
    recorder.add_business_transactions("registration", (purchases / 2) as f64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct StubRecorder {
        calls: Arc<Mutex<Vec<(String, f64)>>>,
    }

    impl StubRecorder {
        fn calls(&self) -> Vec<(String, f64)> {
            self.calls.lock().clone()
        }
    }

    impl MetricsRecorder for StubRecorder {
        fn record_http_request(&self, _: &str, _: &str, _: &str, duration_secs: f64) {
            self.calls.lock().push(("http".to_string(), duration_secs));
        }

        fn set_active_users(&self, count: f64) {
            self.calls.lock().push(("active_users".to_string(), count));
        }

        fn set_database_connections(&self, count: f64) {
            self.calls
                .lock()
                .push(("database_connections".to_string(), count));
        }

        fn add_business_transactions(&self, kind: &str, count: f64) {
            self.calls.lock().push((kind.to_string(), count));
        }
    }

    #[test]
    fn active_users_stay_in_range() {
        let recorder = StubRecorder::default();
        for _ in 0..100 {
            tick_active_users(&recorder);
        }
        for (name, value) in recorder.calls() {
            assert_eq!(name, "active_users");
            assert!((50.0..150.0).contains(&value), "{value}");
        }
    }

    #[test]
    fn database_connections_stay_in_range() {
        let recorder = StubRecorder::default();
        for _ in 0..100 {
            tick_database_connections(&recorder);
        }
        for (name, value) in recorder.calls() {
            assert_eq!(name, "database_connections");
            assert!((10.0..60.0).contains(&value), "{value}");
        }
    }

    #[test]
    fn transactions_record_purchases_and_registrations() {
        let recorder = StubRecorder::default();
        tick_business_transactions(&recorder);
        let calls = recorder.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "purchase");
        assert_eq!(calls[1].0, "registration");
        assert!(calls[0].1 < 10.0);
        assert!(calls[1].1 <= calls[0].1 / 2.0 + 0.5);
    }
}
