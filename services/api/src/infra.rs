use clarity::config::{AppConfig, BenchmarkConfig, SessionConfig};
use clarity::error::AppError;
use clarity::pay::{BenchmarkTables, ComparisonEngine};
use clarity::remote::clients_from_config;
use clarity::session::{AnalysisSession, Analyzer};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) analyzer: Arc<Analyzer>,
    pub(crate) sessions: Arc<SessionRegistry>,
}

struct SessionEntry {
    session: Arc<AnalysisSession>,
    last_touched: Instant,
}

/// In-memory analysis sessions keyed by client-chosen id; nothing outlives the process.
///
/// Sessions idle longer than the configured timeout are swept on every insert, and the least
/// recently touched session is evicted once the cap is reached.
pub(crate) struct SessionRegistry {
    sessions: Mutex<HashMap<String, SessionEntry>>,
    max_sessions: usize,
    idle_timeout: Duration,
}

impl SessionRegistry {
    pub(crate) fn new(config: &SessionConfig) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            max_sessions: config.max_sessions.max(1),
            idle_timeout: config.idle_timeout(),
        }
    }

    fn is_idle(&self, entry: &SessionEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.last_touched) >= self.idle_timeout
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<String, SessionEntry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn get_or_create(&self, session_id: &str) -> Arc<AnalysisSession> {
        self.get_or_create_at(session_id, Instant::now())
    }

    fn get_or_create_at(&self, session_id: &str, now: Instant) -> Arc<AnalysisSession> {
        let mut sessions = self.sessions();

        if let Some(entry) = sessions.get_mut(session_id) {
            entry.last_touched = now;
            return entry.session.clone();
        }

        let before = sessions.len();
        sessions.retain(|_, entry| !self.is_idle(entry, now));

        if sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_touched)
                .map(|(id, _)| id.clone());
            if let Some(id) = oldest {
                sessions.remove(&id);
            }
        }

        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, remaining = sessions.len(), "evicted analysis sessions");
        }

        let session = Arc::new(AnalysisSession::new());
        sessions.insert(
            session_id.to_string(),
            SessionEntry {
                session: session.clone(),
                last_touched: now,
            },
        );
        session
    }

    pub(crate) fn get(&self, session_id: &str) -> Option<Arc<AnalysisSession>> {
        self.get_at(session_id, Instant::now())
    }

    fn get_at(&self, session_id: &str, now: Instant) -> Option<Arc<AnalysisSession>> {
        let mut sessions = self.sessions();
        let expired = sessions
            .get(session_id)
            .is_some_and(|entry| self.is_idle(entry, now));
        if expired {
            sessions.remove(session_id);
            return None;
        }

        sessions.get_mut(session_id).map(|entry| {
            entry.last_touched = now;
            entry.session.clone()
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.sessions().len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

pub(crate) fn load_benchmarks(config: &BenchmarkConfig) -> Result<BenchmarkTables, AppError> {
    match &config.csv_path {
        Some(path) => {
            let tables = BenchmarkTables::from_path(path)?;
            info!(path = %path.display(), "loaded benchmark overrides");
            Ok(tables)
        }
        None => Ok(BenchmarkTables::reference()),
    }
}

/// Wires benchmarks and both remote clients from configuration.
pub(crate) fn build_analyzer(config: &AppConfig) -> Result<Analyzer, AppError> {
    let engine = ComparisonEngine::new(Arc::new(load_benchmarks(&config.benchmarks)?));
    let (feedback, prediction) = clients_from_config(&config.remote)?;
    Ok(Analyzer::new(engine, Arc::new(feedback), Arc::new(prediction)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clarity::pay::BenchmarkDimension;
    use std::path::PathBuf;

    #[test]
    fn registry_reuses_sessions_by_id() {
        let registry = SessionRegistry::default();
        assert!(registry.get("alpha").is_none());

        let first = registry.get_or_create("alpha");
        let again = registry.get_or_create("alpha");
        registry.get_or_create("beta");

        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(registry.len(), 2);
        assert!(registry.get("alpha").is_some());
    }

    fn bounded(max_sessions: usize, idle_secs: u64) -> SessionRegistry {
        SessionRegistry::new(&SessionConfig {
            max_sessions,
            idle_secs,
        })
    }

    #[test]
    fn registry_never_exceeds_its_cap() {
        let registry = bounded(3, 3_600);
        let start = Instant::now();

        for n in 0..50u64 {
            let id = format!("client-{n}");
            registry.get_or_create_at(&id, start + Duration::from_secs(n));
            assert!(registry.len() <= 3);
        }

        assert_eq!(registry.len(), 3);
        assert!(registry.get_at("client-0", start + Duration::from_secs(50)).is_none());
        assert!(registry.get_at("client-49", start + Duration::from_secs(50)).is_some());
    }

    #[test]
    fn cap_evicts_least_recently_touched_session() {
        let registry = bounded(2, 3_600);
        let start = Instant::now();

        let kept = registry.get_or_create_at("kept", start);
        registry.get_or_create_at("dropped", start + Duration::from_secs(1));
        registry.get_or_create_at("kept", start + Duration::from_secs(2));
        registry.get_or_create_at("newcomer", start + Duration::from_secs(3));

        let later = start + Duration::from_secs(4);
        let still_there = registry.get_at("kept", later).expect("recently used session kept");
        assert!(Arc::ptr_eq(&kept, &still_there));
        assert!(registry.get_at("dropped", later).is_none());
        assert!(registry.get_at("newcomer", later).is_some());
    }

    #[test]
    fn idle_sessions_expire() {
        let registry = bounded(100, 60);
        let start = Instant::now();

        registry.get_or_create_at("stale", start);
        registry.get_or_create_at("active", start + Duration::from_secs(30));
        assert!(registry.get_at("stale", start + Duration::from_secs(61)).is_none());

        registry.get_or_create_at("fresh", start + Duration::from_secs(95));
        assert_eq!(registry.len(), 1);
        assert!(registry.get_at("fresh", start + Duration::from_secs(96)).is_some());
    }

    #[test]
    fn benchmarks_default_to_reference_tables() {
        let tables = load_benchmarks(&BenchmarkConfig::default()).expect("reference tables");
        assert_eq!(tables.lookup(BenchmarkDimension::JobRole, "Manager"), 60000.0);
    }

    #[test]
    fn benchmarks_load_from_configured_csv() {
        let path = std::env::temp_dir().join(format!(
            "clarity-benchmarks-{}.csv",
            std::process::id()
        ));
        std::fs::write(&path, "dimension,key,average\njob_role,Manager,70500\n")
            .expect("write fixture");

        let loaded = load_benchmarks(&BenchmarkConfig {
            csv_path: Some(path.clone()),
        });
        std::fs::remove_file(&path).ok();

        let tables = loaded.expect("override tables");
        assert_eq!(tables.lookup(BenchmarkDimension::JobRole, "Manager"), 70500.0);
        assert_eq!(tables.lookup(BenchmarkDimension::Gender, "Female"), 54000.0);
    }

    #[test]
    fn missing_benchmark_file_is_an_error() {
        let config = BenchmarkConfig {
            csv_path: Some(PathBuf::from("/nonexistent/clarity/benchmarks.csv")),
        };
        assert!(matches!(
            load_benchmarks(&config),
            Err(AppError::Benchmarks(_))
        ));
    }
}
