pub mod fixtures;
pub mod mock;

use admin_store::{
    Config as StoreConfig, ErrorKind, MutationResult, Reconcile, StoreContext,
    TimeSource,
};
use reqwest::StatusCode;
use serde_json::Value;
use stub_api::{Config, Database, telemetry};
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

/// Instant the mocked store clock starts at.
pub const TEST_START: &str = "2025-01-01T00:00:00Z";

pub struct TestApp {
    #[allow(unused)]
    pub port: u16,
    /// Direct access to the stub's tables and request log.
    pub db: Database,
    pub client: payloads::APIClient,
    pub time_source: TimeSource,
}

impl TestApp {
    pub fn address(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Store context pointing at this app, patching locally and keeping
    /// toasts until a test removes them.
    pub fn context(&self) -> StoreContext {
        self.context_with(Reconcile::Patch)
    }

    pub fn context_with(&self, reconcile: Reconcile) -> StoreContext {
        let config = StoreConfig {
            api_url: self.address(),
            reconcile,
            toast_ms: None,
        };
        StoreContext::new(&config, self.time_source.clone())
    }

    /// Seed one table, panicking on unknown tables.
    pub fn seed(&self, table: &str, rows: impl IntoIterator<Item = Value>) {
        self.db.seed(table, rows).unwrap();
    }
}

/// Start the stub backend on `port` (0 for any free port) with empty
/// tables.
pub async fn spawn_app_on_port(port: u16) -> TestApp {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    #[cfg(feature = "mock-time")]
    let time_source = TimeSource::new(TEST_START.parse().unwrap());

    #[cfg(not(feature = "mock-time"))]
    let time_source = TimeSource::system();

    let db = Database::new();
    let mut config = Config {
        ip: "127.0.0.1".into(),
        port,
    };
    let server = stub_api::build(&mut config, db.clone()).unwrap();
    tokio::spawn(server);

    TestApp {
        port: config.port,
        db,
        client: payloads::APIClient::new(format!(
            "http://127.0.0.1:{}",
            config.port
        )),
        time_source,
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0).await
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(payloads::ClientError::APIError(code, _)) => {
            assert_eq!(code, expected)
        }
        _ => panic!("Expected APIError"),
    };
}

/// Assert that a store operation failed with a specific status code.
pub fn assert_store_status<T>(result: MutationResult<T>, expected: StatusCode) {
    match result {
        Err(e) => assert_eq!(e.kind(), ErrorKind::Status(expected.as_u16())),
        Ok(_) => panic!("Expected a failed store operation"),
    }
}
