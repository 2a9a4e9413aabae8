mod routes;

use stub_api::{Config, Database};

pub struct TestStub {
    pub db: Database,
    pub address: String,
    pub client: reqwest::Client,
}

impl TestStub {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/{path}", self.address)
    }
}

pub fn spawn_stub() -> TestStub {
    let db = Database::new();
    let mut config = Config::default();
    let server = stub_api::build(&mut config, db.clone()).unwrap();
    tokio::spawn(server);
    TestStub {
        db,
        address: format!("http://127.0.0.1:{}", config.port),
        client: reqwest::Client::new(),
    }
}

#[tokio::test]
async fn health_check() -> anyhow::Result<()> {
    let stub = spawn_stub();

    let response = stub.client.get(stub.url("health_check")).send().await?;

    assert!(response.status().is_success());
    assert_eq!(response.text().await?, "healthy");
    Ok(())
}
