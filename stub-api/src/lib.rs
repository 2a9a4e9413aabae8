//! In-memory stand-in for the home-services backend.
//!
//! Serves the REST contract the admin stores speak (same verbs, paths and
//! body shapes) from plain in-memory tables. There is no business logic:
//! creates assign the next id, updates merge fields, deletes remove rows.
//! Every request is recorded, and failures can be queued up front with
//! [`Database::fail_next`].

pub mod routes;
pub mod store;
pub mod telemetry;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use std::net::TcpListener;

pub use store::Database;

/// Build the server, but not await it.
///
/// Returns the port that the server has bound to by modifying the config.
pub fn build(config: &mut Config, db: Database) -> std::io::Result<Server> {
    let db = web::Data::new(db);

    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();
    let server = HttpServer::new(move || {
        App::new()
            .service(routes::api_services())
            .app_data(db.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}

#[derive(Debug, Clone)]
pub struct Config {
    /// set to "0.0.0.0" for public access, "127.0.0.1" for local dev
    pub ip: String,
    /// set to 0 to get an os-assigned port
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ip: "127.0.0.1".into(),
            port: 0,
        }
    }
}

impl Config {
    /// Read `IP_ADDRESS` and `PORT`, keeping the defaults for anything
    /// unset or unparseable.
    pub fn from_env() -> Self {
        use std::env::var;

        let defaults = Self::default();
        Config {
            ip: var("IP_ADDRESS").unwrap_or(defaults.ip),
            port: var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(defaults.port),
        }
    }
}
