use actix_web::{web, App, HttpServer};
use auth_gate::config::Config;
use auth_gate::middleware::{AccessLog, RequestTrace};
use auth_gate::routes;
use tracing::info;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // All configuration comes from AUTH_GATE_* environment variables.
    // A missing or weak signing secret, or missing credentials, is fatal.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let host = config.host.clone();
    let port = config.port;
    let app_state = config.into_state();

    info!(
        host = %host,
        port,
        algorithm = ?app_state.security.algorithm(),
        token_ttl_secs = app_state.security.token_ttl().as_secs(),
        "starting auth gate"
    );
    println!("🚀 Starting auth gate on http://{}:{}", host, port);

    let security = app_state.security.clone();
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        let security = security.clone();
        App::new()
            .wrap(AccessLog)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(|cfg| routes::configure(cfg, &security))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
