use actix_web::web;
use dotenvy::dotenv;
use order_admin::{build_server, HttpOrderGateway, Settings, SharedOrderService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let settings = Settings::from_env().unwrap_or_else(|e| {
        log::error!("Invalid configuration: {}", e);
        std::process::exit(2);
    });

    let gateway = HttpOrderGateway::new(&settings).unwrap_or_else(|e| {
        log::error!("Cannot build order service client: {}", e);
        std::process::exit(2);
    });
    let service = SharedOrderService::boxed(gateway);

    // A failed initial load is not fatal; operators can POST /orders/refresh.
    if let Err(e) = service.refresh().await {
        log::warn!("Initial order load failed: {}", e);
    }

    log::info!(
        "Starting server at http://{}:{} (order service {})",
        settings.host,
        settings.port,
        settings.order_api_base_url
    );

    build_server(web::Data::new(service), &settings.host, settings.port)?.await
}
