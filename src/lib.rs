pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;

use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::order_service::OrderService;
use domain::ports::OrderGateway;

pub use config::Settings;
pub use infrastructure::http_gateway::HttpOrderGateway;

/// The order service as shared between actix workers.
pub type SharedOrderService = OrderService<Box<dyn OrderGateway>>;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::refresh_orders,
        handlers::orders::update_order_status,
        handlers::orders::cancel_order,
    ),
    components(schemas(
        handlers::orders::OrderResponse,
        handlers::orders::ListOrdersResponse,
        handlers::orders::RefreshResponse,
        handlers::orders::UpdateStatusRequest,
        handlers::orders::CancelOrderRequest,
    )),
    tags((name = "orders", description = "Order status administration"))
)]
pub struct ApiDoc;

/// Register the `/orders` routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::get().to(handlers::orders::list_orders))
            .route("/refresh", web::post().to(handlers::orders::refresh_orders))
            .route("/{id}", web::get().to(handlers::orders::get_order))
            .route("/{id}/status", web::patch().to(handlers::orders::update_order_status))
            .route("/{id}/cancel", web::post().to(handlers::orders::cancel_order)),
    );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    service: web::Data<SharedOrderService>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())
            .configure(configure_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
