mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::auth::{routes as auth_routes, AuthService};
use crate::features::brands::{routes as brands_routes, BrandService};
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::contact::{routes as contact_routes, ContactService};
use crate::features::coupons::{routes as coupons_routes, CouponService};
use crate::features::dashboard::{routes as dashboard_routes, DashboardService};
use crate::features::product_types::{routes as product_types_routes, ProductTypeService};
use crate::features::products::{routes as products_routes, ProductService};
use crate::modules::catalog_api::CatalogClient;
use crate::shared::query_cache::QueryCache;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Log system info
    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // Catalog service client and the per-session query cache shared by all features
    let catalog_client = Arc::new(
        CatalogClient::new(&config.catalog_api)
            .map_err(|e| anyhow::anyhow!("Failed to create catalog client: {}", e))?,
    );
    let query_cache = Arc::new(QueryCache::new(config.session.cache_ttl));
    let session_config = Arc::new(config.session.clone());
    tracing::info!(
        "Catalog client initialized for {} (cache ttl {:?})",
        catalog_client.base_url(),
        config.session.cache_ttl
    );

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&catalog_client),
        Arc::clone(&query_cache),
        Arc::clone(&session_config),
        config.catalog_api.me_attempts,
    ));

    let category_service = Arc::new(CategoryService::new(
        Arc::clone(&catalog_client),
        Arc::clone(&query_cache),
    ));
    let product_service = Arc::new(ProductService::new(
        Arc::clone(&catalog_client),
        Arc::clone(&query_cache),
    ));
    let brand_service = Arc::new(BrandService::new(
        Arc::clone(&catalog_client),
        Arc::clone(&query_cache),
    ));
    let product_type_service = Arc::new(ProductTypeService::new(
        Arc::clone(&catalog_client),
        Arc::clone(&query_cache),
    ));
    let coupon_service = Arc::new(CouponService::new(
        Arc::clone(&catalog_client),
        Arc::clone(&query_cache),
    ));
    let contact_service = Arc::new(ContactService::new(
        Arc::clone(&catalog_client),
        Arc::clone(&query_cache),
    ));
    let dashboard_service = Arc::new(DashboardService::new(
        Arc::clone(&category_service),
        Arc::clone(&product_service),
        Arc::clone(&brand_service),
        Arc::clone(&product_type_service),
        Arc::clone(&coupon_service),
        Arc::clone(&contact_service),
    ));
    tracing::info!("Catalog services initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Every API route sees the cookie credential; a 401 clears it and redirects to login
    let api_routes = Router::new()
        .merge(auth_routes(auth_service))
        .merge(categories_routes(category_service))
        .merge(products_routes(product_service))
        .merge(brands_routes(brand_service))
        .merge(product_types_routes(product_type_service))
        .merge(coupons_routes(coupon_service))
        .merge(contact_routes(contact_service))
        .merge(dashboard_routes(dashboard_service))
        .layer(axum::middleware::from_fn_with_state(
            Arc::new(middleware::SessionLayer {
                config: config.session.clone(),
                cache: Arc::clone(&query_cache),
            }),
            middleware::session_middleware,
        ));

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let app = Router::new()
        .merge(swagger)
        .merge(api_routes)
        .merge(health_route)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let listener = bind_listener(&addr)?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// TCP listener with address reuse, no-delay and keepalive configured
fn bind_listener(addr: &str) -> anyhow::Result<tokio::net::TcpListener> {
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address {}: {}", addr, e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;
    socket.set_tcp_keepalive(
        &socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60)),
    )?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    Ok(tokio::net::TcpListener::from_std(socket.into())?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
