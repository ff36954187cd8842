use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::Extension,
    http::{header, HeaderMap, Method},
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use libris_api::config::Config;
use libris_api::graphql::{build_schema, LibrisSchema};
use libris_api::middleware::{build_auth_context, extract_bearer_token};
use libris_api::repositories::UserRepository;
use libris_api::routes::{health_router, HealthState};
use libris_api::services::{AuthConfig, AuthService};

/// Build the CORS layer based on configuration.
///
/// In production mode, only origins listed in `CORS_ORIGINS` are allowed;
/// with none configured, CORS requests are rejected. In development mode
/// without configured origins, permissive CORS is used for convenience.
fn build_cors_layer(config: &Config) -> CorsLayer {
    match &config.cors_allowed_origins {
        Some(origins) if !origins.is_empty() => {
            let allowed_origins: Vec<_> = origins
                .iter()
                .filter_map(|origin| {
                    origin.parse().ok().or_else(|| {
                        tracing::warn!("Invalid CORS origin '{}', skipping", origin);
                        None
                    })
                })
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        }
        _ if config.is_production() => {
            tracing::warn!(
                "CORS_ORIGINS not configured in production mode. \
                 CORS requests will be rejected."
            );
            CorsLayer::new()
        }
        _ => {
            tracing::warn!(
                "Using permissive CORS in development mode. \
                 Set CORS_ORIGINS for production-like behavior."
            );
            CorsLayer::permissive()
        }
    }
}

/// GraphQL handler that executes queries against the schema
///
/// The authentication context is fully resolved from the Authorization
/// header before the request executes: a missing header yields an anonymous
/// context, while an invalid token fails the whole request without running
/// any resolver.
async fn graphql_handler(
    Extension(schema): Extension<LibrisSchema>,
    Extension(auth_service): Extension<AuthService>,
    Extension(user_repo): Extension<UserRepository>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();

    let token = extract_bearer_token(&headers);
    match build_auth_context(token, &auth_service, &user_repo).await {
        Ok(auth) => {
            request = request.data(auth);
        }
        Err(e) => {
            tracing::debug!(error = %e, "GraphQL request rejected");
            return async_graphql::Response::from_errors(vec![async_graphql::ServerError::new(
                e.to_string(),
                None,
            )])
            .into();
        }
    }

    schema.execute(request).await.into()
}

/// GraphQL Playground handler for development
async fn graphql_playground() -> impl axum::response::IntoResponse {
    axum::response::Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "libris_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("Starting Libris API server on port {}", config.port);

    // Initialize database pool
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.common.database.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(
            config.common.database.connect_timeout_secs,
        ))
        .connect(&config.common.database.url)
        .await?;
    tracing::info!("Database connection established");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrations completed successfully");

    // Create UserRepository for resolving token subjects
    let user_repo = UserRepository::new(pool.clone());

    // Create AuthService
    let auth_config = AuthConfig::with_expiry_string(
        config.jwt_secret.clone(),
        config.bootstrap_password.clone(),
        &config.jwt_expiry,
    );
    let auth_service = AuthService::new(auth_config);
    tracing::info!("AuthService initialized");

    // Build GraphQL schema
    let schema = build_schema(pool.clone(), auth_service.clone());
    tracing::info!("GraphQL schema built");

    // Create health check state
    let health_state = HealthState::new(pool.clone());

    // Build the CORS layer from configuration
    let cors_layer = build_cors_layer(&config);

    // Build the router
    let app = Router::new()
        .route("/", get(root))
        // GraphQL endpoints
        .route("/graphql", post(graphql_handler))
        .route("/graphql/playground", get(graphql_playground))
        // Nested health routes: /health, /health/live, /health/ready
        .nest("/health", health_router(health_state))
        // Add services as extensions for the GraphQL handler
        .layer(Extension(schema))
        .layer(Extension(user_repo))
        .layer(Extension(auth_service))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer);

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!(
        "GraphQL Playground available at http://{}:{}/graphql/playground",
        addr.ip(),
        addr.port()
    );

    axum::serve(listener, app).await?;

    Ok(())
}

async fn root() -> &'static str {
    "Libris - book catalog API"
}
