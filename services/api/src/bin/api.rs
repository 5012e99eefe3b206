//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{
        collaborator::HttpCollaborator, db::DbAdapter, password::Argon2PasswordService,
        token::JwtTokenService,
    },
    config::Config,
    error::ApiError,
    web::{
        auth::{login_handler, signup_handler},
        chat::{
            create_chat_handler, list_chats_handler, list_messages_handler, seed_sources_handler,
            send_message_handler,
        },
        middleware::require_auth,
        rest::ApiDoc,
        state::AppState,
        status_handler,
    },
};
use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use research_chat_core::{AuthService, ChatService};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to Database & Run Migrations ---
    info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await?;
    let db_adapter = Arc::new(DbAdapter::new(db_pool));
    info!("Running database migrations...");
    db_adapter.run_migrations().await?;
    info!("Database migrations complete.");

    // --- 3. Initialize Service Adapters ---
    let http_client = reqwest::Client::builder()
        .timeout(config.ai_timeout)
        .build()
        .map_err(|e| ApiError::Internal(format!("Failed to build the HTTP client: {}", e)))?;
    let collaborator = Arc::new(HttpCollaborator::new(http_client, &config.ai_service_url));
    let passwords = Arc::new(Argon2PasswordService);
    let tokens = Arc::new(JwtTokenService::new(&config.jwt_secret));

    // --- 4. Build the Core Services and the Shared AppState ---
    let auth = Arc::new(AuthService::new(db_adapter.clone(), passwords, tokens));
    let chat = Arc::new(ChatService::new(db_adapter, collaborator));
    let app_state = Arc::new(AppState {
        auth,
        chat,
        config: config.clone(),
    });

    // --- 5. Configure CORS for the browser frontend ---
    let cors = CorsLayer::new()
        .allow_origin(
            config
                .frontend_origin
                .parse::<HeaderValue>()
                .map_err(|e| {
                    ApiError::Internal(format!(
                        "Invalid FRONTEND_ORIGIN '{}': {}",
                        config.frontend_origin, e
                    ))
                })?,
        )
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 6. Create the Web Router ---
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/", get(status_handler))
        .route("/api/auth/signup", post(signup_handler))
        .route("/api/auth/login", post(login_handler));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route(
            "/api/chats",
            post(create_chat_handler).get(list_chats_handler),
        )
        .route("/api/chats/{id}/messages", get(list_messages_handler))
        .route("/api/chats/{id}/message", post(send_message_handler))
        .route("/api/chats/{id}/sources", post(seed_sources_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    // Combine API routes
    let api_router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 7. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
