//! services/api/src/web/rest.rs
//!
//! Contains the liveness endpoint and the master definition for the
//! OpenAPI specification.

use axum::{response::IntoResponse, Json};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::web::{auth, chat};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        status_handler,
        auth::signup_handler,
        auth::login_handler,
        chat::create_chat_handler,
        chat::list_chats_handler,
        chat::list_messages_handler,
        chat::send_message_handler,
        chat::seed_sources_handler,
    ),
    components(
        schemas(
            StatusResponse,
            auth::SignupRequest,
            auth::LoginRequest,
            auth::SignupResponse,
            auth::LoginResponse,
            chat::CreateChatRequest,
            chat::CreateChatResponse,
            chat::ChatSummary,
            chat::MessageView,
            chat::SendMessageRequest,
            chat::SendMessageResponse,
            chat::SeedSourcesRequest,
            chat::SeedSourcesResponse,
        )
    ),
    tags(
        (name = "Research Chat API", description = "API endpoints for the AI research chat backend.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Handlers
//=========================================================================================

/// The response payload for the liveness check.
#[derive(Serialize, ToSchema)]
pub struct StatusResponse {
    status: String,
}

/// GET / - Liveness check
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is up", body = StatusResponse))
)]
pub async fn status_handler() -> impl IntoResponse {
    Json(StatusResponse {
        status: "Backend running".to_string(),
    })
}
