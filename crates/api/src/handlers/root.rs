use axum::Json;

use crate::response::MessageResponse;

/// GET /
pub async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to the Soundverse DNA FastAPI server!",
    })
}
