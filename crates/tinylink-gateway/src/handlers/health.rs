use crate::model::Envelope;
use axum::Json;

pub async fn health_handler() -> Json<Envelope> {
    Json(Envelope::ok())
}
