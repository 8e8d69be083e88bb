use axum::{
    extract::rejection::JsonRejection,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::errors::ApiError;
use crate::render::{encode_png, generate_image, EffectRequest, RenderError};

/// Render text with effects to a PNG
///
/// POST /api/generate
pub async fn generate(
    payload: Result<Json<EffectRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!("rejected generate body: {}", rejection.body_text());
        ApiError::bad_request("invalid JSON")
    })?;

    tracing::debug!(language = %req.language, effects = ?req.effect, "generating image");

    let png = render_png(&req).map_err(|e| {
        tracing::error!("image generation failed: {}", e);
        ApiError::internal_server_error("image generation failed")
    })?;

    Ok(([(CONTENT_TYPE, "image/png")], png).into_response())
}

fn render_png(req: &EffectRequest) -> Result<Vec<u8>, RenderError> {
    let mut rng = rand::rng();
    encode_png(&generate_image(req, &mut rng))
}
