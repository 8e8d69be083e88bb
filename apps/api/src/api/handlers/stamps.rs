use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::extract::AppJson;
use crate::domain::stamp::{HexColor, Language, NewStamp, Stamp, StampEffect};
use crate::render::{encode_png, render_stamp, RenderError};
use crate::state::AppState;

/// How many stamps the listing returns
pub const RECENT_STAMPS: i64 = 20;

/// Request body for saving a stamp
///
/// Omitted fields fall back to white text on black, Japanese, no effect.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStampRequest {
    pub text: String,
    pub language: Option<String>,
    pub text_color: Option<String>,
    pub background_color: Option<String>,
    pub selected_effect: Option<String>,
}

impl CreateStampRequest {
    fn into_new_stamp(self) -> Result<NewStamp, String> {
        let language = self
            .language
            .as_deref()
            .map(str::parse::<Language>)
            .transpose()?
            .unwrap_or_default();
        let selected_effect = self
            .selected_effect
            .as_deref()
            .map(str::parse::<StampEffect>)
            .transpose()?
            .unwrap_or_default();
        let text_color = HexColor::new(self.text_color.as_deref().unwrap_or("#ffffff"))?;
        let background_color =
            HexColor::new(self.background_color.as_deref().unwrap_or("#000000"))?;

        NewStamp::new(
            self.text,
            language,
            text_color,
            background_color,
            selected_effect,
        )
    }
}

/// Response from saving a stamp
#[derive(Debug, Serialize)]
pub struct CreateStampResponse {
    pub status: &'static str,
    pub stamp: Stamp,
}

/// Save a stamp
///
/// POST /api/stamp
pub async fn create_stamp(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateStampRequest>,
) -> Result<(StatusCode, Json<CreateStampResponse>), ApiError> {
    let new_stamp = req.into_new_stamp().map_err(ApiError::bad_request)?;

    let stamp = state.stamps.create(new_stamp).await.map_err(|e| {
        tracing::error!("failed to save stamp: {}", e);
        ApiError::internal_server_error("DB error")
    })?;

    tracing::info!(stamp_id = stamp.id, effect = %stamp.selected_effect, "stamp saved");
    Ok((
        StatusCode::CREATED,
        Json(CreateStampResponse {
            status: "saved",
            stamp,
        }),
    ))
}

/// The most recent stamps, newest first
///
/// GET /api/stamp/get
pub async fn list_stamps(State(state): State<AppState>) -> Result<Json<Vec<Stamp>>, ApiError> {
    let stamps = state.stamps.recent(RECENT_STAMPS).await.map_err(|e| {
        tracing::error!("failed to list stamps: {}", e);
        ApiError::internal_server_error("DB error")
    })?;

    Ok(Json(stamps))
}

/// PNG preview of a saved stamp
///
/// GET /api/stamp/:id/image
pub async fn stamp_image(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(raw) = id.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let id: i64 = raw
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid stamp id: {}", raw)))?;

    let stamp = state
        .stamps
        .find_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!("failed to load stamp {}: {}", id, e);
            ApiError::internal_server_error("DB error")
        })?
        .ok_or_else(|| ApiError::not_found(format!("Stamp not found: {}", id)))?;

    let png = preview_png(&stamp).map_err(|e| {
        tracing::error!("failed to render stamp {}: {}", id, e);
        ApiError::internal_server_error("image generation failed")
    })?;

    Ok(([(CONTENT_TYPE, "image/png")], png).into_response())
}

fn preview_png(stamp: &Stamp) -> Result<Vec<u8>, RenderError> {
    let mut rng = rand::rng();
    encode_png(&render_stamp(stamp, &mut rng))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> CreateStampRequest {
        serde_json::from_str(json).expect("valid request")
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let stamp = request(r#"{"text": "HELLO"}"#).into_new_stamp().unwrap();

        assert_eq!(stamp.language(), Language::Japanese);
        assert_eq!(stamp.selected_effect(), StampEffect::None);
        assert_eq!(stamp.text_color().as_str(), "#ffffff");
        assert_eq!(stamp.background_color().as_str(), "#000000");
    }

    #[test]
    fn full_request_is_kept() {
        let stamp = request(
            r##"{"text": "ni hao", "language": "chinese", "textColor": "#FF0000",
                "backgroundColor": "#00ff00", "selectedEffect": "blur"}"##,
        )
        .into_new_stamp()
        .unwrap();

        assert_eq!(stamp.language(), Language::Chinese);
        assert_eq!(stamp.selected_effect(), StampEffect::Blur);
        assert_eq!(stamp.text_color().as_str(), "#ff0000");
    }

    #[test]
    fn bad_fields_are_reported() {
        let err = request(r#"{"text": "x", "selectedEffect": "sparkle"}"#)
            .into_new_stamp()
            .unwrap_err();
        assert_eq!(err, "Unknown effect: sparkle");

        let err = request(r#"{"text": "x", "textColor": "white"}"#)
            .into_new_stamp()
            .unwrap_err();
        assert_eq!(err, "Invalid colour: white");

        let err = request(r#"{"text": "x", "language": "french"}"#)
            .into_new_stamp()
            .unwrap_err();
        assert_eq!(err, "Unknown language: french");
    }
}
