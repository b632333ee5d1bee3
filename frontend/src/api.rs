//! Client for the prediction service.

use gloo_file::File;
use gloo_net::http::Request;
use shared::{ApiError, PredictResponse, PredictionRecord};

use crate::config::Config;

/// Uploads one image as multipart field `file` and returns the verdict.
/// Non-2xx statuses and transport failures both surface as `ApiError`; the
/// caller does not distinguish them further.
pub async fn predict(
    config: &Config,
    user_id: &str,
    file: &File,
) -> Result<PredictResponse, ApiError> {
    let form = web_sys::FormData::new()
        .map_err(|_| ApiError::Transport("failed to build form data".to_string()))?;
    form.append_with_blob("file", file.as_ref())
        .map_err(|_| ApiError::Transport("failed to attach image".to_string()))?;

    let url = format!("{}/predict?user_id={}", config.prediction_base, user_id);
    let response = Request::post(&url)
        .body(form)
        .map_err(|e| ApiError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }

    response
        .json::<PredictResponse>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Primary history source: the service's user-scoped record list, newest
/// first. A `Status` error here is the signal to try the database fallback.
pub async fn recent_predictions(
    config: &Config,
    user_id: &str,
) -> Result<Vec<PredictionRecord>, ApiError> {
    let url = format!("{}/predictions?user_id={}", config.prediction_base, user_id);
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }

    response
        .json::<Vec<PredictionRecord>>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
