#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod audio_file;
mod error;
mod provider;
mod request;
mod server;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::DefaultBodyLimit, extract::State, routing::post};

pub use error::{Result, SttError};
pub use provider::SpeechRecognizer;
pub use server::{Server, SttServerBuilder};
pub use types::{
    AudioEncoding, RecognitionAlternative, RecognitionConfig, RecognitionResult, TranscriptionRequest,
    TranscriptionResponse,
};
use request::ExtractMultipart;

/// Build the STT server from configuration
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed
pub fn build_server(config: &relay_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        SttServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize STT server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for STT
pub fn endpoint_router(upload_limit: usize) -> Router<Arc<Server>> {
    Router::new()
        .route("/transcribe", post(transcribe))
        .layer(DefaultBodyLimit::max(upload_limit))
}

/// Handle transcription requests
async fn transcribe(
    State(server): State<Arc<Server>>,
    ExtractMultipart(request): ExtractMultipart,
) -> Result<Json<TranscriptionResponse>> {
    tracing::debug!("STT transcription handler called");

    let response = server.transcribe(request).await?;

    tracing::debug!("Transcription complete");

    Ok(Json(response))
}
