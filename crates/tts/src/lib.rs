#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod provider;
mod server;
mod types;

use std::sync::Arc;

use axum::{Router, extract::State, routing::post};
use relay_core::ExtractPayload;

pub use error::{Result, TtsError};
pub use provider::SpeechSynthesizer;
pub use server::{Server, TtsServerBuilder};
pub use types::{OutputEncoding, SpeechResponse, SsmlVoiceGender, SynthesisRequest, VoiceSettings};

/// Build the TTS server from configuration
pub fn build_server(config: &relay_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        TtsServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize TTS server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for TTS
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/synthesize", post(synthesize))
}

/// Handle speech synthesis requests
async fn synthesize(
    State(server): State<Arc<Server>>,
    ExtractPayload(request): ExtractPayload<SynthesisRequest>,
) -> Result<axum::response::Response> {
    tracing::debug!("TTS synthesis handler called");

    let response = server.synthesize(request).await?;

    tracing::debug!(bytes = response.audio.len(), "Speech synthesis complete");

    Ok(response.into_response())
}
