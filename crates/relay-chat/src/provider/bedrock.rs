//! Anthropic models on AWS Bedrock through the `InvokeModel` API

use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_bedrockruntime::{
    Client as BedrockClient,
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::invoke_model::InvokeModelError,
};
use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
use aws_smithy_types::Blob;
use relay_config::ChatConfig;
use secrecy::{ExposeSecret, SecretString};

use super::ChatModel;
use crate::{
    error::ChatError,
    types::{MessagesRequest, MessagesResponse},
};

const JSON: &str = "application/json";

/// Bedrock runtime client wrapper
pub(crate) struct BedrockModel {
    client: BedrockClient,
}

impl BedrockModel {
    /// Build the runtime client from configuration
    ///
    /// Nothing is validated here. A region missing from both the
    /// configuration and the AWS environment surfaces on the first call.
    pub async fn new(config: &ChatConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(region) = relay_config::non_empty(config.region.as_deref()) {
            loader = loader.region(aws_config::Region::new(region.to_owned()));
        }

        // Explicit keys win over the default credential chain
        if let Some(credentials) = static_credentials(config) {
            loader = loader.credentials_provider(credentials);
        }

        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint.as_str());
        }

        let sdk_config = loader.load().await;

        Self {
            client: BedrockClient::new(&sdk_config),
        }
    }
}

/// Static keys from configuration, when both halves are present and non-blank
fn static_credentials(config: &ChatConfig) -> Option<Credentials> {
    fn exposed(value: Option<&SecretString>) -> Option<&str> {
        relay_config::non_empty(value.map(ExposeSecret::expose_secret))
    }

    let access_key = exposed(config.access_key_id.as_ref())?;
    let secret_key = exposed(config.secret_access_key.as_ref())?;

    Some(Credentials::new(access_key, secret_key, None, None, "relay-config"))
}

#[async_trait]
impl ChatModel for BedrockModel {
    async fn invoke(&self, model_id: &str, request: &MessagesRequest<'_>) -> crate::error::Result<MessagesResponse> {
        if self.client.config().region().is_none() {
            return Err(ChatError::MissingConfig("chat.region"));
        }

        let body = serde_json::to_vec(request).map_err(|e| ChatError::Internal(e.into()))?;

        tracing::debug!(
            model = model_id,
            messages = request.messages.len(),
            max_tokens = request.max_tokens,
            "bedrock invoke_model request"
        );

        let output = self
            .client
            .invoke_model()
            .model_id(model_id)
            .content_type(JSON)
            .accept(JSON)
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| classify(model_id, e))?;

        serde_json::from_slice(output.body().as_ref()).map_err(|e| {
            tracing::error!(model = model_id, "failed to parse bedrock response: {e}");
            ChatError::MalformedResponse(e.to_string())
        })
    }

    fn name(&self) -> &str {
        "bedrock"
    }
}

/// Sort an SDK failure into the relay's error kinds
fn classify(model_id: &str, error: SdkError<InvokeModelError, HttpResponse>) -> ChatError {
    let detail = DisplayErrorContext(&error).to_string();

    tracing::error!(model = model_id, error = %detail, "bedrock invoke_model failed");

    match error {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => ChatError::ProviderUnavailable(detail),
        SdkError::ServiceError(context) => {
            let status = context.raw().status().as_u16();
            let message = context
                .err()
                .message()
                .map_or_else(|| context.err().to_string(), ToOwned::to_owned);
            ChatError::ProviderRejected { status, message }
        }
        SdkError::ResponseError(_) => ChatError::MalformedResponse(detail),
        _ => ChatError::Internal(anyhow::anyhow!(detail)),
    }
}
