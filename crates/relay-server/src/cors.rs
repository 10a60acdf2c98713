use http::HeaderValue;
use relay_config::CorsConfig;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Build a Tower CORS layer admitting a single origin
///
/// Methods and headers are mirrored from the preflight request, which is
/// how "any" is expressed once credentials are allowed.
pub fn cors_layer(config: &CorsConfig) -> anyhow::Result<CorsLayer> {
    let origin: HeaderValue = config
        .allowed_origin
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid CORS origin '{}': {e}", config.allowed_origin))?;

    let mut layer = CorsLayer::new()
        .allow_origin(AllowOrigin::exact(origin))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    if config.credentials {
        layer = layer.allow_credentials(true);
    }

    if let Some(duration) = config.max_age_duration() {
        layer = layer.max_age(duration);
    }

    Ok(layer)
}
