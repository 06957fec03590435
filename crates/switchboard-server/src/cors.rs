use http::{HeaderValue, Method};
use http::header::HeaderName;
use switchboard_config::{AnyOrArray, CorsConfig};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Build a Tower CORS layer from configuration
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = match &config.origins {
        AnyOrArray::Any => AllowOrigin::any(),
        AnyOrArray::List(origins) => {
            AllowOrigin::list(origins.iter().filter_map(|o| o.parse().ok()).collect::<Vec<HeaderValue>>())
        }
    };

    let methods = match &config.methods {
        AnyOrArray::Any => AllowMethods::any(),
        AnyOrArray::List(methods) => {
            AllowMethods::list(methods.iter().filter_map(|m| m.parse().ok()).collect::<Vec<Method>>())
        }
    };

    let headers = match &config.headers {
        AnyOrArray::Any => AllowHeaders::any(),
        AnyOrArray::List(headers) => {
            AllowHeaders::list(headers.iter().filter_map(|h| h.parse().ok()).collect::<Vec<HeaderName>>())
        }
    };

    let layer = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers);

    match config.max_age_duration() {
        Some(duration) => layer.max_age(duration),
        None => layer,
    }
}
