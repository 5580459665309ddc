use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// The webhook is called cross-origin by external collaboration tools, so
/// CORS is wide open by design.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

pub fn trace_layer() -> TraceLayer<
    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
> {
    TraceLayer::new_for_http()
}
