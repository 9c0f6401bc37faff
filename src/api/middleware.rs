//! Cross-cutting middleware for the scoring server.

use actix_cors::Cors;
use tracing_actix_web::TracingLogger;

/// Any origin may call the API; the dashboard is served from elsewhere.
pub fn cors() -> Cors {
    Cors::permissive()
}

/// One tracing span per request.
pub fn request_tracing() -> TracingLogger<tracing_actix_web::DefaultRootSpanBuilder> {
    TracingLogger::default()
}
