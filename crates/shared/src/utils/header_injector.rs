use axum::http::{HeaderMap, HeaderName, HeaderValue};
use opentelemetry::{Context, global, propagation::Injector};

/// Writes trace-context fields into outbound HTTP headers.
pub struct HeaderInjector<'a>(pub &'a mut HeaderMap);

impl<'a> Injector for HeaderInjector<'a> {
    fn set(&mut self, key: &str, value: String) {
        if let Ok(header_name) = key.parse::<HeaderName>()
            && let Ok(header_value) = HeaderValue::from_str(&value)
        {
            self.0.insert(header_name, header_value);
        }
    }
}

/// Propagates the active trace context onto an outbound request.
pub fn inject_current_context(headers: &mut HeaderMap) {
    global::get_text_map_propagator(|propagator| {
        propagator.inject_context(&Context::current(), &mut HeaderInjector(headers))
    });
}
