mod header_injector;
mod logs;
mod metrics;
mod otel;
mod shutdown;
mod tracer;

pub use self::header_injector::{HeaderInjector, inject_current_context};
pub use self::logs::init_logger;
pub use self::metrics::{Labels, Method, Metrics, Status, render_metrics};
pub use self::otel::{Telemetry, TelemetryProviders, TracingContext};
pub use self::shutdown::shutdown_signal;
pub use self::tracer::OperationTracer;
