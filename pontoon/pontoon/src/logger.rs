use crate::LogFormat;
use tracing::{dispatcher::SetGlobalDefaultError, subscriber};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer};

type LoggerResult<T> = Result<T, SetGlobalDefaultError>;

/// An installer for a global logger.
#[derive(Debug, Clone)]
pub struct Logger {
    service_name: &'static str,
    log_format: LogFormat,
    log_queries: bool,
}

impl Logger {
    /// Initialize a new global logger installer.
    pub fn new(service_name: &'static str) -> Self {
        Self {
            service_name,
            log_format: LogFormat::Text,
            log_queries: false,
        }
    }

    /// Sets the STDOUT log output format. Default: Text.
    pub fn log_format(&mut self, log_format: LogFormat) {
        self.log_format = log_format;
    }

    /// Enable query logging. Default: false.
    pub fn log_queries(&mut self, log_queries: bool) {
        self.log_queries = log_queries;
    }

    /// Install logger as a global. Can be called only once per application
    /// instance.
    pub fn install(&self) -> LoggerResult<()> {
        let filter = create_env_filter(self.log_queries);

        let fmt_layer = match self.log_format {
            LogFormat::Text => {
                let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter);
                fmt_layer.boxed()
            }
            LogFormat::Json => {
                let fmt_layer = tracing_subscriber::fmt::layer().json().with_filter(filter);
                fmt_layer.boxed()
            }
        };

        let subscriber = tracing_subscriber::registry().with(fmt_layer);

        subscriber::set_global_default(subscriber)?;

        tracing::debug!(service = self.service_name, "logger installed");

        Ok(())
    }
}

fn create_env_filter(log_queries: bool) -> EnvFilter {
    let mut filter = EnvFilter::from_default_env()
        .add_directive("h2=error".parse().unwrap())
        .add_directive("hyper=error".parse().unwrap())
        .add_directive("tokio_postgres=error".parse().unwrap());

    if let Ok(level) = std::env::var("PONTOON_LOG_LEVEL") {
        filter = filter
            .add_directive(format!("pontoon={}", &level).parse().unwrap())
            .add_directive(format!("pontoon_core={}", &level).parse().unwrap())
            .add_directive(format!("request_handlers={}", &level).parse().unwrap())
            .add_directive(format!("quill={}", &level).parse().unwrap());
    }

    if log_queries {
        filter = filter
            .add_directive("pontoon_core=debug".parse().unwrap())
            .add_directive("quill=debug".parse().unwrap());
    }

    filter
}
