use pontoon::cli::CliCommand;
use pontoon::context::EngineContext;
use pontoon::error::EngineError;
use pontoon::logger::Logger;
use pontoon::opt::PontoonOpt;
use pontoon::{server, LogFormat};
use std::{process, sync::Arc};
use structopt::StructOpt;
use tracing::error;

#[tokio::main]
async fn main() {
    let opts = PontoonOpt::from_args();

    let mut logger = Logger::new("pontoon-http");
    logger.log_format(opts.log_format());
    logger.log_queries(opts.log_queries);
    logger.install().unwrap();

    if let Err(err) = run(opts).await {
        error!("Encountered error during initialization: {err}");
        process::exit(1);
    }
}

async fn run(opts: PontoonOpt) -> Result<(), EngineError> {
    match CliCommand::from_opt(&opts) {
        Some(cmd) => cmd.execute(&opts).await,
        None => {
            set_panic_hook(opts.log_format());

            let cx = Arc::new(EngineContext::new(&opts).await?);
            server::listen(cx, &opts).await
        }
    }
}

fn set_panic_hook(log_format: LogFormat) {
    if let LogFormat::Json = log_format {
        std::panic::set_hook(Box::new(|info| {
            let payload = info
                .payload()
                .downcast_ref::<String>()
                .map(Clone::clone)
                .unwrap_or_else(|| {
                    info.payload()
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .unwrap_or_default()
                });

            match info.location() {
                Some(location) => {
                    tracing::event!(
                        tracing::Level::ERROR,
                        message = "PANIC",
                        reason = payload.as_str(),
                        file = location.file(),
                        line = location.line(),
                        column = location.column(),
                    );
                }
                None => {
                    tracing::event!(tracing::Level::ERROR, message = "PANIC", reason = payload.as_str());
                }
            }

            std::process::exit(255);
        }));
    }
}
