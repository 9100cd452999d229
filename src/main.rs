use std::process::ExitCode;

use clap::Parser;
use shakmaty::Chess;
use tbserve::{
    config::{Config, Variant, exit_code_for},
    server,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::try_parse() {
        Ok(config) => config,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(exit_code_for(&err));
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let served = match config.variant {
        Variant::Chess => server::serve::<Chess>(&config).await,
        #[cfg(feature = "variant")]
        Variant::Atomic => server::serve::<shakmaty::variant::Atomic>(&config).await,
    };

    match served {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
