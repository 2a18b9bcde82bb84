//! Binary entrypoint for the `gvt` CLI.

use std::process::ExitCode;

use gvt::config::Config;
use gvt::error::GvtError;

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };
    gvt::init_tracing(&config.log_filter);

    match gvt::run(&config, std::env::args_os()) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            if let GvtError::Io { context, source, .. } = &err {
                tracing::error!(%context, error = %source, "filesystem operation failed");
            }
            eprintln!("{err}");
            ExitCode::from(err.process_status())
        }
    }
}
