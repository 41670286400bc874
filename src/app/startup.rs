use crate::app::cli::args::Args;
use crate::app::cli::config::load_config_file;
use crate::app::soak::{print_report, run_soak};
use crate::core::logging::init_logging;
use clap::Parser;
use std::process::ExitCode;

/// Initialize the application and run the soak test
pub fn startup() -> ExitCode {
    let args = Args::parse();
    let use_color = args.use_color();
    colored::control::set_override(use_color);

    let log_file = args.log_file.as_ref().map(|p| p.to_string_lossy().to_string());
    if let Err(e) = init_logging(
        args.log_level.as_deref(),
        args.log_format.as_deref(),
        log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Error: failed to initialise logging: {}", e);
        return ExitCode::FAILURE;
    }

    let settings = match load_config_file(args.config_file.as_deref())
        .and_then(|config| args.resolve(config.as_ref()))
    {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("FATAL: {}", e);
            return ExitCode::FAILURE;
        }
    };
    log::debug!("Resolved settings: {:?}", settings);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("FATAL: failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run_soak(&settings)) {
        Ok(report) => {
            print_report(&report);
            if report.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            log::error!("FATAL: {}", e);
            ExitCode::FAILURE
        }
    }
}
