use clap::Parser;
use colored::Colorize;

use pingd::cli::Cli;
use pingd::config::init_config;
use pingd::errors::PingdError;
use pingd::runtime::modes::{self, Mode, detect_mode};
use pingd::system::logging::init_logging;
use pingd::system::panic_handler::{RunMode, install_panic_hook};

#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        match e.downcast_ref::<PingdError>() {
            Some(err) => eprintln!("{}", err.format_colored()),
            None => eprintln!("{} {:#}", "[ERROR]".red().bold(), e),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.as_deref();

    match detect_mode(cli.command.as_ref()) {
        Mode::Cli => {
            install_panic_hook(RunMode::Cli);
            if let Some(command) = cli.command.as_ref() {
                modes::run_cli(command, config_path)?;
            }
            Ok(())
        }
        Mode::Server => {
            let config = init_config(config_path)?;

            // guard 必须存活到进程结束，否则异步日志会丢失
            let _log_guard = init_logging(&config.logging)?;
            install_panic_hook(RunMode::Server);

            tracing::info!(
                "pingd v{} starting (pid {})",
                env!("CARGO_PKG_VERSION"),
                std::process::id()
            );

            modes::run_server(config).await
        }
    }
}
