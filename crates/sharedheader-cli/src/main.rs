mod cli;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use sharedheader_tui::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("SHAREDHEADER_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "sharedheader", &mut std::io::stdout());
        return Ok(());
    }

    let config = match handlers::config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => output::output_error(&e.to_string()),
    };

    match cli.command {
        None => {
            let config = config.with_header_height(cli.header_rows.max(1) as f32);
            let mut app = App::new(config)?;
            app.run().await?;
        }
        Some(cmd) => {
            let result = match cmd {
                Commands::Simulate(args) => handlers::simulate::handle(config, &args.script).await,
                Commands::Config { format } => handlers::config::handle(&config, format),
                Commands::Completions { .. } => Ok(()),
            };
            if let Err(e) = result {
                output::output_error(&format!("{:#}", e));
            }
        }
    }

    Ok(())
}
