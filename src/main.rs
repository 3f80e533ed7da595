//! payroll-engine HTTP server
//!
//! Serves the payroll API over the statutory schedule found in
//! `--config-dir`, or the built-in 2024 schedule when none is given.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "payroll-engine", version, about = "Nigerian statutory payroll engine")]
struct Cli {
    /// Directory holding schedule.yaml, paye.yaml and deductions.yaml
    #[arg(long, env = "PAYROLL_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "PAYROLL_BIND", default_value = "127.0.0.1:8080")]
    bind: String,
}

/// `RUST_LOG` when set and valid, otherwise `info`.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    info!("Starting payroll-engine v{}", env!("CARGO_PKG_VERSION"));

    let loader = match &cli.config_dir {
        Some(dir) => ConfigLoader::load(dir)
            .with_context(|| format!("loading statutory schedule from {}", dir.display()))?,
        None => ConfigLoader::builtin(),
    };
    info!(
        schedule_code = %loader.metadata().code,
        effective_date = %loader.metadata().effective_date,
        brackets = loader.config().brackets().len(),
        "Statutory schedule loaded"
    );

    let app = create_router(AppState::new(loader));

    let listener = TcpListener::bind(&cli.bind)
        .await
        .with_context(|| format!("binding {}", cli.bind))?;
    info!("Listening on http://{}", cli.bind);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(
            log_filter(Some("payroll_engine=loud")).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }

    #[test]
    fn test_log_filter_honours_more_verbose_level() {
        assert_eq!(
            log_filter(Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            log_filter(Some("payroll_engine=trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }
}
