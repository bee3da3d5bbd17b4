use std::{
    path::PathBuf,
    process::{exit, ExitCode},
};

use clap::Parser;

use crate::{
    app_init::{initialize_logging, run_app},
    config::{default_config_path, AppConfig},
    demo::DemoOptions,
    result::{AppError, Result},
};

mod app_init;
mod client;
mod config;
mod demo;
mod domain;
mod logging;
mod result;

/// Post to a Facebook Page and list its most recent posts
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Alternate path to the configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print the path to the configuration file and exit.
    #[arg(short, long)]
    print_config_path: bool,
    /// Run the sequence without calling the Graph API.
    #[arg(long)]
    dry_run: bool,
    /// Number of recent posts to list.
    #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    limit: u32,
    /// Share this link in the test post.
    #[arg(long, value_name = "URL", conflicts_with = "photo_url")]
    link: Option<String>,
    /// Publish the test post as a photo fetched from this URL.
    #[arg(long, value_name = "URL")]
    photo_url: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            ExitCode::from(e.exit_code())
        },
    }
}

fn run(args: Args) -> Result<()> {
    color_eyre::install()
        .map_err(|e| AppError::GeneralError(format!("Failed to install color_eyre: {e}").into()))?;

    let config_path = args.config.unwrap_or_else(default_config_path);

    if args.print_config_path {
        println!("{}", config_path.display());
        exit(0);
    }

    let config = AppConfig::load(&config_path)?;
    let _log_guard = initialize_logging(&config)?;

    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        AppError::GeneralError(format!("Failed to create runtime: {e}").into())
    })?;

    let options = DemoOptions {
        recent_limit: args.limit,
        link: args.link.map(Into::into),
        photo_url: args.photo_url.map(Into::into),
    };
    let mut stdout = std::io::stdout().lock();
    rt.block_on(run_app(&config, args.dry_run, &options, &mut stdout))?;

    Ok(())
}
