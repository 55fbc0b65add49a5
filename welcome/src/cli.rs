use std::{path::PathBuf, sync::LazyLock};

use clap::Parser;

pub static ARGS: LazyLock<Args> = LazyLock::new(|| {
    let dotenv_found = dotenvy::dotenv().is_ok();
    if !dotenv_found {
        log::warn!(".env file was not found")
    }

    Args::parse()
});

/// Greets users joining and leaving rooms. Reads host events as JSON lines on
/// stdin and writes messages to send as JSON lines on stdout.
#[derive(clap::Parser)]
pub struct Args {
    #[arg(long, env = "WELCOME_CONFIG")]
    #[cfg_attr(debug_assertions, arg(default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml")))]
    pub config: PathBuf,
    /// overrides `database.path` from the config file
    #[arg(long, env = "WELCOME_DATABASE")]
    pub database: Option<PathBuf>,
}
