use anyhow::Context;
use bot::Bot;
use cli::ARGS;
use db::SqliteStore;

mod bot;
mod cli;
mod codec;
mod commands;
mod config;
mod db;
mod guard;
mod handler;
mod util;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(
        if cfg!(debug_assertions) {
            "DEBUG"
        } else {
            "INFO"
        },
    ));

    let config = config::load(&ARGS.config)
        .with_context(|| format!("failed to load config from {}", ARGS.config.display()))?;

    let db_path = ARGS.database.as_ref().unwrap_or(&config.database.path);
    let store = SqliteStore::open(db_path)
        .await
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;

    let self_id = config.bot.self_id;
    let bot = Bot::new(config.greeting, self_id.as_str(), store)
        .max_override_graphemes(config.commands.max_override_graphemes)
        .add_commands(commands::all(&self_id));

    log::info!("welcome bot started as {self_id}");

    bot.run(tokio::io::stdin(), tokio::io::stdout()).await?;
    Ok(())
}
