use std::path::{Path, PathBuf};

use config::{ConfigError, Environment, File, Source};
use serde::Deserialize;
use smart_default::SmartDefault;
use welcome_core::GreetingConfig;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub bot: Bot,
    #[serde(default)]
    pub database: Database,
    #[serde(default)]
    pub commands: Commands,
    #[serde(default)]
    pub greeting: GreetingConfig,
}

#[derive(Debug, Deserialize)]
pub struct Bot {
    /// our own user id, events about it are ignored
    pub self_id: String,
}

#[derive(Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Database {
    #[default(_code = "PathBuf::from(\"welcome.sqlite3\")")]
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Commands {
    /// stored overrides get cut to this many graphemes
    #[default = 200]
    pub max_override_graphemes: usize,
}

/// separates entries of the greeting lists when set from the environment
const ENV_LIST_SEPARATOR: &str = "|";

fn environment() -> Environment {
    Environment::with_prefix("WELCOME")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(ENV_LIST_SEPARATOR)
        .with_list_parse_key("greeting.welcome_list")
        .with_list_parse_key("greeting.exit_list")
}

fn from_sources(
    file: impl Source + Send + Sync + 'static,
    env: Environment,
) -> Result<Config, ConfigError> {
    config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?
        .try_deserialize()
}

fn from_source(source: impl Source + Send + Sync + 'static) -> Result<Config, ConfigError> {
    from_sources(source, environment())
}

/// reads the config file, `WELCOME__SECTION__KEY` variables take precedence.
///
/// List values from the environment are split on `|`, as in
/// `WELCOME__GREETING__WELCOME_LIST="hi (@)|o/"`.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    from_source(File::from(path))
}

#[cfg(test)]
mod tests {
    use config::FileFormat;
    use welcome_core::MentionTag;

    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = from_source(File::from_str(
            r#"
            [bot]
            self_id = "1234"
            "#,
            FileFormat::Toml,
        ))
        .unwrap();

        assert_eq!(config.bot.self_id, "1234");
        assert_eq!(config.database.path, PathBuf::from("welcome.sqlite3"));
        assert_eq!(config.commands.max_override_graphemes, 200);
        assert_eq!(config.greeting, GreetingConfig::default());
    }

    #[test]
    fn greeting_section() {
        let config = from_source(File::from_str(
            r#"
            [bot]
            self_id = "1234"

            [greeting]
            private = true
            mention = "name"
            welcome_list = ["hey (@)", "o/"]
            exit_list = []
            "#,
            FileFormat::Toml,
        ))
        .unwrap();

        assert!(config.greeting.private);
        assert!(!config.greeting.fit);
        assert_eq!(config.greeting.mention, MentionTag::Name);
        assert_eq!(config.greeting.welcome_list, ["hey (@)", "o/"]);
        assert!(config.greeting.exit_list.is_empty());
    }

    #[test]
    fn environment_overrides_file() {
        let env = [
            ("WELCOME__GREETING__WELCOME_LIST", "hi (@)|o/"),
            ("WELCOME__GREETING__FIT", "true"),
            ("WELCOME__COMMANDS__MAX_OVERRIDE_GRAPHEMES", "50"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();

        let config = from_sources(
            File::from_str(
                r#"
                [bot]
                self_id = "1234"

                [greeting]
                welcome_list = ["from the file"]
                exit_list = ["cya"]
                "#,
                FileFormat::Toml,
            ),
            environment().source(Some(env)),
        )
        .unwrap();

        assert!(config.greeting.fit);
        assert_eq!(config.greeting.welcome_list, ["hi (@)", "o/"]);
        assert_eq!(config.greeting.exit_list, ["cya"]);
        assert_eq!(config.commands.max_override_graphemes, 50);
    }

    #[test]
    fn bot_section_is_required() {
        assert!(from_source(File::from_str("", FileFormat::Toml)).is_err());
    }
}
