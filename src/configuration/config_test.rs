use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();

    assert!(toml_res.is_ok());
    assert!(res.contains("model = \"gpt-4o-mini\""));
    assert!(res.contains("# openai-token = \"\""));
}

#[test]
fn it_returns_defaults() {
    assert_eq!(
        Config::default(ConfigKey::OpenAiURL),
        "https://api.openai.com"
    );
    assert_eq!(Config::default(ConfigKey::BackendHealthCheckTimeout), "1000");
}

// Config is process-wide state, so file loading and failure handling are
// exercised in a single test to keep them from racing each other.
#[tokio::test]
async fn it_loads_config_from_file_and_flags() -> Result<()> {
    let bad_matches =
        cli::build().try_get_matches_from(vec!["remix", "-c", "./test/bad-config.toml"])?;
    assert!(Config::load(vec![&bad_matches]).await.is_err());

    let matches = cli::build().try_get_matches_from(vec![
        "remix",
        "-c",
        "./config.example.toml",
        "--openai-url",
        "http://localhost:8000",
    ])?;
    Config::load(vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::Model), "gpt-4o-mini");
    assert_eq!(Config::get(ConfigKey::OpenAiURL), "http://localhost:8000");

    return Ok(());
}
