use std::env;
use std::fs;
use std::path::Path;

use secrecy::ExposeSecret;
use toml::Value;
use weatherwear_core::config::{resolve_config_path, AppConfig, LoadOptions, LogFormat};

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = resolve_config_path(None);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines =
        vec!["effective config (source precedence: env > file > default):".to_string()];

    for (key_path, value, env_keys) in effective_values(&config) {
        let source = field_source(
            key_path,
            env_keys,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        );
        lines.push(render_line(key_path, &value, source));
    }

    lines.join("\n")
}

type EffectiveValue = (&'static str, String, &'static [&'static str]);

fn effective_values(config: &AppConfig) -> Vec<EffectiveValue> {
    vec![
        field("database.url", config.database.url.clone(), &["WEATHERWEAR_DATABASE_URL"]),
        field(
            "database.max_connections",
            config.database.max_connections.to_string(),
            &["WEATHERWEAR_DATABASE_MAX_CONNECTIONS"],
        ),
        field(
            "database.timeout_secs",
            config.database.timeout_secs.to_string(),
            &["WEATHERWEAR_DATABASE_TIMEOUT_SECS"],
        ),
        field(
            "weather.api_key",
            redact_secret(config.weather.api_key.expose_secret()),
            &["WEATHERWEAR_WEATHER_API_KEY"],
        ),
        field(
            "weather.base_url",
            config.weather.base_url.clone(),
            &["WEATHERWEAR_WEATHER_BASE_URL"],
        ),
        field(
            "weather.language",
            config.weather.language.clone(),
            &["WEATHERWEAR_WEATHER_LANGUAGE"],
        ),
        field(
            "weather.timeout_secs",
            config.weather.timeout_secs.to_string(),
            &["WEATHERWEAR_WEATHER_TIMEOUT_SECS"],
        ),
        field(
            "server.bind_address",
            config.server.bind_address.clone(),
            &["WEATHERWEAR_SERVER_BIND_ADDRESS"],
        ),
        field("server.port", config.server.port.to_string(), &["WEATHERWEAR_SERVER_PORT"]),
        field(
            "server.graceful_shutdown_secs",
            config.server.graceful_shutdown_secs.to_string(),
            &["WEATHERWEAR_SERVER_GRACEFUL_SHUTDOWN_SECS"],
        ),
        field(
            "logging.level",
            config.logging.level.clone(),
            &["WEATHERWEAR_LOGGING_LEVEL", "WEATHERWEAR_LOG_LEVEL"],
        ),
        field(
            "logging.format",
            log_format_label(&config.logging.format).to_string(),
            &["WEATHERWEAR_LOGGING_FORMAT", "WEATHERWEAR_LOG_FORMAT"],
        ),
    ]
}

fn field(
    key_path: &'static str,
    value: String,
    env_keys: &'static [&'static str],
) -> EffectiveValue {
    (key_path, value, env_keys)
}

fn log_format_label(format: &LogFormat) -> &'static str {
    match format {
        LogFormat::Compact => "compact",
        LogFormat::Pretty => "pretty",
        LogFormat::Json => "json",
    }
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

/// Keeps only the last four characters of long secrets.
fn redact_secret(secret: &str) -> String {
    let trimmed = secret.trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    let chars: Vec<char> = trimmed.chars().collect();
    if chars.len() <= 8 {
        return "<redacted>".to_string();
    }

    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("***{tail}")
}
