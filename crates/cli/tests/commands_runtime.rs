use std::env;
use std::sync::{Mutex, OnceLock};

use serde_json::{json, Value};
use weatherwear_cli::commands::{config, doctor, forecast, migrate, seed};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn migrate_returns_success_with_valid_env() {
    with_env(
        &[
            ("WEATHERWEAR_WEATHER_API_KEY", "test-key"),
            ("WEATHERWEAR_DATABASE_URL", "sqlite::memory:"),
        ],
        || {
            let result = migrate::run();
            assert_eq!(result.exit_code, 0, "expected successful migrate run");

            let payload = parse_payload(&result.output);
            assert_eq!(payload["command"], "migrate");
            assert_eq!(payload["status"], "ok");
        },
    );
}

#[test]
fn migrate_returns_config_failure_without_api_key() {
    with_env(&[("WEATHERWEAR_DATABASE_URL", "sqlite::memory:")], || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn seed_loads_catalog_summary() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = file_database_url(&dir);
    let vars =
        [("WEATHERWEAR_WEATHER_API_KEY", "test-key"), ("WEATHERWEAR_DATABASE_URL", url.as_str())];
    with_env(&vars, || {
        let result = seed::run();
        assert_eq!(result.exit_code, 0, "expected seed success: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "seed");
        assert_eq!(payload["status"], "ok");
        let message = payload["message"].as_str().unwrap_or_default();
        assert!(message.contains("  - cold: 10 Pull products"));
        assert!(message.contains("  - mild: 10 Sweat products"));
        assert!(message.contains("  - hot: 10 T-Shirt products"));
    });
}

#[test]
fn seed_is_idempotent_across_runs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = file_database_url(&dir);
    let vars =
        [("WEATHERWEAR_WEATHER_API_KEY", "test-key"), ("WEATHERWEAR_DATABASE_URL", url.as_str())];
    with_env(&vars, || {
        let first = seed::run();
        let second = seed::run();

        assert_eq!(first.exit_code, 0, "{}", first.output);
        assert_eq!(second.exit_code, 0, "{}", second.output);
        assert_eq!(parse_payload(&first.output), parse_payload(&second.output));
    });
}

#[test]
fn config_redacts_api_key_and_attributes_env_source() {
    with_env(
        &[
            ("WEATHERWEAR_WEATHER_API_KEY", "0123456789abcdef"),
            ("WEATHERWEAR_SERVER_PORT", "9100"),
        ],
        || {
            let output = config::run();

            assert!(!output.contains("0123456789abcdef"));
            assert!(output.contains(
                "- weather.api_key = ***cdef (source: env (WEATHERWEAR_WEATHER_API_KEY))"
            ));
            assert!(
                output.contains("- server.port = 9100 (source: env (WEATHERWEAR_SERVER_PORT))")
            );
            assert!(output.contains("- weather.language = fr (source: default)"));
        },
    );
}

#[test]
fn doctor_json_reports_all_checks_passing() {
    with_env(
        &[
            ("WEATHERWEAR_WEATHER_API_KEY", "test-key"),
            ("WEATHERWEAR_DATABASE_URL", "sqlite::memory:"),
        ],
        || {
            let report = parse_payload(&doctor::run(true));

            assert_eq!(report["overall_status"], "pass");
            let names: Vec<&str> = report["checks"]
                .as_array()
                .expect("checks array")
                .iter()
                .filter_map(|check| check["name"].as_str())
                .collect();
            assert_eq!(
                names,
                vec!["config_validation", "weather_api_readiness", "database_connectivity"]
            );
        },
    );
}

#[test]
fn doctor_skips_dependent_checks_when_config_is_invalid() {
    with_env(&[], || {
        let report = parse_payload(&doctor::run(true));

        assert_eq!(report["overall_status"], "fail");
        assert_eq!(report["checks"][0]["status"], "fail");
        assert_eq!(report["checks"][1]["status"], "skipped");
        assert_eq!(report["checks"][2]["status"], "skipped");
    });
}

#[test]
fn forecast_classifies_mocked_provider_reading() {
    let upstream_runtime = tokio::runtime::Runtime::new().expect("runtime");
    let upstream = upstream_runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast.json"))
            .and(query_param("q", "Marseille"))
            .and(query_param("days", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "forecast": {"forecastday": [
                    {"day": {"avgtemp_c": 18.0}},
                    {"day": {"avgtemp_c": 26.5}}
                ]}
            })))
            .mount(&server)
            .await;
        server
    });

    with_env(
        &[
            ("WEATHERWEAR_WEATHER_API_KEY", "test-key"),
            ("WEATHERWEAR_WEATHER_BASE_URL", upstream.uri().as_str()),
        ],
        || {
            let result = forecast::run("Marseille", Some("tomorrow"));
            assert_eq!(result.exit_code, 0, "{}", result.output);

            let payload = parse_payload(&result.output);
            assert_eq!(payload["data"]["is"], "hot");
            assert_eq!(payload["data"]["category"], "hot");
            assert_eq!(payload["data"]["day_offset"], 2);
            assert_eq!(payload["data"]["average_celsius"], 26.5);
        },
    );

    upstream_runtime.block_on(async move { drop(upstream) });
}

#[test]
fn forecast_rejects_out_of_range_date_before_loading_config() {
    with_env(&[], || {
        let result = forecast::run("Marseille", Some("15"));
        assert_eq!(result.exit_code, 7);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "invalid_input");
        assert!(payload["message"].as_str().unwrap_or_default().contains("between 1 and 14"));
    });
}

#[test]
fn forecast_reports_unreachable_provider() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe port");
    let base_url = format!("http://{}", listener.local_addr().expect("probe address"));
    drop(listener);

    with_env(
        &[
            ("WEATHERWEAR_WEATHER_API_KEY", "test-key"),
            ("WEATHERWEAR_WEATHER_BASE_URL", base_url.as_str()),
        ],
        || {
            let result = forecast::run("Paris", None);
            assert_eq!(result.exit_code, 8);

            let payload = parse_payload(&result.output);
            assert_eq!(payload["error_class"], "weather_unavailable");
        },
    );
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn file_database_url(dir: &tempfile::TempDir) -> String {
    format!("sqlite://{}?mode=rwc", dir.path().join("weatherwear.db").display())
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "WEATHERWEAR_DATABASE_URL",
        "WEATHERWEAR_DATABASE_MAX_CONNECTIONS",
        "WEATHERWEAR_DATABASE_TIMEOUT_SECS",
        "WEATHERWEAR_WEATHER_API_KEY",
        "WEATHERWEAR_WEATHER_BASE_URL",
        "WEATHERWEAR_WEATHER_LANGUAGE",
        "WEATHERWEAR_WEATHER_TIMEOUT_SECS",
        "WEATHERWEAR_SERVER_BIND_ADDRESS",
        "WEATHERWEAR_SERVER_PORT",
        "WEATHERWEAR_SERVER_GRACEFUL_SHUTDOWN_SECS",
        "WEATHERWEAR_LOGGING_LEVEL",
        "WEATHERWEAR_LOGGING_FORMAT",
        "WEATHERWEAR_LOG_LEVEL",
        "WEATHERWEAR_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
