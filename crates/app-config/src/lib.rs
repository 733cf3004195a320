// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, BacktestSettings, EngineSettings, Settings, ZooSettings};

/// Loads the application settings from the `config/` directory.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
    load_settings_from(Path::new("config"), &environment)
}

/// Loads settings from an explicit directory and environment name.
pub fn load_settings_from(config_dir: &Path, environment: &str) -> Result<Settings> {
    load_layered(config_dir, environment, env_overrides())
}

/// Settings from environment variables (e.g., `APP__ENGINE__PERIODS=500`).
fn env_overrides() -> Environment {
    Environment::with_prefix("APP")
        .separator("__")
        .try_parsing(true)
}

fn load_layered(config_dir: &Path, environment: &str, overrides: Environment) -> Result<Settings> {
    let base = config_dir.join("base");
    let overlay = config_dir.join(environment);

    let settings = Config::builder()
        // 1. Load the base configuration file.
        .add_source(File::with_name(&base.to_string_lossy()))
        // 2. Load the environment-specific configuration file.
        .add_source(File::with_name(&overlay.to_string_lossy()).required(false))
        // 3. Load settings from environment variables.
        .add_source(overrides)
        .build()?;

    // Deserialize the configuration into our `Settings` struct.
    let mut settings: Settings = settings.try_deserialize()?;
    settings.app.environment = environment.to_string();

    validate(&settings)?;
    Ok(settings)
}

fn validate(settings: &Settings) -> Result<()> {
    let engine = &settings.engine;
    if !(engine.daily_std.is_finite() && engine.daily_std >= 0.0) {
        return Err(Error::Invalid(format!(
            "engine.daily_std must be a non-negative number, got {}",
            engine.daily_std
        )));
    }
    if !(0.0..=1.0).contains(&engine.in_sample_fraction) {
        return Err(Error::Invalid(format!(
            "engine.in_sample_fraction must lie in [0, 1], got {}",
            engine.in_sample_fraction
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const BASE: &str = r#"
[app]
log_level = "debug"

[engine]
periods = 780
daily_std = 0.0185

[[backtest.rules]]
name = "ma_crossover"
params = { fast_period = 20, slow_period = 50 }
"#;

    #[test]
    fn loads_base_file_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("base.toml"), BASE).unwrap();

        let settings = load_settings_from(dir.path(), "test").unwrap();
        assert_eq!(settings.app.log_level, "debug");
        assert_eq!(settings.app.environment, "test");
        assert_eq!(settings.engine.periods, 780);
        assert_eq!(settings.engine.in_sample_fraction, 0.7);
        assert_eq!(settings.zoo.initial_size, 20);
        assert_eq!(settings.zoo.evolve_batch, 47);
        assert_eq!(settings.backtest.rules.len(), 1);
        assert_eq!(settings.backtest.rules[0].name, "ma_crossover");
    }

    #[test]
    fn environment_file_overrides_base() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("base.toml"), BASE).unwrap();
        fs::write(
            dir.path().join("research.toml"),
            "[engine]\ndaily_std = 0.012\n\n[zoo]\ntop_n = 3\n",
        )
        .unwrap();

        let settings = load_settings_from(dir.path(), "research").unwrap();
        assert_eq!(settings.engine.daily_std, 0.012);
        assert_eq!(settings.engine.periods, 780);
        assert_eq!(settings.zoo.top_n, 3);
        assert_eq!(settings.engine.synthetic_params().daily_std, 0.012);
    }

    fn fake_env(vars: &[(&str, &str)]) -> Environment {
        let vars = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        env_overrides().source(Some(vars))
    }

    #[test]
    fn environment_variables_override_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("base.toml"), BASE).unwrap();
        fs::write(dir.path().join("research.toml"), "[engine]\nperiods = 600\n").unwrap();

        let env = fake_env(&[("APP__ENGINE__PERIODS", "500"), ("APP__ZOO__TOP_N", "3")]);
        let settings = load_layered(dir.path(), "research", env).unwrap();
        assert_eq!(settings.engine.periods, 500);
        assert_eq!(settings.zoo.top_n, 3);
        assert_eq!(settings.engine.daily_std, 0.0185);
    }

    #[test]
    fn environment_variables_are_validated() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("base.toml"), BASE).unwrap();

        let env = fake_env(&[("APP__ENGINE__IN_SAMPLE_FRACTION", "2.0")]);
        assert!(matches!(
            load_layered(dir.path(), "development", env),
            Err(Error::Invalid(_))
        ));
    }

    #[test]
    fn missing_base_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_settings_from(dir.path(), "development"),
            Err(Error::LoadError(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_split() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("base.toml"),
            "[engine]\nin_sample_fraction = 1.5\n",
        )
        .unwrap();
        assert!(matches!(
            load_settings_from(dir.path(), "development"),
            Err(Error::Invalid(_))
        ));
    }
}
