#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiURL,
    ConfigFile,
    NotificationDuration,
    PollInterval,
    PollMaxAttempts,
    RequestTimeout,
    SessionFile,
}

fn app_dir() -> path::PathBuf {
    return dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("gradpath");
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return Config::default(key);
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    /// Reads a millisecond valued key, falling back to its default when the
    /// stored value does not parse.
    pub fn get_duration(key: ConfigKey) -> Duration {
        let millis = Config::get(key)
            .parse::<u64>()
            .or_else(|_| return Config::default(key).parse::<u64>())
            .unwrap_or(0);

        return Duration::from_millis(millis);
    }

    pub fn get_u32(key: ConfigKey) -> u32 {
        return Config::get(key)
            .parse::<u32>()
            .or_else(|_| return Config::default(key).parse::<u32>())
            .unwrap_or(0);
    }

    pub fn default(key: ConfigKey) -> String {
        let config_path = app_dir().join("config.toml");
        let session_path = app_dir().join("session.yaml");

        let res = match key {
            ConfigKey::ApiURL => "http://localhost:8000",
            ConfigKey::NotificationDuration => "3000",
            ConfigKey::PollInterval => "1000",
            ConfigKey::PollMaxAttempts => "30",
            ConfigKey::RequestTimeout => "30000",

            // Special
            ConfigKey::ConfigFile => return config_path.to_string_lossy().to_string(),
            ConfigKey::SessionFile => return session_path.to_string_lossy().to_string(),
        };

        return res.to_string();
    }

    /// Checks a raw value for `key`. Durations must be positive whole
    /// milliseconds and counts must be whole numbers.
    pub fn validate(key: ConfigKey, val: &str) -> Result<(), String> {
        match key {
            ConfigKey::PollInterval | ConfigKey::RequestTimeout => {
                match val.trim().parse::<u64>() {
                    Ok(millis) if millis > 0 => return Ok(()),
                    _ => {
                        return Err(format!(
                            "'{val}' must be a whole number of milliseconds greater than zero"
                        ));
                    }
                }
            }
            ConfigKey::NotificationDuration => {
                if val.trim().parse::<u64>().is_err() {
                    return Err(format!("'{val}' must be a whole number of milliseconds"));
                }
                return Ok(());
            }
            ConfigKey::PollMaxAttempts => {
                if val.trim().parse::<u32>().is_err() {
                    return Err(format!("'{val}' must be a whole number"));
                }
                return Ok(());
            }
            ConfigKey::ApiURL | ConfigKey::ConfigFile | ConfigKey::SessionFile => return Ok(()),
        }
    }

    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            Config::load_toml(&cmd, &toml_str)?;
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            api_url = Config::get(ConfigKey::ApiURL),
            poll_interval = Config::get(ConfigKey::PollInterval),
            poll_max_attempts = Config::get(ConfigKey::PollMaxAttempts),
            session_file = Config::get(ConfigKey::SessionFile),
            "config"
        );

        return Ok(());
    }

    fn load_toml(cmd: &Command, toml_str: &str) -> Result<()> {
        let doc = toml_str.parse::<toml_edit::Document>()?;

        for key in ConfigKey::iter() {
            let val = match doc.get(&key.to_string()) {
                Some(val) => val,
                None => continue,
            };

            if let Some(val_int) = val.as_integer() {
                if val_int < 0 {
                    bail!(format!(
                        "config.toml has an invalid value for key '{key}': {val_int}\nValue must not be negative"
                    ));
                }
                if let Err(err) = Config::validate(key, &val_int.to_string()) {
                    bail!(format!("config.toml has an invalid value for key '{key}': {err}"));
                }
                Config::set(key, &val_int.to_string());
                continue;
            }

            if let Some(val_str) = val.as_str() {
                if val_str.is_empty() {
                    continue;
                }

                // Use clap value parsers to do validation.
                let possible_values = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))
                    .map(|arg| {
                        return arg
                            .get_possible_values()
                            .iter()
                            .map(|e| return e.get_name().to_string())
                            .collect::<Vec<String>>();
                    })
                    .unwrap_or_default();

                if !possible_values.is_empty() && !possible_values.contains(&val_str.to_string())
                {
                    bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
                }
                if let Err(err) = Config::validate(key, val_str) {
                    bail!(format!("config.toml has an invalid value for key '{key}': {err}"));
                }
                Config::set(key, val_str);
                continue;
            }

            bail!(format!(
                "config.toml has an invalid value for key '{key}': expected a string or an integer"
            ));
        }

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i64>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
