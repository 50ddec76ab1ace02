use std::env;

pub const DEFAULT_COUNT: u32 = 10;
pub const DEFAULT_MAX_SKIP: u64 = 100_000;

pub const COUNT_ENV: &str = "XS128P_DEFAULT_COUNT";
pub const MAX_SKIP_ENV: &str = "XS128P_MAX_SKIP";

/// Fallbacks for flags the user did not pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CliDefaults {
    pub count: u32,
    pub max_skip: u64,
}

impl Default for CliDefaults {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            max_skip: DEFAULT_MAX_SKIP,
        }
    }
}

impl CliDefaults {
    pub fn from_env() -> Self {
        Self {
            count: read_env_u32(COUNT_ENV, DEFAULT_COUNT),
            max_skip: read_env_u64_allow_zero(MAX_SKIP_ENV, DEFAULT_MAX_SKIP),
        }
    }
}

pub(crate) fn read_env_u32(name: &str, default: u32) -> u32 {
    parse_env_value(name, env::var(name).ok(), default)
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub(crate) fn read_env_u64_allow_zero(name: &str, default: u64) -> u64 {
    parse_env_value(name, env::var(name).ok(), default).unwrap_or(default)
}

fn parse_env_value<T>(name: &str, raw: Option<String>, default: T) -> Option<T>
where
    T: std::str::FromStr + std::fmt::Display,
{
    let raw = raw?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(
                "{} is not a valid number ({:?}). Falling back to {}.",
                name,
                raw,
                default
            );
            None
        }
    }
}
