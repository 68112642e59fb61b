//! Runtime configuration for the report binary.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file. Variables already set in the environment take precedence over the file.

use crate::energy::day::Day;
use std::path::{Path, PathBuf};

pub const DEFAULT_FAKE_DAYS: u32 = 30;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProfileKind {
    /// Timestamps within a single day, `0..1440`.
    Day,
    /// Timestamps counted from midnight of day 1.
    Month,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON profile to read. Optional when a fake seed is configured.
    pub profile_path: Option<PathBuf>,
    pub profile_kind: ProfileKind,
    /// Restrict a month report to one day.
    pub report_day: Option<Day>,
    /// Generate a synthetic profile instead of reading one.
    pub fake_seed: Option<u64>,
    pub output: OutputFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let profile_path = get("ENERGY_PROFILE_PATH").map(PathBuf::from);

        let fake_seed = match get("ENERGY_FAKE_SEED") {
            Some(s) => Some(parse_seed(&s).ok_or_else(|| format!("ENERGY_FAKE_SEED is not a valid seed: {}", s))?),
            None => None,
        };

        if profile_path.is_none() && fake_seed.is_none() {
            return Err("Missing profile: set ENERGY_PROFILE_PATH or ENERGY_FAKE_SEED".to_string());
        }

        let profile_kind = match get("ENERGY_PROFILE_KIND").as_deref() {
            None | Some("day") => ProfileKind::Day,
            Some("month") => ProfileKind::Month,
            Some(other) => return Err(format!("ENERGY_PROFILE_KIND must be `day` or `month`, got `{}`", other)),
        };

        let report_day = match get("ENERGY_REPORT_DAY") {
            Some(s) => {
                let value = s
                    .parse::<f64>()
                    .map_err(|_| format!("ENERGY_REPORT_DAY must be a number, got `{}`", s))?;
                Some(Day::try_from(value).map_err(|e| format!("ENERGY_REPORT_DAY: {}", e))?)
            }
            None => None,
        };
        if report_day.is_some() && profile_kind != ProfileKind::Month {
            return Err("ENERGY_REPORT_DAY requires ENERGY_PROFILE_KIND=month".to_string());
        }

        let output = match get("ENERGY_OUTPUT").as_deref() {
            None | Some("text") => OutputFormat::Text,
            Some("json") => OutputFormat::Json,
            Some(other) => return Err(format!("ENERGY_OUTPUT must be `text` or `json`, got `{}`", other)),
        };

        Ok(Config {
            profile_path,
            profile_kind,
            report_day,
            fake_seed,
            output,
        })
    }
}

/// Decimal or `0x`-prefixed hexadecimal.
fn parse_seed(s: &str) -> Option<u64> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16).ok(),
        None => s.replace('_', "").parse().ok(),
    }
}

/// Load `KEY=value` lines from `path` into the process environment.
///
/// Keys that are already set are left untouched.
pub fn load_env_file(path: &Path) -> Result<(), String> {
    let contents = std::fs::read_to_string(path).map_err(|e| format!("failed to read {}: {}", path.display(), e))?;

    for (index, line) in contents.lines().enumerate() {
        let assignment = parse_env_line(line).map_err(|e| format!("{}:{}: {}", path.display(), index + 1, e))?;
        if let Some((key, value)) = assignment
            && std::env::var_os(&key).is_none()
        {
            // Updating process-level environment variables is unsafe on some targets.
            unsafe {
                std::env::set_var(key, value);
            }
        }
    }

    Ok(())
}

/// Parse one `.env` line. Blank lines and comments yield `None`.
pub fn parse_env_line(line: &str) -> Result<Option<(String, String)>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let line = line.strip_prefix("export ").map(str::trim_start).unwrap_or(line);

    let (key, raw) = line.split_once('=').ok_or_else(|| "missing '=' in assignment".to_string())?;
    let key = key.trim();
    if key.is_empty() {
        return Err("environment variable name cannot be empty".to_string());
    }
    if key.contains(char::is_whitespace) {
        return Err(format!("environment variable name contains whitespace: {}", key));
    }

    let raw = raw.trim();
    let value = if let Some(rest) = raw.strip_prefix('"') {
        quoted_value(rest, '"')?
    } else if let Some(rest) = raw.strip_prefix('\'') {
        quoted_value(rest, '\'')?
    } else {
        raw.split('#').next().unwrap_or_default().trim_end().to_string()
    };

    Ok(Some((key.to_string(), value)))
}

/// Value up to the closing `quote`. Escapes only apply inside double quotes.
fn quoted_value(input: &str, quote: char) -> Result<String, String> {
    let mut value = String::new();
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if ch == quote {
            let rest = chars.as_str().trim();
            if rest.is_empty() || rest.starts_with('#') {
                return Ok(value);
            }
            return Err(format!("unexpected characters after closing {} quote", quote));
        }
        if ch == '\\' && quote == '"' {
            let escaped = chars
                .next()
                .ok_or_else(|| "unterminated escape sequence in double-quoted value".to_string())?;
            value.push(match escaped {
                'n' => '\n',
                'r' => '\r',
                't' => '\t',
                other => other,
            });
        } else {
            value.push(ch);
        }
    }

    Err(format!("unterminated {} quoted value", quote))
}
