//! Interpreter settings.
//!
//! Resolution order: built-in defaults, then the config file, then the
//! environment. The file is `$BF_CONFIG` when set, otherwise `bf.toml` in the
//! XDG config home:
//!
//! ```toml
//! [interpreter]
//! memory_size = 100
//! tape = "trap"    # trap | wrap | grow
//! eof = "error"    # error | zero | max | unchanged
//! trace = false
//! ```
//!
//! Environment overrides: `BF_MEMORY_SIZE`, `BF_TAPE`, `BF_EOF`, `BF_TRACE`.

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use cross_xdg::BaseDirs;

use crate::engine::EofPolicy;
use crate::tape::{DEFAULT_MEMORY_SIZE, MAX_MEMORY_SIZE, TapePolicy};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub memory_size: usize,
    pub tape: TapePolicy,
    pub eof: EofPolicy,
    /// Write a step-by-step execution table to stderr.
    pub trace: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            tape: TapePolicy::Trap,
            eof: EofPolicy::Error,
            trace: false,
        }
    }
}

impl Config {
    /// Defaults, overridden by the config file, overridden by the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut cfg = Config::default();
        if let Some(path) = config_path() {
            match fs::read_to_string(&path) {
                Ok(content) => cfg.apply_toml(&content)?,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(ConfigError::Read { path, source }),
            }
        }
        cfg.apply_env(|key| env::var(key).ok())?;
        Ok(cfg)
    }

    /// Apply the `[interpreter]` section of a small TOML subset.
    /// Keys outside that section, and unknown keys, are ignored.
    pub fn apply_toml(&mut self, content: &str) -> Result<(), ConfigError> {
        let mut in_section = false;
        for line in content.lines() {
            let line = strip_comment(line).trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('[') && line.ends_with(']') {
                in_section = line[1..line.len() - 1].trim() == "interpreter";
                continue;
            }
            if !in_section {
                continue;
            }
            let Some((key, raw)) = line.split_once('=') else {
                continue;
            };
            let raw = raw.trim();
            // Accept quoted or unquoted
            let value = if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
                &raw[1..raw.len() - 1]
            } else {
                raw
            };
            self.set(key.trim(), value)?;
        }
        Ok(())
    }

    /// Apply `BF_*` overrides looked up through `var`.
    pub fn apply_env<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        for (env_key, key) in [
            ("BF_MEMORY_SIZE", "memory_size"),
            ("BF_TAPE", "tape"),
            ("BF_EOF", "eof"),
            ("BF_TRACE", "trace"),
        ] {
            if let Some(value) = var(env_key) {
                self.set(key, &value).map_err(|e| match e {
                    ConfigError::InvalidValue { value, reason, .. } => ConfigError::InvalidValue {
                        key: env_key.to_string(),
                        value,
                        reason,
                    },
                    other => other,
                })?;
            }
        }
        Ok(())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason,
        };

        match key {
            "memory_size" => {
                let size = value
                    .trim()
                    .parse::<usize>()
                    .map_err(|e| invalid(e.to_string()))?;
                if size == 0 {
                    return Err(invalid("the tape needs at least one cell".to_string()));
                }
                if size > MAX_MEMORY_SIZE {
                    return Err(invalid(format!("the tape is limited to {MAX_MEMORY_SIZE} cells")));
                }
                self.memory_size = size;
            }
            "tape" => self.tape = value.parse().map_err(invalid)?,
            "eof" => self.eof = value.parse().map_err(invalid)?,
            "trace" => self.trace = parse_bool(value).ok_or_else(|| invalid("expected a boolean".to_string()))?,
            _ => {}
        }
        Ok(())
    }
}

fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os("BF_CONFIG") {
        return Some(PathBuf::from(path));
    }

    // Linux: ~/.config, Windows: C:\Users\<user>\.config, macOS: ~/.config
    let base_dirs = BaseDirs::new().ok()?;
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push("bf.toml");
    Some(path)
}

fn strip_comment(line: &str) -> &str {
    // Values never contain '#', so the first one starts a comment.
    match line.find('#') {
        Some(i) => &line[..i],
        None => line,
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_trap_and_fail_on_eof() {
        let cfg = Config::default();
        assert_eq!(cfg.memory_size, 100);
        assert_eq!(cfg.tape, TapePolicy::Trap);
        assert_eq!(cfg.eof, EofPolicy::Error);
        assert!(!cfg.trace);
    }

    #[test]
    fn toml_section_is_applied() {
        let mut cfg = Config::default();
        cfg.apply_toml(
            r#"
            # interpreter settings
            [colors]
            tape = "grow"

            [interpreter]
            memory_size = 30000
            tape = "wrap"   # modulo
            eof = zero
            trace = true
            unknown = "ignored"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.memory_size, 30000);
        assert_eq!(cfg.tape, TapePolicy::Wrap);
        assert_eq!(cfg.eof, EofPolicy::Zero);
        assert!(cfg.trace);
    }

    #[test]
    fn toml_invalid_value_is_reported() {
        let mut cfg = Config::default();
        let err = cfg.apply_toml("[interpreter]\nmemory_size = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "memory_size"));
    }

    #[test]
    fn oversized_memory_is_rejected() {
        let mut cfg = Config::default();
        let err = cfg
            .apply_env(|k| (k == "BF_MEMORY_SIZE").then(|| usize::MAX.to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "BF_MEMORY_SIZE"));
        assert_eq!(cfg.memory_size, DEFAULT_MEMORY_SIZE);

        cfg.apply_toml(&format!("[interpreter]\nmemory_size = {MAX_MEMORY_SIZE}\n")).unwrap();
        assert_eq!(cfg.memory_size, MAX_MEMORY_SIZE);
    }

    #[test]
    fn env_overrides_use_env_key_in_errors() {
        let vars: HashMap<&str, &str> = [("BF_EOF", "unchanged"), ("BF_MEMORY_SIZE", "8")].into();
        let mut cfg = Config::default();
        cfg.apply_env(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(cfg.eof, EofPolicy::Unchanged);
        assert_eq!(cfg.memory_size, 8);

        let err = cfg
            .apply_env(|k| (k == "BF_TAPE").then(|| "spiral".to_string()))
            .unwrap_err();
        assert!(err.to_string().starts_with("invalid value 'spiral' for BF_TAPE"));
    }

    #[test]
    fn booleans_accept_common_spellings() {
        assert_eq!(parse_bool("Yes"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
