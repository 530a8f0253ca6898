//! Configuration discovery and effective settings resolution.
//!
//! Relint reads `relint.toml|yaml|yml` from the repository root (or closest
//! ancestor) and merges it with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `output`: `human`
//! - `show_disabled`: false
//! - `pylint.prefix`: unset (resolve `pylint` on `PATH`)
//! - `pylint.codes.*`: unset (a lint run then fails: at least one is required)
//!
//! Overrides precedence: CLI > config file > defaults.
//!
//! The linter itself never reads files or the environment for settings: it
//! receives a `LinterSettings`, built from any `ConfigStore`.

use crate::error::RelintError;
use crate::severity::SeverityPatterns;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const KEY_PREFIX: &str = "lint.pylint.prefix";
pub const KEY_ASTNG_PREFIX: &str = "lint.pylint.logilab_astng.prefix";
pub const KEY_COMMON_PREFIX: &str = "lint.pylint.logilab_common.prefix";
pub const KEY_OPTIONS: &str = "lint.pylint.options";
pub const KEY_CODES_ERROR: &str = "lint.pylint.codes.error";
pub const KEY_CODES_WARNING: &str = "lint.pylint.codes.warning";
pub const KEY_CODES_ADVICE: &str = "lint.pylint.codes.advice";

const CONFIG_FILES: [&str; 3] = ["relint.toml", "relint.yaml", "relint.yml"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
/// A configuration value: one string or a list of strings.
pub enum ConfigValue {
    Str(String),
    List(Vec<String>),
}

impl ConfigValue {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            ConfigValue::Str(s) => vec![s],
            ConfigValue::List(v) => v,
        }
    }

    /// First string of the value, if any.
    pub fn into_single(self) -> Option<String> {
        self.into_vec().into_iter().next()
    }
}

/// Key-value lookup the linter settings are read from.
pub trait ConfigStore {
    fn get(&self, key: &str) -> Option<ConfigValue>;
}

impl ConfigStore for HashMap<String, ConfigValue> {
    fn get(&self, key: &str) -> Option<ConfigValue> {
        HashMap::get(self, key).cloned()
    }
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Severity patterns under `[pylint.codes]`.
pub struct CodesCfg {
    pub error: Option<ConfigValue>,
    pub warning: Option<ConfigValue>,
    pub advice: Option<ConfigValue>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Tool section under `[pylint]`.
pub struct PylintCfg {
    pub prefix: Option<String>,
    pub logilab_astng_prefix: Option<String>,
    pub logilab_common_prefix: Option<String>,
    pub options: Option<ConfigValue>,
    pub codes: Option<CodesCfg>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `relint.toml|yaml`.
pub struct RelintConfig {
    pub output: Option<String>,
    pub show_disabled: Option<bool>,
    pub pylint: Option<PylintCfg>,
}

impl ConfigStore for RelintConfig {
    fn get(&self, key: &str) -> Option<ConfigValue> {
        let py = self.pylint.as_ref()?;
        let codes = py.codes.as_ref();
        match key {
            KEY_PREFIX => py.prefix.clone().map(ConfigValue::Str),
            KEY_ASTNG_PREFIX => py.logilab_astng_prefix.clone().map(ConfigValue::Str),
            KEY_COMMON_PREFIX => py.logilab_common_prefix.clone().map(ConfigValue::Str),
            KEY_OPTIONS => py.options.clone(),
            KEY_CODES_ERROR => codes.and_then(|c| c.error.clone()),
            KEY_CODES_WARNING => codes.and_then(|c| c.warning.clone()),
            KEY_CODES_ADVICE => codes.and_then(|c| c.advice.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// Explicit settings handed to the linter at construction.
pub struct LinterSettings {
    pub prefix: Option<PathBuf>,
    pub astng_prefix: Option<PathBuf>,
    pub common_prefix: Option<PathBuf>,
    pub options: Vec<String>,
    pub patterns: SeverityPatterns,
}

impl LinterSettings {
    pub fn from_store(store: &dyn ConfigStore) -> Self {
        // Blank prefixes count as unset.
        let path = |key: &str| {
            store
                .get(key)
                .and_then(ConfigValue::into_single)
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
        };
        let list = |key: &str| store.get(key).map(ConfigValue::into_vec).unwrap_or_default();
        LinterSettings {
            prefix: path(KEY_PREFIX),
            astng_prefix: path(KEY_ASTNG_PREFIX),
            common_prefix: path(KEY_COMMON_PREFIX),
            options: list(KEY_OPTIONS),
            patterns: SeverityPatterns {
                error: list(KEY_CODES_ERROR),
                warning: list(KEY_CODES_WARNING),
                advice: list(KEY_CODES_ADVICE),
            },
        }
    }

    /// Prefixes whose library directories go on the auxiliary search path,
    /// tool prefix first.
    pub fn library_prefixes(&self) -> Vec<&Path> {
        [&self.prefix, &self.astng_prefix, &self.common_prefix]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .collect()
    }
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_found: bool,
    pub output: String,
    pub show_disabled: bool,
    pub settings: LinterSettings,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `relint.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `RelintConfig` from `relint.toml` or `relint.yaml|yml` if present.
///
/// A missing file yields `Ok(None)`; a present but malformed one is an error.
pub fn load_config(root: &Path) -> Result<Option<RelintConfig>, RelintError> {
    for name in CONFIG_FILES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        let s = fs::read_to_string(&path).map_err(|e| RelintError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let parsed = if name.ends_with(".toml") {
            toml::from_str::<RelintConfig>(&s).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str::<RelintConfig>(&s).map_err(|e| e.to_string())
        };
        return parsed
            .map(Some)
            .map_err(|message| RelintError::ConfigParse { path, message });
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// CLI `options` are appended after the configured ones.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_output: Option<&str>,
    cli_prefix: Option<&str>,
    cli_options: &[String],
    cli_show_disabled: Option<bool>,
) -> Result<Effective, RelintError> {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    // Absolute so discovery can walk above the working directory.
    let start = fs::canonicalize(&start).unwrap_or(start);
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let output = cli_output
        .map(|s| s.to_string())
        .or_else(|| cfg.output.clone())
        .unwrap_or_else(|| "human".to_string());
    let show_disabled = cli_show_disabled
        .or(cfg.show_disabled)
        .unwrap_or(false);

    let mut settings = LinterSettings::from_store(&cfg);
    if let Some(p) = cli_prefix.filter(|p| !p.trim().is_empty()) {
        settings.prefix = Some(PathBuf::from(p));
    }
    settings.options.extend(cli_options.iter().cloned());

    Ok(Effective {
        repo_root,
        config_found,
        output,
        show_disabled,
        settings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("relint.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output = "json"
[pylint]
prefix = "/opt/pylint"
options = ["--disable=C0111"]
[pylint.codes]
error = "^E.*"
warning = ["^W06", "^W0612$"]
    "#
        )
        .unwrap();

        // Resolve using explicit repo_root to avoid global CWD races
        let eff = resolve_effective(root.to_str(), None, None, &[], None).unwrap();
        assert!(eff.config_found);
        assert_eq!(eff.output, "json");
        assert!(!eff.show_disabled);
        assert_eq!(eff.settings.prefix, Some(PathBuf::from("/opt/pylint")));
        assert_eq!(eff.settings.options, vec!["--disable=C0111".to_string()]);
        assert_eq!(eff.settings.patterns.error, vec!["^E.*".to_string()]);
        assert_eq!(eff.settings.patterns.warning.len(), 2);
        assert!(eff.settings.patterns.advice.is_empty());
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("relint.yaml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
pylint:
  codes:
    advice: "^C"
            "#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), None, None, &[], None).unwrap();
        assert_eq!(eff.output, "human");
        assert_eq!(eff.settings.prefix, None);
        assert_eq!(eff.settings.patterns.advice, vec!["^C".to_string()]);
    }

    #[test]
    fn test_cli_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("relint.toml"),
            r#"
output = "json"
show_disabled = true
[pylint]
prefix = "/from/config"
options = "--jobs=1"
"#,
        )
        .unwrap();

        let eff = resolve_effective(
            root.to_str(),
            Some("human"),
            Some("/from/cli"),
            &["--max-line-length=120".to_string()],
            Some(false),
        )
        .unwrap();
        assert_eq!(eff.output, "human");
        assert!(!eff.show_disabled);
        assert_eq!(eff.settings.prefix, Some(PathBuf::from("/from/cli")));
        assert_eq!(
            eff.settings.options,
            vec!["--jobs=1".to_string(), "--max-line-length=120".to_string()]
        );
    }

    #[test]
    fn test_missing_config_is_not_an_error() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        let eff = resolve_effective(dir.path().to_str(), None, None, &[], None).unwrap();
        assert!(!eff.config_found);
        assert!(!eff.settings.patterns.is_configured());
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("relint.toml"), "output = [").unwrap();
        let err = resolve_effective(dir.path().to_str(), None, None, &[], None).unwrap_err();
        assert!(matches!(err, RelintError::ConfigParse { .. }));
    }

    #[test]
    fn test_detect_repo_root_walks_up() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("relint.toml"), "").unwrap();
        let nested = root.join("pkg/sub");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(detect_repo_root(&nested), root.to_path_buf());
    }

    #[test]
    fn test_blank_prefixes_are_unset() {
        let mut store: HashMap<String, ConfigValue> = HashMap::new();
        store.insert(KEY_PREFIX.into(), ConfigValue::Str(String::new()));
        store.insert(KEY_ASTNG_PREFIX.into(), ConfigValue::Str("  ".into()));
        store.insert(KEY_CODES_ADVICE.into(), ConfigValue::Str("^C".into()));
        let s = LinterSettings::from_store(&store);
        assert_eq!(s.prefix, None);
        assert!(s.library_prefixes().is_empty());
    }

    #[test]
    fn test_settings_from_map_store() {
        let mut store: HashMap<String, ConfigValue> = HashMap::new();
        store.insert(KEY_PREFIX.into(), ConfigValue::Str("/p".into()));
        store.insert(KEY_COMMON_PREFIX.into(), ConfigValue::Str("/c".into()));
        store.insert(
            KEY_CODES_ERROR.into(),
            ConfigValue::List(vec!["^E".into(), "^F".into()]),
        );
        let s = LinterSettings::from_store(&store);
        assert_eq!(
            s.library_prefixes(),
            vec![Path::new("/p"), Path::new("/c")]
        );
        assert_eq!(s.patterns.error, vec!["^E".to_string(), "^F".to_string()]);
        assert!(s.options.is_empty());
    }
}
