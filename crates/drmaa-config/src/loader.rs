//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::TrackerConfig;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<TrackerConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<TrackerConfig, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let mut config: TrackerConfig = toml::from_str(&expanded)?;
        if let Some(dir) = config.logging.directory.take() {
            let dir = dir.to_string_lossy();
            config.logging.directory = Some(PathBuf::from(Self::expand_path(&dir)));
        }
        if let Some(contact) = config.session.contact.take() {
            config.session.contact = Some(Self::expand_contact(&contact));
        }
        Ok(config)
    }

    /// Load `<config dir>/drmaa-bridge/config.toml`, or defaults when the
    /// file does not exist.
    pub fn load_default() -> Result<TrackerConfig, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(TrackerConfig::default()),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("drmaa-bridge").join("config.toml"))
    }

    /// Expand environment variables in the format `${VAR}`.
    ///
    /// Comments are copied as they are.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = String::with_capacity(content.len());

        for line in content.split_inclusive('\n') {
            let (code, comment) = line.split_at(comment_start(line));
            let mut expanded = code.to_string();
            for cap in ENV_VAR.captures_iter(code) {
                let var_name = &cap[1];
                let var_value = std::env::var(var_name)
                    .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
                expanded = expanded.replace(&cap[0], &var_value);
            }
            result.push_str(&expanded);
            result.push_str(comment);
        }

        Ok(result)
    }

    /// Expand `~` in the path part of a `scheme://path` contact.
    fn expand_contact(contact: &str) -> String {
        match contact.split_once("://") {
            Some((scheme, path)) => format!("{scheme}://{}", Self::expand_path(path)),
            None => contact.to_string(),
        }
    }

    /// Expand shell-style paths (e.g., `~/.drmaa-bridge`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

/// Byte offset of the `#` starting a comment, or the line length.
///
/// A `#` inside a basic or literal string does not start a comment.
fn comment_start(line: &str) -> usize {
    let mut quote = None;
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match quote {
            Some('"') if escaped => escaped = false,
            Some('"') if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '#' => return i,
            None => {}
        }
    }
    line.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.wait.default_timeout_secs, 60);
        assert!(config.session.contact.is_none());
    }

    #[test]
    fn test_load_full_config() {
        let content = r#"
            [session]
            contact = "local"

            [wait]
            default_timeout_secs = 120

            [logging]
            level = "debug"
            json = true
            file = true
            directory = "/tmp/drmaa-logs"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.session.contact.as_deref(), Some("local"));
        assert_eq!(config.wait.default_timeout_secs, 120);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert!(config.logging.file);
        assert_eq!(
            config.logging.directory,
            Some(PathBuf::from("/tmp/drmaa-logs"))
        );
    }

    #[test]
    fn test_load_expands_tilde_in_log_directory() {
        let content = r#"
            [logging]
            directory = "~/drmaa-logs"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        let dir = config.logging.directory.unwrap();
        assert!(!dir.to_string_lossy().starts_with('~'));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[wait]").unwrap();
        writeln!(file, "default_timeout_secs = 5").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.wait.default_timeout_secs, 5);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/drmaa.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("DRMAA_TEST_CONTACT", "local");
        }
        let content = "[session]\ncontact = \"${DRMAA_TEST_CONTACT}\"";
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.session.contact.as_deref(), Some("local"));
        unsafe {
            std::env::remove_var("DRMAA_TEST_CONTACT");
        }
    }

    #[test]
    fn test_env_vars_in_comments_are_ignored() {
        let content = r#"
            # contact = "${DRMAA_TEST_UNSET_IN_COMMENT}"
            [wait]
            default_timeout_secs = 30 # was ${DRMAA_TEST_UNSET_IN_COMMENT}
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.wait.default_timeout_secs, 30);
    }

    #[test]
    fn test_hash_inside_string_is_not_a_comment() {
        assert_eq!(comment_start(r#"contact = "local#1" # note"#), 20);
        assert_eq!(comment_start(r#"level = 'a#b'"#), 13);
        assert_eq!(comment_start(r##"x = "esc\"#" # c"##), 13);
    }

    #[test]
    fn test_load_expands_tilde_in_contact_directory() {
        let content = r#"
            [session]
            contact = "local://~/drmaa-jobs"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        let contact = config.session.contact.unwrap();
        assert!(contact.starts_with("local://"));
        assert!(!contact.contains('~'));
        assert!(contact.ends_with("/drmaa-jobs"));
    }

    #[test]
    fn test_plain_contact_is_unchanged() {
        let config = ConfigLoader::load_str("[session]\ncontact = \"local\"").unwrap();
        assert_eq!(config.session.contact.as_deref(), Some("local"));
    }

    #[test]
    fn test_expand_missing_env_var() {
        let content = "[session]\ncontact = \"${DRMAA_TEST_UNSET_VARIABLE}\"";
        let result = ConfigLoader::load_str(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }
}
