//! Application config: corpus, persona, conversation log, log file.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use prompt::{LanguagePolicy, Persona};

pub const DEFAULT_CORPUS_PATH: &str = "Character_Bible.txt";
pub const DEFAULT_DATABASE_URL: &str = "./data/conversations.db";
pub const DEFAULT_LOG_FILE: &str = "logs/persona.log";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub corpus_path: PathBuf,
    /// Custom persona preamble; `None` uses the built-in persona.
    pub preamble_file: Option<PathBuf>,
    /// SQLite file for the conversation log.
    pub database_url: String,
    pub log_file: String,
    pub log_conversations: bool,
}

impl AppConfig {
    /// Load from `CORPUS_PATH`, `PERSONA_PREAMBLE_FILE`, `DATABASE_URL`, `LOG_FILE`.
    /// `corpus` overrides `CORPUS_PATH`; `no_log` disables the conversation log.
    pub fn load(corpus: Option<String>, no_log: bool) -> Result<Self> {
        let corpus_path = corpus
            .or_else(|| non_empty_var("CORPUS_PATH"))
            .unwrap_or_else(|| DEFAULT_CORPUS_PATH.to_string());
        let preamble_file = non_empty_var("PERSONA_PREAMBLE_FILE").map(PathBuf::from);
        let database_url =
            non_empty_var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let log_file = non_empty_var("LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

        Ok(Self {
            corpus_path: PathBuf::from(corpus_path),
            preamble_file,
            database_url: strip_sqlite_scheme(&database_url).to_string(),
            log_file,
            log_conversations: !no_log,
        })
    }

    /// The persona preamble. A configured preamble file replaces the built-in identity
    /// paragraph; the language policy (from the environment) and the memory instruction
    /// are always appended.
    pub fn preamble(&self) -> Result<String> {
        let persona = match &self.preamble_file {
            Some(path) => {
                let identity = std::fs::read_to_string(path)
                    .with_context(|| format!("Read PERSONA_PREAMBLE_FILE {}", path.display()))?;
                Persona::new(identity, LanguagePolicy::from_env())
            }
            None => Persona::from_env(),
        };
        Ok(persona.preamble())
    }
}

/// Accepts `sqlite:` / `file:` URLs as plain paths.
fn strip_sqlite_scheme(url: &str) -> &str {
    url.strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .or_else(|| url.strip_prefix("file:"))
        .unwrap_or(url)
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        for key in [
            "CORPUS_PATH",
            "PERSONA_PREAMBLE_FILE",
            "DATABASE_URL",
            "LOG_FILE",
            "PRIMARY_LANGUAGE",
            "SECONDARY_LANGUAGES",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = AppConfig::load(None, false).unwrap();
        assert_eq!(config.corpus_path, PathBuf::from("Character_Bible.txt"));
        assert_eq!(config.database_url, "./data/conversations.db");
        assert_eq!(config.log_file, "logs/persona.log");
        assert!(config.preamble_file.is_none());
        assert!(config.log_conversations);
    }

    #[test]
    #[serial]
    fn test_cli_corpus_overrides_env() {
        clear_env();
        env::set_var("CORPUS_PATH", "from_env.txt");
        let config = AppConfig::load(Some("from_cli.txt".to_string()), true).unwrap();
        assert_eq!(config.corpus_path, PathBuf::from("from_cli.txt"));
        assert!(!config.log_conversations);

        let config = AppConfig::load(None, false).unwrap();
        assert_eq!(config.corpus_path, PathBuf::from("from_env.txt"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_database_url_scheme_stripped() {
        clear_env();
        env::set_var("DATABASE_URL", "file:./chat.db");
        assert_eq!(AppConfig::load(None, false).unwrap().database_url, "./chat.db");
        env::set_var("DATABASE_URL", "sqlite://data/chat.db");
        assert_eq!(AppConfig::load(None, false).unwrap().database_url, "data/chat.db");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_preamble_from_file() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "You are Captain Nemo.").unwrap();
        env::set_var("PERSONA_PREAMBLE_FILE", file.path());
        env::set_var("SECONDARY_LANGUAGES", "French");

        let preamble = AppConfig::load(None, false).unwrap().preamble().unwrap();
        assert!(preamble.starts_with("You are Captain Nemo."));
        assert!(preamble.contains("[LANGUAGE INSTRUCTION]"));
        assert!(preamble.contains("French"));
        assert!(preamble.contains("[MEMORY INSTRUCTION]"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_builtin_preamble() {
        clear_env();
        let preamble = AppConfig::load(None, false).unwrap().preamble().unwrap();
        assert!(preamble.contains("[LANGUAGE INSTRUCTION]"));
        assert!(preamble.contains("[MEMORY INSTRUCTION]"));
    }

    #[test]
    #[serial]
    fn test_missing_preamble_file_errors() {
        clear_env();
        env::set_var("PERSONA_PREAMBLE_FILE", "/nonexistent/preamble.txt");
        assert!(AppConfig::load(None, false).unwrap().preamble().is_err());
        clear_env();
    }
}
