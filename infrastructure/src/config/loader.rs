//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
    value::Uncased,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application directory under the user config dir
const APP_DIR: &str = "code-reviewer";

/// Project-level config file names, checked in order
const PROJECT_FILES: [&str; 2] = ["code-reviewer.toml", ".code-reviewer.toml"];

/// Prefix for environment overrides, e.g. `CODE_REVIEWER_SUPERVISOR__MAX_ITERATIONS`
pub const ENV_PREFIX: &str = "CODE_REVIEWER_";

/// Unprefixed variables kept from the Python tool's `.env`, with their config keys
const LEGACY_ENV: [(&str, &str); 6] = [
    ("WRITER_MODEL", "models.writer"),
    ("OPENAI_REVIEWER_MODEL", "models.openai_reviewer"),
    ("GEMINI_REVIEWER_MODEL", "models.gemini_reviewer"),
    ("ANTHROPIC_COLLATOR_MODEL", "models.collator"),
    ("WRITER_RULES_FILE", "rules.writer_rules_file"),
    ("REVIEWER_RULES_FILE", "rules.reviewer_rules_file"),
];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (`CODE_REVIEWER_` prefix, `__` between section and key)
    /// 2. Unprefixed `.env` names (`WRITER_MODEL`, `REVIEWER_RULES_FILE`, ...)
    /// 3. Explicit config path (if provided)
    /// 4. Project root: `./code-reviewer.toml` or `./.code-reviewer.toml`
    /// 5. XDG config: `$XDG_CONFIG_HOME/code-reviewer/config.toml`
    /// 6. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        if let Some(path) = config_path
            && !path.exists()
        {
            return Err(Box::new(figment::Error::from(format!(
                "config file not found: {}",
                path.display()
            ))));
        }

        let global = Self::global_config_path().filter(|p| p.exists());
        let project = Self::project_config_path();

        Self::with_env(Self::figment(global.as_deref(), project.as_deref(), config_path))
            .extract()
            .map_err(Box::new)
    }

    /// Read `./.env` (or the nearest one above) into the process environment.
    ///
    /// Variables already set in the environment win over the file.
    pub fn load_dotenv() -> Option<PathBuf> {
        let path = dotenvy::dotenv().ok()?;
        debug!("Loaded environment from {}", path.display());
        Some(path)
    }

    /// File layers only, lowest priority first
    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project, explicit].into_iter().flatten() {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    /// Environment layers on top of `figment`, lowest priority first
    fn with_env(figment: Figment) -> Figment {
        figment
            .merge(Self::legacy_env())
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Unprefixed variable names mapped onto their config keys
    fn legacy_env() -> Env {
        Env::raw()
            .only(&LEGACY_ENV.map(|(var, _)| var))
            .map(|key| {
                LEGACY_ENV
                    .iter()
                    .find(|(var, _)| key.as_str().eq_ignore_ascii_case(var))
                    .map(|(_, path)| Uncased::from_borrowed(*path))
                    .unwrap_or_else(|| Uncased::from_owned(key.as_str().to_string()))
            })
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/code-reviewer/config.toml if set,
    /// otherwise the platform config dir equivalent.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used (for --show-config)
    pub fn describe_sources(explicit: Option<&Path>) -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        lines.push(format!("  [ENV  ] Environment: {}*", ENV_PREFIX));
        lines.push(format!(
            "  [ENV  ] Environment: {}",
            LEGACY_ENV.map(|(var, _)| var).join(", ")
        ));

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            lines.push(format!("  [{}] Explicit: {}", mark, path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push(format!(
                "  [     ] Project: ./{} or ./{}",
                PROJECT_FILES[0], PROJECT_FILES[1]
            )),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{}] Global:  {}", mark, path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.supervisor.max_iterations, 2);
        assert_eq!(config.provider.api_key_env, "OPENROUTER_API_KEY");
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("code-reviewer"));
    }

    #[test]
    fn test_later_layers_override_earlier() {
        let dir = TempDir::new().unwrap();
        let global = write(
            &dir,
            "global.toml",
            "[supervisor]\nmax_iterations = 5\ntimeout_seconds = 10\n",
        );
        let project = write(&dir, "project.toml", "[supervisor]\nmax_iterations = 3\n");
        let explicit = write(&dir, "explicit.toml", "[models]\nwriter = \"openai/gpt-5.2\"\n");

        let config: FileConfig = ConfigLoader::figment(
            Some(&global),
            Some(&project),
            Some(&explicit),
        )
        .extract()
        .unwrap();

        assert_eq!(config.supervisor.max_iterations, 3);
        assert_eq!(config.supervisor.timeout_seconds, 10);
        assert_eq!(config.models.writer, "openai/gpt-5.2");
        // Untouched sections keep their defaults
        assert_eq!(config.provider.base_url, "https://openrouter.ai/api/v1");
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(ConfigLoader::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = TempDir::new().unwrap();
        let bad = write(&dir, "bad.toml", "[supervisor]\nmax_iterations = \"many\"\n");

        let result: Result<FileConfig, _> = ConfigLoader::figment(None, None, Some(&bad)).extract();
        assert!(result.is_err());
    }

    #[test]
    fn test_legacy_env_names_map_to_sections() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("WRITER_MODEL", "openai/gpt-5.2");
            jail.set_env("ANTHROPIC_COLLATOR_MODEL", "anthropic/claude-sonnet-4.5");
            jail.set_env("REVIEWER_RULES_FILE", "rules/review.md");

            let config: FileConfig = ConfigLoader::with_env(ConfigLoader::figment(None, None, None))
                .extract()?;

            assert_eq!(config.models.writer, "openai/gpt-5.2");
            assert_eq!(config.models.collator, "anthropic/claude-sonnet-4.5");
            assert_eq!(
                config.rules.reviewer_rules_file,
                Some(PathBuf::from("rules/review.md"))
            );
            assert_eq!(config.rules.writer_rules_file, None);
            Ok(())
        });
    }

    #[test]
    fn test_prefixed_env_overrides_legacy_names() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("project.toml", "[models]\nwriter = \"from/file\"\n")?;
            let project = jail.directory().join("project.toml");
            jail.set_env("GEMINI_REVIEWER_MODEL", "google/gemini-3-pro");
            jail.set_env("WRITER_MODEL", "from/legacy");
            jail.set_env("CODE_REVIEWER_MODELS__WRITER", "from/prefixed");

            let config: FileConfig =
                ConfigLoader::with_env(ConfigLoader::figment(None, Some(&project), None))
                    .extract()?;

            assert_eq!(config.models.writer, "from/prefixed");
            assert_eq!(config.models.gemini_reviewer, "google/gemini-3-pro");
            Ok(())
        });
    }

    #[test]
    fn test_describe_sources_mentions_env_prefix() {
        let lines = ConfigLoader::describe_sources(None);
        assert!(lines.iter().any(|l| l.contains("CODE_REVIEWER_")));
    }
}
