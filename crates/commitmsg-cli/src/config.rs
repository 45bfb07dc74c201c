use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How a parsed message is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Tree,
    Json,
    Summary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_true")]
    pub colored: bool,

    #[serde(default)]
    pub verbose: bool,

    /// Parse body and footer paragraphs after the tag line.
    #[serde(default)]
    pub full_grammar: bool,

    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            colored: true,
            verbose: false,
            full_grammar: false,
            format: OutputFormat::Tree,
        }
    }
}

fn default_true() -> bool {
    true
}

pub const CONFIG_FILE_NAMES: [&str; 3] = [".commitmsgrc", ".commitmsgrc.toml", ".config/commitmsgrc"];

const DEFAULT_CONFIG: &str = r#"# commitmsg configuration file

# Enable colored output in terminal
colored = true

# Log parser activity to stderr
verbose = false

# Also parse body and BREAKING CHANGE footer paragraphs
full_grammar = false

# Output format: "tree", "json" or "summary"
format = "tree"
"#;

impl Config {
    /// Load config from the first `.commitmsgrc` variant found in the
    /// current directory.
    pub fn load() -> Result<Self> {
        Self::load_from_dir(Path::new("."))
    }

    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Config::default())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {:?}", path))?;
        Ok(config)
    }

    /// Writes a commented default config. Refuses to replace an existing
    /// file unless `force` is set.
    pub fn create_default(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            bail!("Config file {:?} already exists (use --force to overwrite)", path);
        }
        fs::write(path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write config to {:?}", path))?;
        Ok(())
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE_NAMES[0])
    }

    /// Merge CLI arguments into config
    pub fn merge_cli_args(
        &mut self,
        format: Option<OutputFormat>,
        full_grammar: bool,
        no_color: bool,
        verbose: u8,
    ) {
        if let Some(format) = format {
            self.format = format;
        }

        if full_grammar {
            self.full_grammar = true;
        }

        if no_color {
            self.colored = false;
        }

        if verbose > 0 {
            self.verbose = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap();
        assert!(config.colored);
        assert!(!config.full_grammar);
        assert_eq!(config.format, OutputFormat::Tree);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".commitmsgrc"), "format = \"json\"\n").unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.colored);
    }

    #[test]
    fn test_search_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".commitmsgrc.toml"), "full_grammar = true\n").unwrap();
        fs::write(dir.path().join(".commitmsgrc"), "verbose = true\n").unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap();
        assert!(config.verbose);
        assert!(!config.full_grammar);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".commitmsgrc"), "format = \"xml\"\n").unwrap();
        assert!(Config::load_from_dir(dir.path()).is_err());
    }

    #[test]
    fn test_default_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".commitmsgrc");
        Config::create_default(&path, false).unwrap();
        assert!(Config::create_default(&path, false).is_err());
        Config::create_default(&path, true).unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert!(config.colored);
        assert_eq!(config.format, OutputFormat::Tree);
    }

    #[test]
    fn test_merge_cli_args() {
        let mut config = Config::default();
        config.merge_cli_args(Some(OutputFormat::Summary), true, true, 2);
        assert_eq!(config.format, OutputFormat::Summary);
        assert!(config.full_grammar);
        assert!(!config.colored);
        assert!(config.verbose);
    }
}
