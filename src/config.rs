use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{MirrorError, Result};

/// Represents the complete configuration for svn-mirror.
///
/// Names the filesystem root holding the working copies, the tracked
/// repositories, the branch layout of the SVN mirror, and the publish remote.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default = "default_root")]
    pub root: PathBuf,

    #[serde(default)]
    pub repos: Vec<String>,

    #[serde(default)]
    pub branches: BranchConfig,

    #[serde(default)]
    pub publish: PublishConfig,
}

fn default_root() -> PathBuf {
    PathBuf::from("/git-repos")
}

fn default_primary_branch() -> String {
    "master".to_string()
}

fn default_upstream_branch() -> String {
    "trunk".to_string()
}

fn default_tag_namespace() -> String {
    "tags/".to_string()
}

fn default_remote() -> String {
    "gh".to_string()
}

/// Branch layout of a git-svn working copy.
///
/// `primary` is the local integration branch, `upstream` the remote-tracking
/// name of the SVN mainline it rebases onto, and `tag_namespace` the prefix
/// that marks SVN tags in the remote branch listing.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct BranchConfig {
    #[serde(default = "default_primary_branch")]
    pub primary: String,

    #[serde(default = "default_upstream_branch")]
    pub upstream: String,

    #[serde(default = "default_tag_namespace")]
    pub tag_namespace: String,
}

impl Default for BranchConfig {
    fn default() -> Self {
        BranchConfig {
            primary: default_primary_branch(),
            upstream: default_upstream_branch(),
            tag_namespace: default_tag_namespace(),
        }
    }
}

/// Configuration for the publish stage.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PublishConfig {
    #[serde(default = "default_remote")]
    pub remote: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        PublishConfig {
            remote: default_remote(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            root: default_root(),
            repos: Vec::new(),
            branches: BranchConfig::default(),
            publish: PublishConfig::default(),
        }
    }
}

impl Config {
    /// Resolves a tracked repository name to its working-copy path.
    pub fn repo_path(&self, repo: &str) -> PathBuf {
        self.root.join(repo)
    }

    /// Validates the configuration before a run starts.
    ///
    /// Repository names are joined onto `root`, so a name containing a path
    /// separator or traversal component would escape the configured root.
    ///
    /// # Returns
    /// * `Ok(())` - Configuration is usable
    /// * `Err` - First violation found, as a configuration error
    pub fn validate(&self) -> Result<()> {
        let name_pattern = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$")
            .map_err(|e| MirrorError::config(format!("invalid name pattern: {}", e)))?;

        for repo in &self.repos {
            if repo.is_empty() {
                return Err(MirrorError::config("repository name must not be empty"));
            }
            if !name_pattern.is_match(repo) {
                return Err(MirrorError::config(format!(
                    "repository name '{}' must not contain path separators or traversal components",
                    repo
                )));
            }
        }

        if self.branches.tag_namespace.is_empty() {
            return Err(MirrorError::config("tag namespace must not be empty"));
        }

        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `svnmirror.toml` in current directory
/// 3. `~/.config/.svnmirror.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> std::result::Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./svnmirror.toml").exists() {
        fs::read_to_string("./svnmirror.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".svnmirror.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
