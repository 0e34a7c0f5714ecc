use std::fmt;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use thiserror::Error;

// =============================================================================
// Registry request constants
// =============================================================================

/// User agent sent with every registry request
pub const USER_AGENT: &str = concat!("get-version/", env!("CARGO_PKG_VERSION"));

/// Items requested per GitHub API call (API maximum)
pub const GITHUB_PAGE_SIZE: &str = "100";

/// Tags requested per Docker Hub API call (API maximum)
pub const DOCKERHUB_PAGE_SIZE: &str = "100";

/// Documents requested from the Maven Central search API
pub const MAVEN_ROWS: &str = "1000";

/// Environment variable naming the GitHub Actions step output file
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Where versions are fetched from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum SourceKind {
    /// GitHub releases of `--repo`
    #[value(name = "github-release")]
    GitHubRelease,
    /// GitHub tags of `--repo`
    #[value(name = "github-tag")]
    GitHubTag,
    /// Docker Hub tags of the `--repo` image
    #[value(name = "dockerhub-imagetag")]
    DockerHubImageTag,
    /// Maven Central versions of `--mvn-group`:`--mvn-artifact-id`
    #[value(name = "maven-artifact")]
    MavenArtifact,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::GitHubRelease => "github-release",
            SourceKind::GitHubTag => "github-tag",
            SourceKind::DockerHubImageTag => "dockerhub-imagetag",
            SourceKind::MavenArtifact => "maven-artifact",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--repo is required for source {0}")]
    MissingRepo(SourceKind),

    #[error("--mvn-group is required for source maven-artifact")]
    MissingMavenGroup,

    #[error("--mvn-artifact-id is required for source maven-artifact")]
    MissingMavenArtifactId,

    #[error("GITHUB_OUTPUT is not set")]
    GitHubOutputNotSet,
}

/// Command line parameters
#[derive(Debug, Clone, Args, PartialEq, Eq)]
pub struct Params {
    /// Version source
    #[arg(long, value_enum)]
    pub source: SourceKind,

    /// Repository name. Examples for dockerhub: ubuntu or alpine/git;
    /// for github: golang/go or scylladb/scylla
    #[arg(long)]
    pub repo: Option<String>,

    /// Filters to apply to versions. Example: "LAST.*.*"
    #[arg(long, default_value = "")]
    pub filters: String,

    /// Version prefix
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Artifact group to search on the maven
    #[arg(long = "mvn-group")]
    pub mvn_group: Option<String>,

    /// Artifact ID to search on the maven
    #[arg(long = "mvn-artifact-id")]
    pub mvn_artifact_id: Option<String>,

    #[command(flatten)]
    pub output: OutputConfig,
}

/// Output-related parameters
#[derive(Debug, Clone, Default, Args, PartialEq, Eq)]
pub struct OutputConfig {
    /// Print versions newest first
    #[arg(long = "out-reverse-order")]
    pub reverse_order: bool,

    /// Remove prefix from output
    #[arg(long = "out-no-prefix")]
    pub no_prefix: bool,

    /// Output to a GitHub action output
    #[arg(long = "out-as-action")]
    pub as_action: bool,
}

impl Params {
    /// Name the selected registry expects, validated for the source kind
    pub fn package_name(&self) -> Result<String, ConfigError> {
        match self.source {
            SourceKind::GitHubRelease | SourceKind::GitHubTag | SourceKind::DockerHubImageTag => {
                non_empty(&self.repo)
                    .map(str::to_string)
                    .ok_or(ConfigError::MissingRepo(self.source))
            }
            SourceKind::MavenArtifact => {
                let group = non_empty(&self.mvn_group).ok_or(ConfigError::MissingMavenGroup)?;
                let artifact =
                    non_empty(&self.mvn_artifact_id).ok_or(ConfigError::MissingMavenArtifactId)?;
                Ok(format!("{}:{}", group, artifact))
            }
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Returns the path of the GitHub Actions output file.
pub fn github_output_path() -> Result<PathBuf, ConfigError> {
    github_output_path_with_env(std::env::var(GITHUB_OUTPUT_ENV).ok())
}

fn github_output_path_with_env(github_output: Option<String>) -> Result<PathBuf, ConfigError> {
    github_output
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
        .ok_or(ConfigError::GitHubOutputNotSet)
}
