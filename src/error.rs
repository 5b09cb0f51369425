//! Error types for ghw modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

use crate::ai::Vendor;

/// Errors from invoking the wrapped `gh` executable.
#[derive(Error, Debug)]
pub enum GhError {
    #[error("The gh CLI is not installed. Please install it from https://cli.github.com/")]
    NotInstalled,

    #[error("Failed to spawn gh process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("gh {command} exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}

/// Errors from the structured clone path.
#[derive(Error, Debug)]
pub enum CloneError {
    #[error("Invalid repository address '{0}'. Format should be domain/owner/repo.")]
    InvalidAddress(String),

    #[error("The clone command requires a repository address in the format domain/owner/repo.")]
    MissingAddress,

    #[error("The base directory '{}' does not exist.", .0.display())]
    BaseDirNotFound(PathBuf),

    #[error("Failed to create directory '{}': {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Gh(#[from] GhError),
}

/// Errors from AI vendor selection and commit message generation.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("Only one of --chatgpt or --claude/--claude --sonnet can be chosen.")]
    ConflictingVendors,

    #[error("--sonnet requires --claude to be specified.")]
    SonnetRequiresClaude,

    #[error(
        "No AI assistant selected. Pass -m <message>, or choose --chatgpt or --claude to generate one."
    )]
    NoVendorSelected,

    #[error("{vendor} requires an API key. Pass {flag} or set {env_var}.")]
    MissingApiKey {
        vendor: Vendor,
        flag: &'static str,
        env_var: &'static str,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{vendor} request failed: {source}")]
    Request {
        vendor: Vendor,
        #[source]
        source: reqwest::Error,
    },

    #[error("{vendor} API error ({status}): {body}")]
    Api {
        vendor: Vendor,
        status: u16,
        body: String,
    },

    #[error("{0} returned an empty commit message")]
    EmptyResponse(Vendor),

    #[error("{vendor} returned an unexpected response: {detail}")]
    InvalidResponse { vendor: Vendor, detail: String },
}

/// Errors from the commit path.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Not a git repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to collect staged diff: {0}")]
    DiffFailed(#[source] git2::Error),

    #[error("No staged changes to commit. Stage files with `git add` first.")]
    NoStagedChanges,

    #[error("Failed to spawn git: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git commit exited with code {0}")]
    CommitFailed(i32),

    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),

    #[error(transparent)]
    Ai(#[from] AiError),
}

/// Errors from the self-update utility.
#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to fetch latest release: {0}")]
    FetchRelease(#[source] reqwest::Error),

    #[error("Release API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Release {tag} has no asset named '{asset}'")]
    AssetNotFound { tag: String, asset: String },

    #[error("Failed to download {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),

    #[error("Failed to locate the installed executable: {0}")]
    CurrentExe(#[source] std::io::Error),

    #[error("Failed to replace '{}': {source}", .path.display())]
    Replace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
