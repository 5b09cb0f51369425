//! Parsing of `domain/owner/repo` addresses.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::CloneError;

/// A repository location on a code-hosting service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoAddress {
    pub domain: String,
    pub owner: String,
    pub name: String,
}

impl RepoAddress {
    /// Parse a `domain/owner/repo` string.
    ///
    /// Requires exactly three non-empty segments. A trailing `.git` on the
    /// repository name is stripped.
    pub fn parse(address: &str) -> Result<Self, CloneError> {
        let invalid = || CloneError::InvalidAddress(address.to_string());

        let parts: Vec<&str> = address.split('/').collect();
        let [domain, owner, name] = parts.as_slice() else {
            return Err(invalid());
        };

        let name = name.strip_suffix(".git").unwrap_or(*name);

        if domain.is_empty() || owner.is_empty() || name.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            domain: domain.to_string(),
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// HTTPS URL handed to `gh repo clone`.
    pub fn clone_url(&self) -> String {
        format!("https://{}/{}/{}.git", self.domain, self.owner, self.name)
    }

    /// `domain/owner/name` as a relative path under a base directory.
    pub fn relative_path(&self) -> PathBuf {
        [&self.domain, &self.owner, &self.name].iter().collect()
    }
}

impl FromStr for RepoAddress {
    type Err = CloneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepoAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.domain, self.owner, self.name)
    }
}
