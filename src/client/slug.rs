//! `owner/repo` identifiers.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlugError {
    #[error("Please enter a GitHub slug (e.g., owner/repo)")]
    Empty,

    #[error("Please enter a valid GitHub slug format (owner/repo)")]
    Malformed,
}

/// A validated GitHub `owner/repo` slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn owner(&self) -> &str {
        self.0.split_once('/').map_or("", |(owner, _)| owner)
    }

    pub fn repo(&self) -> &str {
        self.0.split_once('/').map_or("", |(_, repo)| repo)
    }
}

fn valid_part(part: &str) -> bool {
    !part.is_empty()
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

impl FromStr for Slug {
    type Err = SlugError;

    /// Surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SlugError::Empty);
        }
        match s.split_once('/') {
            Some((owner, repo)) if valid_part(owner) && valid_part(repo) => Ok(Slug(s.to_string())),
            _ => Err(SlugError::Malformed),
        }
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_owner_repo() {
        let slug: Slug = "  rust-lang/rust.vim ".parse().unwrap();
        assert_eq!(slug.as_str(), "rust-lang/rust.vim");
        assert_eq!(slug.owner(), "rust-lang");
        assert_eq!(slug.repo(), "rust.vim");
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!("".parse::<Slug>(), Err(SlugError::Empty));
        assert_eq!("   ".parse::<Slug>(), Err(SlugError::Empty));
        for bad in ["owner", "owner/", "/repo", "a/b/c", "own er/repo", "owner/rep?o"] {
            assert_eq!(bad.parse::<Slug>(), Err(SlugError::Malformed), "{bad}");
        }
    }
}
