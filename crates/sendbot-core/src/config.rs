//! CI environment read once at startup.
//!
//! The three Travis variables are looked up through a caller-supplied function
//! so tests never touch the process environment.

use crate::error::{Result, SendbotError};

pub const REPO_SLUG_VAR: &str = "TRAVIS_REPO_SLUG";
pub const PULL_REQUEST_VAR: &str = "TRAVIS_PULL_REQUEST";
pub const BUILD_ID_VAR: &str = "TRAVIS_BUILD_ID";

/// Value of the pull-request variable on builds not triggered by a pull request.
const NOT_A_PULL_REQUEST: &str = "false";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiEnv {
    pub repo_slug: String,
    pub pr_id: String,
    pub build_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullRequestContext {
    PullRequest(CiEnv),
    NotAPullRequest,
}

impl CiEnv {
    /// Read and validate the CI variables from the process environment.
    pub fn from_env() -> Result<PullRequestContext> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Validate the CI variables returned by `lookup`.
    ///
    /// Every missing variable is reported at once. An unset pull-request
    /// variable is an error; an empty one or `"false"` means the build is not
    /// for a pull request.
    pub fn from_lookup<F>(lookup: F) -> Result<PullRequestContext>
    where
        F: Fn(&str) -> Option<String>,
    {
        let repo_slug = lookup(REPO_SLUG_VAR).filter(|v| !v.is_empty());
        let pr_id = lookup(PULL_REQUEST_VAR);
        let build_id = lookup(BUILD_ID_VAR).filter(|v| !v.is_empty());

        let (Some(repo_slug), Some(pr_id), Some(build_id)) = (&repo_slug, &pr_id, &build_id)
        else {
            let missing = [
                (REPO_SLUG_VAR, repo_slug.is_none()),
                (PULL_REQUEST_VAR, pr_id.is_none()),
                (BUILD_ID_VAR, build_id.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, absent)| absent.then_some(name))
            .collect();
            return Err(SendbotError::MissingEnv(missing));
        };

        if pr_id.is_empty() || pr_id == NOT_A_PULL_REQUEST {
            return Ok(PullRequestContext::NotAPullRequest);
        }

        Ok(PullRequestContext::PullRequest(CiEnv {
            repo_slug: repo_slug.clone(),
            pr_id: pr_id.clone(),
            build_id: build_id.clone(),
        }))
    }
}
