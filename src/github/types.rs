// GitHub API response types.
// Timestamps stay as raw strings; parsing happens in the aggregator so a
// malformed date degrades a single metric instead of failing the request.

use serde::Deserialize;

/// Public user resource from `/users/{username}`.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubUser {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    pub public_repos: Option<u64>,
}

/// Repository metadata from `/users/{username}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubRepo {
    pub name: String,
    pub html_url: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub language: Option<String>,
    pub pushed_at: Option<String>,
    pub updated_at: Option<String>,
}
