// GitHub API module.
// Provides the client and response types for the GitHub REST API.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{GITHUB_API_BASE, GitHubClient};
pub use types::{GithubRepo, GithubUser};
