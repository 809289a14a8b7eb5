// GitHub API endpoint functions.
// Typed fetch methods for the two resources the aggregator needs.

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{GithubRepo, GithubUser};

impl GitHubClient {
    /// Get a user's public profile.
    pub async fn get_user(&self, username: &str) -> Result<GithubUser> {
        let response = self.get(&format!("/users/{}", username)).await?;
        let user: GithubUser = response.json().await?;
        Ok(user)
    }

    /// Get a user's public repositories. Only the first page of 100 is
    /// fetched; aggregation is scoped to that page by contract.
    pub async fn get_user_repos(&self, username: &str) -> Result<Vec<GithubRepo>> {
        let params = [("per_page", "100")];
        let response = self
            .get_with_params(&format!("/users/{}/repos", username), &params)
            .await?;
        let repos: Vec<GithubRepo> = response.json().await?;
        Ok(repos)
    }
}
