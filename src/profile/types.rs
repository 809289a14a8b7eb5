// Aggregated profile types.
// Wire format uses snake_case keys; the frontend consumes these directly.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Shown when the upstream profile has no usable avatar.
pub const FALLBACK_AVATAR_URL: &str = "https://avatars.githubusercontent.com/u/9919?s=200&v=4";

/// A repository entry in the top-starred list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopRepo {
    pub name: String,
    pub html_url: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub language: Option<String>,
}

/// The aggregated view of a user's public repository activity.
///
/// Immutable once built; cached as a whole, so a cache hit replays the
/// identical result including `fetched_at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileResult {
    pub username: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: String,
    pub html_url: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
    pub total_stars: u64,
    pub total_forks: u64,
    pub repo_count: u64,
    pub top_repos: Vec<TopRepo>,
    pub languages: BTreeMap<String, u64>,
    pub recent_repo_updates_90d: u64,
    pub fetched_at: DateTime<Utc>,
}
