// Profile aggregation.
// Two upstream calls, derived metrics, and a short-lived cache in front.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, info};

use crate::cache::TtlCache;
use crate::error::Result;
use crate::github::{GitHubClient, GithubRepo, GithubUser};
use crate::profile::types::{FALLBACK_AVATAR_URL, ProfileResult, TopRepo};

const TOP_REPOS_LIMIT: usize = 6;
const RECENT_WINDOW_DAYS: i64 = 90;

/// Aggregate public metrics for a username, consulting the cache first.
///
/// Upstream errors propagate untouched; the handler is the only place
/// they are translated into HTTP responses.
pub async fn aggregate(
    client: &GitHubClient,
    cache: &Mutex<TtlCache<ProfileResult>>,
    username: &str,
) -> Result<ProfileResult> {
    let key = cache_key(username);

    if let Some(profile) = lock(cache).get(&key) {
        debug!(username, "profile cache hit");
        return Ok(profile);
    }

    info!(username, "fetching profile from GitHub");
    let user = client.get_user(username).await?;
    let repos = client.get_user_repos(username).await?;

    let profile = build_profile(user, repos, Utc::now());
    lock(cache).set(key, profile.clone());
    Ok(profile)
}

fn cache_key(username: &str) -> String {
    format!("profile:{}", username)
}

fn lock<'a>(
    cache: &'a Mutex<TtlCache<ProfileResult>>,
) -> std::sync::MutexGuard<'a, TtlCache<ProfileResult>> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Parse an upstream `YYYY-MM-DDTHH:MM:SSZ` timestamp. Failures yield
/// `None` rather than an error; call sites decide the fallback.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%SZ")
        .ok()
        .map(|dt| dt.and_utc())
}

/// Last-push time for ordering: `pushed_at` when present, otherwise
/// `updated_at`. Unparsable dates yield `None` and sort last.
fn push_time(repo: &GithubRepo) -> Option<DateTime<Utc>> {
    let raw = repo.pushed_at.as_deref().or(repo.updated_at.as_deref())?;
    parse_timestamp(raw)
}

fn normalize_language(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(lang) if !lang.is_empty() => lang.to_string(),
        _ => "Unknown".to_string(),
    }
}

/// Pure assembly of the aggregated profile from already-fetched data.
pub fn build_profile(
    user: GithubUser,
    mut repos: Vec<GithubRepo>,
    now: DateTime<Utc>,
) -> ProfileResult {
    // Newest pushes first so the derived lists are deterministic; repos
    // without a usable date go last.
    repos.sort_by_cached_key(|repo| Reverse(push_time(repo)));

    let total_stars = repos.iter().map(|r| r.stargazers_count).sum();
    let total_forks = repos.iter().map(|r| r.forks_count).sum();
    let repo_count = repos.len() as u64;

    // Stable sort: star ties keep the recency ordering established above.
    let mut by_stars: Vec<&GithubRepo> = repos.iter().collect();
    by_stars.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    let top_repos = by_stars
        .iter()
        .take(TOP_REPOS_LIMIT)
        .map(|r| TopRepo {
            name: r.name.clone(),
            html_url: r.html_url.clone(),
            stars: r.stargazers_count,
            forks: r.forks_count,
            language: r.language.clone(),
        })
        .collect();

    let mut languages: BTreeMap<String, u64> = BTreeMap::new();
    for repo in &repos {
        let label = normalize_language(repo.language.as_deref());
        *languages.entry(label).or_insert(0) += 1;
    }

    let cutoff = now - chrono::Duration::days(RECENT_WINDOW_DAYS);
    let recent_repo_updates_90d = repos
        .iter()
        .filter_map(|r| r.pushed_at.as_deref().and_then(parse_timestamp))
        .filter(|pushed| *pushed > cutoff)
        .count() as u64;

    let avatar_url = user
        .avatar_url
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| FALLBACK_AVATAR_URL.to_string());

    ProfileResult {
        username: user.login,
        name: user.name,
        bio: user.bio,
        avatar_url,
        html_url: user.html_url,
        followers: user.followers,
        following: user.following,
        public_repos: user.public_repos.unwrap_or(repo_count),
        total_stars,
        total_forks,
        repo_count,
        top_repos,
        languages,
        recent_repo_updates_90d,
        fetched_at: now,
    }
}
