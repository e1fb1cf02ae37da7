//! GitHub release lookup and version comparison.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::error::AppError;

const GITHUB_API_URL: &str = "https://api.github.com";

pub const COLOUR_GREY: u32 = 0x979C9F;
pub const COLOUR_ORANGE: u32 = 0xE67E22;
pub const COLOUR_GREEN: u32 = 0x2ECC71;
pub const COLOUR_BLUE: u32 = 0x3498DB;
pub const COLOUR_RED: u32 = 0xE74C3C;

/// Latest published release of the configured repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub tag: String,
    /// Release page, empty when GitHub did not return one.
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct GithubRelease {
    tag_name: Option<String>,
    html_url: Option<String>,
}

/// Splits `owner/name` into its parts. Both must be non-empty.
pub fn parse_repo(repo: &str) -> Option<(&str, &str)> {
    let (owner, name) = repo.trim().split_once('/')?;
    if owner.is_empty() || name.is_empty() {
        return None;
    }
    Some((owner, name))
}

/// Strips surrounding whitespace and a single leading `v`.
pub fn normalize_version(version: &str) -> &str {
    let version = version.trim();
    version.strip_prefix('v').unwrap_or(version)
}

/// Parses a dotted (or dashed) numeric version such as `1.3.4` or `v2-0`.
///
/// Returns `None` when any component is not purely numeric, e.g. `1.0.0-beta`.
pub fn parse_version(version: &str) -> Option<Vec<u64>> {
    let cleaned = normalize_version(version);
    if cleaned.is_empty() {
        return None;
    }

    cleaned
        .split(['.', '-'])
        .map(|part| {
            if !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()) {
                part.parse::<u64>().ok()
            } else {
                None
            }
        })
        .collect()
}

/// Compares two versions after zero-padding them to the same length.
///
/// `1.2` and `1.2.0` are equal. `None` when either side cannot be parsed.
pub fn compare_versions(current: &str, latest: &str) -> Option<Ordering> {
    let mut current = parse_version(current)?;
    let mut latest = parse_version(latest)?;

    let len = current.len().max(latest.len());
    current.resize(len, 0);
    latest.resize(len, 0);

    Some(current.cmp(&latest))
}

/// Fetches the latest release of `owner/name` from the GitHub API.
///
/// # Returns
/// - `Ok(Some(Release))` - A release with a tag exists
/// - `Ok(None)` - The repository has no releases (404) or the release has no tag
/// - `Err(AppError::ReqwestErr)` - Network failure, timeout or other error status
pub async fn fetch_latest_release(
    client: &reqwest::Client,
    owner: &str,
    name: &str,
) -> Result<Option<Release>, AppError> {
    let url = format!("{}/repos/{}/{}/releases/latest", GITHUB_API_URL, owner, name);

    let response = client
        .get(&url)
        .header(reqwest::header::ACCEPT, "application/vnd.github+json")
        .send()
        .await?;

    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }

    let release: GithubRelease = response.error_for_status()?.json().await?;

    Ok(release
        .tag_name
        .filter(|tag| !tag.is_empty())
        .map(|tag| Release {
            tag,
            url: release.html_url.unwrap_or_default(),
        }))
}

/// Outcome of a version check, as shown by `/ver`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionStatus {
    NotConfigured,
    InvalidRepo,
    FetchFailed,
    NoRelease,
    Compared(Option<Ordering>),
}

impl VersionStatus {
    pub fn from_comparison(comparison: Option<Ordering>) -> Self {
        Self::Compared(comparison)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::NotConfigured => "Cannot check latest release.",
            Self::InvalidRepo => "Invalid repo format. Use `owner/repo`.",
            Self::FetchFailed => "Failed to fetch latest release.",
            Self::NoRelease => "No release found.",
            Self::Compared(None) => "Cannot compare version format.",
            Self::Compared(Some(Ordering::Less)) => "Update available.",
            Self::Compared(Some(Ordering::Equal)) => "Up to date.",
            Self::Compared(Some(Ordering::Greater)) => {
                "Local version is newer than latest release."
            }
        }
    }

    pub fn colour(&self) -> u32 {
        match self {
            Self::NotConfigured | Self::NoRelease | Self::Compared(None) => COLOUR_GREY,
            Self::InvalidRepo | Self::FetchFailed => COLOUR_RED,
            Self::Compared(Some(Ordering::Less)) => COLOUR_ORANGE,
            Self::Compared(Some(Ordering::Equal)) => COLOUR_GREEN,
            Self::Compared(Some(Ordering::Greater)) => COLOUR_BLUE,
        }
    }
}

/// Everything `/ver` displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionReport {
    pub bot_version: String,
    /// Configured repository, `None` when version checks are disabled.
    pub repo: Option<String>,
    pub latest: Option<Release>,
    pub status: VersionStatus,
}

/// Looks up the latest release and compares it against the running version.
///
/// Fetch failures are logged and reported through the status rather than returned.
pub async fn build_report(client: &reqwest::Client, bot_version: &str, repo: &str) -> VersionReport {
    let mut report = VersionReport {
        bot_version: bot_version.to_string(),
        repo: None,
        latest: None,
        status: VersionStatus::NotConfigured,
    };

    let repo = repo.trim();
    if repo.is_empty() {
        return report;
    }
    report.repo = Some(repo.to_string());

    let Some((owner, name)) = parse_repo(repo) else {
        report.status = VersionStatus::InvalidRepo;
        return report;
    };

    match fetch_latest_release(client, owner, name).await {
        Ok(Some(release)) => {
            report.status =
                VersionStatus::from_comparison(compare_versions(bot_version, &release.tag));
            report.latest = Some(release);
        }
        Ok(None) => report.status = VersionStatus::NoRelease,
        Err(e) => {
            tracing::error!("Failed to fetch release for {}: {}", repo, e);
            report.status = VersionStatus::FetchFailed;
        }
    }

    report
}
