//! Startup update check and git based self-update.
//!
//! On startup the running version is compared with the latest GitHub release. When
//! `AUTO_UPDATE` is enabled and a newer release exists, the working tree is moved to the
//! release tag, rebuilt, and the process restarts itself.

use std::path::{Path, PathBuf};
use std::process::Output;

use tokio::process::Command;

use crate::{
    error::AppError,
    service::version::{
        compare_versions, fetch_latest_release, normalize_version, parse_repo, Release,
    },
};

/// Returns true when `latest_tag` should replace `current`.
///
/// Comparable versions must be strictly newer. When either side cannot be parsed, any
/// difference between the normalized strings counts as an update.
pub fn update_available(current: &str, latest_tag: &str) -> bool {
    let current = normalize_version(current);
    let latest = normalize_version(latest_tag);

    match compare_versions(current, latest) {
        Some(ordering) => ordering.is_lt(),
        None => !current.is_empty() && !latest.is_empty() && current != latest,
    }
}

/// Checks GitHub for a release newer than `current_version`.
///
/// Never fails: an invalid repository or a failed lookup is logged and treated as
/// "no update".
pub async fn check_for_updates(
    client: &reqwest::Client,
    current_version: &str,
    repo: &str,
) -> Option<Release> {
    let Some((owner, name)) = parse_repo(repo) else {
        tracing::warn!("Invalid GITHUB_REPO format. Expected owner/repo.");
        return None;
    };

    let release = match fetch_latest_release(client, owner, name).await {
        Ok(Some(release)) => release,
        Ok(None) => {
            tracing::info!("No releases found for {}/{}.", owner, name);
            return None;
        }
        Err(e) => {
            tracing::error!("Failed to check updates from GitHub: {}", e);
            return None;
        }
    };

    if update_available(current_version, &release.tag) {
        tracing::info!(
            "Update available: {} -> {} ({})",
            current_version,
            release.tag,
            if release.url.is_empty() {
                "no url"
            } else {
                release.url.as_str()
            }
        );
        Some(release)
    } else {
        tracing::info!("Up to date: {}", current_version);
        None
    }
}

/// Lines of `git status --porcelain` output describing tracked changes.
///
/// Untracked files (`?? ` lines) do not block an update.
pub fn tracked_changes(porcelain: &str) -> Vec<&str> {
    porcelain
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !line.starts_with("?? "))
        .collect()
}

async fn run(program: &str, args: &[&str], cwd: &Path) -> Result<Output, AppError> {
    tracing::info!("Running update command: {} {}", program, args.join(" "));

    Ok(Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .await?)
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

async fn git_root(git: &str) -> Result<Option<PathBuf>, AppError> {
    let output = run(git, &["rev-parse", "--show-toplevel"], Path::new(".")).await?;

    if !output.status.success() {
        tracing::warn!("Not a git repository; auto-update skipped.");
        return Ok(None);
    }

    let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok((!root.is_empty()).then(|| PathBuf::from(root)))
}

async fn is_dirty(git: &str, root: &Path) -> Result<bool, AppError> {
    let output = run(git, &["status", "--porcelain"], root).await?;
    if !output.status.success() {
        tracing::warn!("Failed to check git status; auto-update skipped.");
        return Ok(true);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let changes = tracked_changes(&stdout);
    if !changes.is_empty() {
        tracing::warn!(
            "Working tree has tracked changes; auto-update skipped. Changes: {}",
            changes.join(" | ")
        );
        return Ok(true);
    }
    if !stdout.trim().is_empty() {
        tracing::info!("Untracked files present; proceeding with auto-update.");
    }

    Ok(false)
}

async fn checkout_tag(git: &str, tag: &str, root: &Path) -> Result<bool, AppError> {
    let fetch = run(git, &["fetch", "--tags", "origin"], root).await?;
    if !fetch.status.success() {
        tracing::warn!("Failed to fetch tags: {}", stderr(&fetch));
        return Ok(false);
    }

    let checkout = run(git, &["checkout", tag], root).await?;
    if !checkout.status.success() {
        tracing::warn!("Failed to checkout {}: {}", tag, stderr(&checkout));
        return Ok(false);
    }

    Ok(true)
}

async fn rebuild(root: &Path) -> Result<bool, AppError> {
    if !root.join("Cargo.toml").exists() {
        tracing::info!("No Cargo.toml found; skipping rebuild.");
        return Ok(true);
    }

    let build = run("cargo", &["build", "--release"], root).await?;
    if !build.status.success() {
        tracing::warn!("Failed to rebuild: {}", stderr(&build));
        return Ok(false);
    }

    Ok(true)
}

/// Moves the working tree to `tag` and rebuilds.
///
/// Returns true when the caller should restart. Every failure, including `git` or
/// `cargo` missing from `PATH`, is logged and skips the update.
pub async fn perform_update(tag: &str) -> bool {
    update_with("git", tag).await
}

async fn update_with(git: &str, tag: &str) -> bool {
    match checkout_and_rebuild(git, tag).await {
        Ok(updated) => updated,
        Err(e) => {
            tracing::warn!("Auto-update to {} skipped: {}", tag, e);
            false
        }
    }
}

async fn checkout_and_rebuild(git: &str, tag: &str) -> Result<bool, AppError> {
    let Some(root) = git_root(git).await? else {
        return Ok(false);
    };
    if is_dirty(git, &root).await? {
        return Ok(false);
    }
    if !checkout_tag(git, tag, &root).await? {
        return Ok(false);
    }

    rebuild(&root).await
}

/// Starts a fresh copy of the current executable with the same arguments.
///
/// The caller is expected to return from `main` afterwards.
pub fn restart() -> Result<(), AppError> {
    let exe = std::env::current_exe()?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    tracing::info!("Restarting {}", exe.display());
    std::process::Command::new(exe).args(args).spawn()?;

    Ok(())
}
