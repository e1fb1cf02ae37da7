//! `/ver` - running version and latest GitHub release.

use serenity::all::{CreateCommand, CreateEmbed};

use crate::{
    bot::command::reply::Reply,
    error::AppError,
    service::version::{build_report, VersionReport},
    state::AppState,
};

pub const NAME: &str = "ver";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME).description("Show current bot version and GitHub release.")
}

pub async fn run(state: &AppState) -> Result<Reply, AppError> {
    let report = build_report(
        &state.http_client,
        &state.config.bot_version,
        &state.config.github_repo,
    )
    .await;

    Ok(version_embed(&report).into())
}

pub fn version_embed(report: &VersionReport) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title("Version")
        .colour(report.status.colour())
        .field("Bot Version", format!("`{}`", report.bot_version), true);

    embed = match &report.repo {
        Some(repo) => embed.field("GitHub Repo", format!("`{}`", repo), true),
        None => embed.field("GitHub Repo", "Not configured", true),
    };

    if let Some(release) = &report.latest {
        embed = embed.field("Latest Release", format!("`{}`", release.tag), true);
        if !release.url.is_empty() {
            embed = embed.field(
                "Release URL",
                format!("[Open release]({})", release.url),
                false,
            );
        }
    }

    embed.field("Status", report.status.message(), false)
}
