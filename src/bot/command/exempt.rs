//! `/exempt` - temporary exemption requests and owner decisions.

use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption, GuildId,
    ResolvedOption, User,
};

use crate::{
    bot::command::{guild_name, options, reply::Reply, require_guild, require_owner},
    error::{command::CommandError, AppError},
    service::{
        exemption::{ExemptionService, MAX_EXEMPTION_SECONDS, MIN_EXEMPTION_SECONDS},
        notify::send_dm,
    },
    state::AppState,
};

pub const NAME: &str = "exempt";

fn seconds_option() -> CreateCommandOption {
    CreateCommandOption::new(
        CommandOptionType::Integer,
        "seconds",
        "How long to exempt (seconds)",
    )
    .min_int_value(MIN_EXEMPTION_SECONDS as u64)
    .max_int_value(MAX_EXEMPTION_SECONDS as u64)
    .required(true)
}

fn reason_option() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::String, "reason", "Optional reason")
}

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Request or grant temporary auto-disconnect exemptions.")
        .dm_permission(false)
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "request",
                "Request a temporary exemption.",
            )
            .add_sub_option(seconds_option())
            .add_sub_option(reason_option()),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "grant",
                "Grant a temporary exemption.",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::User, "user", "User to exempt")
                    .required(true),
            )
            .add_sub_option(seconds_option())
            .add_sub_option(reason_option()),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "deny",
                "Deny a temporary exemption request.",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::User, "user", "User to deny")
                    .required(true),
            )
            .add_sub_option(reason_option()),
        )
}

pub async fn run(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<Reply, AppError> {
    let guild_id = require_guild(command)?;

    let (subcommand, sub_options) = options::subcommand(command.data.options())
        .ok_or_else(|| CommandError::UnknownCommand(NAME.to_string()))?;

    match subcommand {
        "request" => request(ctx, state, command, guild_id, &sub_options).await,
        "grant" => {
            require_owner(ctx, state, command.user.id).await?;
            grant(ctx, state, command, guild_id, &sub_options).await
        }
        "deny" => {
            require_owner(ctx, state, command.user.id).await?;
            deny(ctx, guild_id, &sub_options).await
        }
        other => Err(CommandError::UnknownCommand(format!("{} {}", NAME, other)).into()),
    }
}

fn seconds(sub_options: &[ResolvedOption<'_>]) -> Result<i64, CommandError> {
    let seconds = options::required(options::integer(sub_options, "seconds"), "seconds")?;
    Ok(seconds.clamp(MIN_EXEMPTION_SECONDS, MAX_EXEMPTION_SECONDS))
}

fn target<'a>(sub_options: &[ResolvedOption<'a>]) -> Result<&'a User, CommandError> {
    options::required(options::user(sub_options, "user"), "user")
}

async fn request(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
    guild_id: GuildId,
    sub_options: &[ResolvedOption<'_>],
) -> Result<Reply, AppError> {
    let seconds = seconds(sub_options)?;
    let reason = options::reason(sub_options);

    if ExemptionService::new(&state.db)
        .has_active_temp_exemption(guild_id.get(), command.user.id.get())
        .await?
    {
        return Ok("You already have an active exemption.".into());
    }

    let owner = match state.owners.primary(&ctx.http).await {
        Ok(owner) => owner,
        Err(e) => {
            tracing::error!("Failed to resolve bot owner: {}", e);
            None
        }
    };
    let Some(owner) = owner else {
        return Ok("Could not contact the bot owner.".into());
    };

    let message = format!(
        "Exemption request:\n\
         - Guild: {} ({})\n\
         - User: {} ({})\n\
         - Seconds: {}\n\
         - Reason: {}\n\
         Use /exempt grant to approve.",
        guild_name(ctx, guild_id),
        guild_id,
        command.user.tag(),
        command.user.id,
        seconds,
        reason.as_deref().unwrap_or("no reason")
    );

    if let Err(e) = send_dm(ctx, owner, message).await {
        if e.is_forbidden() {
            tracing::warn!("Failed to DM owner for request from {}", command.user.id);
        } else {
            tracing::error!("Failed to DM owner for request from {}: {}", command.user.id, e);
        }
        return Ok("Could not DM the bot owner.".into());
    }

    Ok("Request sent to the bot owner.".into())
}

async fn grant(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
    guild_id: GuildId,
    sub_options: &[ResolvedOption<'_>],
) -> Result<Reply, AppError> {
    let user = target(sub_options)?;
    let seconds = seconds(sub_options)?;
    let reason = options::reason(sub_options);

    ExemptionService::new(&state.db)
        .grant_temp_exemption(
            guild_id.get(),
            user.id.get(),
            seconds,
            Some(command.user.id.get()),
            reason.clone(),
        )
        .await?;

    tracing::info!(
        "{} granted {} a {} second exemption in guild {}",
        command.user.id,
        user.id,
        seconds,
        guild_id
    );

    let message = format!(
        "Your exemption request was approved.\n\
         - Guild: {} ({})\n\
         - Duration: {} seconds\n\
         - Reason: {}",
        guild_name(ctx, guild_id),
        guild_id,
        seconds,
        reason.as_deref().unwrap_or("no reason")
    );
    notify_member(ctx, user, message).await;

    Ok(format!("Granted exemption for <@{}> ({} seconds).", user.id, seconds).into())
}

async fn deny(
    ctx: &Context,
    guild_id: GuildId,
    sub_options: &[ResolvedOption<'_>],
) -> Result<Reply, AppError> {
    let user = target(sub_options)?;
    let reason = options::reason(sub_options);

    let message = format!(
        "Your exemption request was denied.\n\
         - Guild: {} ({})\n\
         - Reason: {}",
        guild_name(ctx, guild_id),
        guild_id,
        reason.as_deref().unwrap_or("no reason")
    );
    notify_member(ctx, user, message).await;

    Ok(format!("Denied exemption for <@{}>.", user.id).into())
}

/// DMs the member about the owner's decision; delivery failures do not fail the command.
async fn notify_member(ctx: &Context, user: &User, message: String) {
    if let Err(e) = send_dm(ctx, user.id, message).await {
        if !e.is_forbidden() {
            tracing::error!("Failed to DM user {}: {}", user.id, e);
        }
    }
}
