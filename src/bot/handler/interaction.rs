use serenity::all::{Context, Interaction};

use crate::{bot::command, state::AppState};

/// Handle an interaction (slash commands)
pub async fn handle_interaction_create(state: &AppState, ctx: Context, interaction: Interaction) {
    command::handle_interaction(&ctx, state, &interaction).await;
}
