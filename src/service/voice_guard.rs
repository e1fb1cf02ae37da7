//! Self-deafen enforcement.
//!
//! Members who self-deafen in a voice channel are disconnected unless they are exempt.
//! With the enhanced guard enabled, each disconnect attempt is followed by verification
//! passes after short delays, and a periodic sweep (see `scheduler::voice_guard`)
//! re-checks every cached voice state.
//!
//! All decisions are made against the serenity cache. Cache references are never held
//! across an `.await`; the relevant fields are copied into a `VoiceSnapshot` first.

use std::{
    collections::HashMap,
    future::Future,
    hash::Hash,
    sync::{Arc, Mutex, PoisonError},
};

use sea_orm::DatabaseConnection;
use serenity::all::{Context, EditMember, GuildId, Permissions, User, UserId, VoiceState};
use tokio::task::JoinHandle;

use crate::{
    config::VoiceGuardConfig,
    error::AppError,
    service::{
        exemption::ExemptionService,
        notify::{self, DISCONNECT_NOTICE},
    },
};

pub const VOICE_UPDATE_REASON: &str = "Auto-disconnect: self-deaf in voice channel";
pub const VERIFY_PASS_REASON: &str = "Auto-disconnect: self-deaf verification pass";
pub const STARTUP_SWEEP_REASON: &str = "Auto-disconnect: self-deaf on startup";
pub const PERIODIC_SWEEP_REASON: &str = "Auto-disconnect: periodic guard sweep";

/// Voice-related facts about a member, copied out of the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceSnapshot {
    pub is_bot: bool,
    pub in_channel: bool,
    pub self_deaf: bool,
}

impl VoiceSnapshot {
    pub fn from_state(state: Option<&VoiceState>, is_bot: bool) -> Self {
        Self {
            is_bot,
            in_channel: state.is_some_and(|state| state.channel_id.is_some()),
            self_deaf: state.is_some_and(|state| state.self_deaf),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Guild or member is no longer in the cache.
    NotCached,
    Bot,
    NotInChannel,
    NotSelfDeafened,
    Exempt,
    /// The bot cannot move members in this guild.
    MissingPermission,
}

impl SkipReason {
    /// Returns true when further verification passes for the member are pointless.
    pub fn ends_verification(self) -> bool {
        matches!(
            self,
            Self::NotCached | Self::Bot | Self::NotInChannel | Self::NotSelfDeafened
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Disconnect,
    Skip(SkipReason),
}

/// Returns true when a voice state update is a fresh self-deafen.
///
/// Toggling other flags while staying deafened in the same channel is not fresh.
/// Moving to another channel while deafened is.
pub fn is_new_self_deafen(old: Option<&VoiceState>, new: &VoiceState) -> bool {
    if new.channel_id.is_none() || !new.self_deaf {
        return false;
    }

    !matches!(old, Some(old) if old.self_deaf && old.channel_id == new.channel_id)
}

/// Checks that need no storage lookup.
fn precheck(snapshot: &VoiceSnapshot) -> Option<SkipReason> {
    if snapshot.is_bot {
        Some(SkipReason::Bot)
    } else if !snapshot.in_channel {
        Some(SkipReason::NotInChannel)
    } else if !snapshot.self_deaf {
        Some(SkipReason::NotSelfDeafened)
    } else {
        None
    }
}

/// Decides whether a member should be disconnected.
///
/// Conditions are checked in order: bot account, not in a channel, not self-deafened,
/// exempt, bot lacks Move Members.
pub fn evaluate(snapshot: &VoiceSnapshot, exempt: bool, can_move: bool) -> Decision {
    if let Some(reason) = precheck(snapshot) {
        return Decision::Skip(reason);
    }
    if exempt {
        return Decision::Skip(SkipReason::Exempt);
    }
    if !can_move {
        return Decision::Skip(SkipReason::MissingPermission);
    }

    Decision::Disconnect
}

struct CachedTarget {
    snapshot: VoiceSnapshot,
    can_move: bool,
}

fn bot_can_move(ctx: &Context, guild_id: GuildId) -> bool {
    let bot_id = ctx.cache.current_user().id;
    let Some(guild) = ctx.cache.guild(guild_id) else {
        return false;
    };

    guild
        .members
        .get(&bot_id)
        .is_some_and(|me| guild.member_permissions(me).contains(Permissions::MOVE_MEMBERS))
}

/// Bot accounts, including this bot, are never disconnected.
fn is_bot_account(user: &User, bot_id: UserId) -> bool {
    user.bot || user.id == bot_id
}

fn cached_target(ctx: &Context, guild_id: GuildId, user_id: UserId) -> Option<CachedTarget> {
    let bot_id = ctx.cache.current_user().id;
    let can_move = bot_can_move(ctx, guild_id);
    let guild = ctx.cache.guild(guild_id)?;

    let state = guild.voice_states.get(&user_id);
    let user = guild
        .members
        .get(&user_id)
        .map(|member| &member.user)
        .or_else(|| {
            state
                .and_then(|state| state.member.as_ref())
                .map(|member| &member.user)
        });

    // Neither a member nor a voice state: the member left the guild.
    let is_bot = match (user, state) {
        (None, None) => return None,
        (Some(user), _) => is_bot_account(user, bot_id),
        (None, Some(_)) => user_id == bot_id,
    };

    Some(CachedTarget {
        snapshot: VoiceSnapshot::from_state(state, is_bot),
        can_move,
    })
}

/// Members currently self-deafened in a voice channel of the guild.
fn self_deafened_members(ctx: &Context, guild_id: GuildId) -> Vec<UserId> {
    let Some(guild) = ctx.cache.guild(guild_id) else {
        return Vec::new();
    };

    guild
        .voice_states
        .values()
        .filter(|state| state.channel_id.is_some() && state.self_deaf)
        .map(|state| state.user_id)
        .collect()
}

/// Background tasks keyed so that at most one runs per key.
///
/// A task removes its own entry when its future completes. Aborted tasks are removed by
/// `abort_all`.
pub struct TaskRegistry<K> {
    tasks: Arc<Mutex<HashMap<K, JoinHandle<()>>>>,
}

impl<K> Default for TaskRegistry<K> {
    fn default() -> Self {
        Self {
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<K> TaskRegistry<K>
where
    K: Eq + Hash + Clone + Send + 'static,
{
    /// Spawns `task` under `key` unless a task for `key` is still running.
    ///
    /// # Returns
    /// - `true` - The task was spawned
    /// - `false` - A live task already holds the key; `task` is dropped
    pub fn spawn<F>(&self, key: K, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        // Held until the handle is inserted, so a finished task cannot remove its entry
        // before it exists.
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);

        if tasks.get(&key).is_some_and(|task| !task.is_finished()) {
            return false;
        }

        let registry = Arc::clone(&self.tasks);
        let entry = key.clone();
        let handle = tokio::spawn(async move {
            task.await;

            registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&entry);
        });

        tasks.insert(key, handle);
        true
    }

    #[cfg(test)]
    pub fn contains(&self, key: &K) -> bool {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    /// Aborts every task and clears the registry.
    ///
    /// # Returns
    /// Number of tasks that were still running.
    pub fn abort_all(&self) -> usize {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);

        let pending = tasks.values().filter(|task| !task.is_finished()).count();
        for (_, task) in tasks.drain() {
            task.abort();
        }

        pending
    }
}

/// Disconnects self-deafened members and tracks their verification passes.
pub struct VoiceGuard {
    db: DatabaseConnection,
    settings: VoiceGuardConfig,
    verify_tasks: TaskRegistry<(GuildId, UserId)>,
}

impl VoiceGuard {
    pub fn new(db: DatabaseConnection, settings: VoiceGuardConfig) -> Self {
        Self {
            db,
            settings,
            verify_tasks: TaskRegistry::default(),
        }
    }

    pub fn settings(&self) -> &VoiceGuardConfig {
        &self.settings
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Disconnects the member if they are self-deafened and not exempt.
    ///
    /// On a disconnect the member receives `DISCONNECT_NOTICE` by DM. Closed DMs are
    /// ignored; any other DM failure is logged.
    ///
    /// # Arguments
    /// - `ctx` - Context with the cache the decision is made against
    /// - `guild_id` - Guild of the voice channel
    /// - `user_id` - Member to check
    /// - `reason` - Audit log reason for the disconnect
    ///
    /// # Returns
    /// - `Ok(Decision::Disconnect)` - The member was disconnected
    /// - `Ok(Decision::Skip(_))` - Nothing was done, and why
    /// - `Err(AppError)` - Exemption lookup or the disconnect request failed
    pub async fn maybe_disconnect(
        &self,
        ctx: &Context,
        guild_id: GuildId,
        user_id: UserId,
        reason: &str,
    ) -> Result<Decision, AppError> {
        let Some(target) = cached_target(ctx, guild_id, user_id) else {
            return Ok(Decision::Skip(SkipReason::NotCached));
        };
        if let Some(skip) = precheck(&target.snapshot) {
            return Ok(Decision::Skip(skip));
        }

        let exempt = ExemptionService::new(&self.db)
            .is_exempt(guild_id.get(), user_id.get())
            .await?;

        match evaluate(&target.snapshot, exempt, target.can_move) {
            Decision::Disconnect => {}
            Decision::Skip(SkipReason::MissingPermission) => {
                tracing::warn!("Missing Move Members permission in guild {}", guild_id);
                return Ok(Decision::Skip(SkipReason::MissingPermission));
            }
            skip => return Ok(skip),
        }

        let builder = EditMember::new().disconnect_member().audit_log_reason(reason);
        if let Err(e) = guild_id.edit_member(ctx, user_id, builder).await {
            if crate::error::is_forbidden(&e) {
                tracing::warn!("Forbidden to disconnect {} in guild {}", user_id, guild_id);
                return Ok(Decision::Skip(SkipReason::MissingPermission));
            }
            return Err(e.into());
        }

        tracing::info!(
            "Disconnected {} in guild {} for self-deaf ({})",
            user_id,
            guild_id,
            reason
        );

        if let Err(e) = notify::send_dm(ctx, user_id, DISCONNECT_NOTICE).await {
            if !e.is_forbidden() {
                tracing::error!("Failed to DM {}: {}", user_id, e);
            }
        }

        Ok(Decision::Disconnect)
    }

    /// Schedules verification passes for a member after a self-deafen.
    ///
    /// Does nothing unless the enhanced guard is enabled. At most one verification task
    /// runs per `(guild, user)`; the task removes itself from the registry when done.
    pub fn schedule_verify(self: &Arc<Self>, ctx: &Context, guild_id: GuildId, user_id: UserId) {
        if !self.settings.enhanced || self.settings.verify_delays.is_empty() {
            return;
        }

        let guard = Arc::clone(self);
        let ctx = ctx.clone();
        self.verify_tasks.spawn((guild_id, user_id), async move {
            guard.verify_worker(&ctx, guild_id, user_id).await;
        });
    }

    async fn verify_worker(&self, ctx: &Context, guild_id: GuildId, user_id: UserId) {
        for delay in &self.settings.verify_delays {
            tokio::time::sleep(*delay).await;

            match self
                .maybe_disconnect(ctx, guild_id, user_id, VERIFY_PASS_REASON)
                .await
            {
                Ok(Decision::Disconnect) => return,
                Ok(Decision::Skip(skip)) if skip.ends_verification() => return,
                Ok(Decision::Skip(_)) => {}
                Err(e) => {
                    tracing::error!(
                        "Verification task failed for {}/{}: {}",
                        guild_id,
                        user_id,
                        e
                    );
                    return;
                }
            }
        }
    }

    /// Checks every cached voice state and disconnects self-deafened members.
    ///
    /// Guilds where the bot lacks Move Members are skipped with a warning.
    ///
    /// # Returns
    /// Number of members disconnected.
    pub async fn scan_voice_states(&self, ctx: &Context, reason: &str) -> usize {
        let mut disconnected = 0;

        for guild_id in ctx.cache.guilds() {
            if !bot_can_move(ctx, guild_id) {
                tracing::warn!("Missing Move Members permission in guild {}", guild_id);
                continue;
            }

            for user_id in self_deafened_members(ctx, guild_id) {
                match self.maybe_disconnect(ctx, guild_id, user_id, reason).await {
                    Ok(Decision::Disconnect) => disconnected += 1,
                    Ok(Decision::Skip(_)) => {}
                    Err(e) => {
                        tracing::error!("Failed to check {} in guild {}: {}", user_id, guild_id, e)
                    }
                }
            }
        }

        tracing::debug!("Voice sweep disconnected {} member(s)", disconnected);

        disconnected
    }

    /// Aborts all outstanding verification tasks.
    pub fn shutdown(&self) {
        let pending = self.verify_tasks.abort_all();
        if pending > 0 {
            tracing::info!("Aborted {} pending verification task(s)", pending);
        }
    }
}
