//! Bot owner resolution.
//!
//! The owner is either pinned with `OWNER_ID` or derived from the Discord application:
//! the application owner, or every member of the owning team. The "primary" owner is
//! the single account that receives exemption requests.

use std::collections::HashSet;

use serenity::all::{CurrentApplicationInfo, UserId};
use serenity::http::Http;
use tokio::sync::OnceCell;

use crate::error::AppError;

/// Resolved set of accounts allowed to use owner-only commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Owners {
    /// Account that receives exemption requests, if any could be determined.
    pub primary: Option<UserId>,
    pub all: HashSet<UserId>,
}

impl Owners {
    /// Builds the owner set from the configured owner and application metadata.
    ///
    /// # Arguments
    /// - `configured` - `OWNER_ID`, which overrides everything else
    /// - `app_owner` - Owner of the application when it is not team-owned
    /// - `team` - Team owner and team member IDs when the application belongs to a team
    pub fn from_parts(
        configured: Option<UserId>,
        app_owner: Option<UserId>,
        team: Option<(UserId, Vec<UserId>)>,
    ) -> Self {
        if let Some(owner) = configured {
            return Self {
                primary: Some(owner),
                all: HashSet::from([owner]),
            };
        }

        if let Some((team_owner, members)) = team {
            let mut all: HashSet<UserId> = members.into_iter().collect();
            all.insert(team_owner);
            return Self {
                primary: Some(team_owner),
                all,
            };
        }

        Self {
            primary: app_owner,
            all: app_owner.into_iter().collect(),
        }
    }

    fn from_application(info: &CurrentApplicationInfo) -> Self {
        let team = info.team.as_ref().map(|team| {
            (
                team.owner_user_id,
                team.members.iter().map(|member| member.user.id).collect(),
            )
        });

        Self::from_parts(None, info.owner.as_ref().map(|user| user.id), team)
    }

    pub fn contains(&self, user_id: UserId) -> bool {
        self.all.contains(&user_id)
    }
}

/// Lazily resolves and caches the bot owners.
///
/// Application info is only fetched when `OWNER_ID` is not configured, and at most once
/// per successful lookup.
pub struct OwnerResolver {
    configured: Option<UserId>,
    owners: OnceCell<Owners>,
}

impl OwnerResolver {
    pub fn new(configured: Option<u64>) -> Self {
        Self {
            configured: configured.map(UserId::new),
            owners: OnceCell::new(),
        }
    }

    /// Returns the owners, fetching application info from Discord on first use.
    pub async fn resolve(&self, http: &Http) -> Result<&Owners, AppError> {
        self.owners
            .get_or_try_init(|| async {
                if self.configured.is_some() {
                    return Ok(Owners::from_parts(self.configured, None, None));
                }

                let info = http.get_current_application_info().await?;
                let owners = Owners::from_application(&info);
                tracing::info!("Resolved {} bot owner(s) from application info", owners.all.len());

                Ok::<_, AppError>(owners)
            })
            .await
    }

    pub async fn is_owner(&self, http: &Http, user_id: UserId) -> Result<bool, AppError> {
        Ok(self.resolve(http).await?.contains(user_id))
    }

    pub async fn primary(&self, http: &Http) -> Result<Option<UserId>, AppError> {
        Ok(self.resolve(http).await?.primary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: u64) -> UserId {
        UserId::new(value)
    }

    #[test]
    fn configured_owner_wins() {
        let owners = Owners::from_parts(Some(id(1)), Some(id(2)), Some((id(3), vec![id(4)])));

        assert_eq!(owners.primary, Some(id(1)));
        assert!(owners.contains(id(1)));
        assert!(!owners.contains(id(2)));
        assert!(!owners.contains(id(4)));
    }

    #[test]
    fn team_members_are_all_owners() {
        let owners = Owners::from_parts(None, Some(id(2)), Some((id(3), vec![id(4), id(5)])));

        assert_eq!(owners.primary, Some(id(3)));
        assert!(owners.contains(id(3)));
        assert!(owners.contains(id(4)));
        assert!(owners.contains(id(5)));
        assert!(!owners.contains(id(2)));
    }

    #[test]
    fn falls_back_to_application_owner() {
        let owners = Owners::from_parts(None, Some(id(2)), None);

        assert_eq!(owners.primary, Some(id(2)));
        assert_eq!(owners.all, HashSet::from([id(2)]));
    }

    #[test]
    fn nobody_when_nothing_is_known() {
        let owners = Owners::from_parts(None, None, None);

        assert_eq!(owners, Owners::default());
    }

    #[tokio::test]
    async fn configured_owner_resolves_without_http() {
        let resolver = OwnerResolver::new(Some(7));
        let http = Http::new("");

        assert!(resolver.is_owner(&http, id(7)).await.unwrap());
        assert!(!resolver.is_owner(&http, id(8)).await.unwrap());
        assert_eq!(resolver.primary(&http).await.unwrap(), Some(id(7)));
    }
}
