use super::*;

/// Tests adding a new blacklist entry.
///
/// Verifies that the repository stores the guild, user, author and reason and
/// returns them in the created entry.
///
/// Expected: Ok with entry persisted
#[tokio::test]
async fn creates_new_entry() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Blacklist)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = BlacklistRepository::new(db);
    let entry = repo
        .add(AddBlacklistParam {
            guild_id: 1,
            user_id: 2,
            added_by: Some(3),
            reason: Some("streams with headphones".to_string()),
        })
        .await?;

    assert_eq!(entry.guild_id, 1);
    assert_eq!(entry.user_id, 2);
    assert_eq!(entry.added_by, Some(3));
    assert_eq!(entry.reason.as_deref(), Some("streams with headphones"));

    let stored = entity::prelude::Blacklist::find_by_id((1i64, 2i64))
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.reason.as_deref(), Some("streams with headphones"));
    assert_eq!(stored.added_by, Some(3));

    Ok(())
}

/// Tests re-adding an existing member.
///
/// Verifies that adding the same guild and user twice replaces the first entry
/// instead of failing on the primary key or creating a duplicate.
///
/// Expected: Ok with a single row holding the second reason
#[tokio::test]
async fn replaces_existing_entry() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Blacklist)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::blacklist::BlacklistFactory::new(db)
        .guild_id(1)
        .user_id(2)
        .reason("old")
        .added_at(Utc::now() - Duration::days(3))
        .build()
        .await?;

    let repo = BlacklistRepository::new(db);
    repo.add(AddBlacklistParam {
        guild_id: 1,
        user_id: 2,
        added_by: None,
        reason: Some("new".to_string()),
    })
    .await?;

    let count = entity::prelude::Blacklist::find().count(db).await?;
    assert_eq!(count, 1);

    let stored = entity::prelude::Blacklist::find_by_id((1i64, 2i64))
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.reason.as_deref(), Some("new"));
    assert_eq!(stored.added_by, None);
    assert!(stored.added_at > Utc::now() - Duration::minutes(1));

    Ok(())
}

/// Tests that the same user can be blacklisted in several guilds.
///
/// Expected: Ok with one row per guild
#[tokio::test]
async fn keeps_guilds_separate() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Blacklist)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = BlacklistRepository::new(db);
    for guild_id in [10, 20] {
        repo.add(AddBlacklistParam {
            guild_id,
            user_id: 5,
            added_by: None,
            reason: None,
        })
        .await?;
    }

    let count = entity::prelude::Blacklist::find().count(db).await?;
    assert_eq!(count, 2);

    Ok(())
}
