use super::*;

/// Tests listing entries newest first.
///
/// Expected: Ok with entries ordered by added_at descending
#[tokio::test]
async fn orders_newest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Blacklist)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    for (user_id, age_minutes) in [(1u64, 30i64), (2, 10), (3, 20)] {
        factory::blacklist::BlacklistFactory::new(db)
            .guild_id(7)
            .user_id(user_id)
            .added_at(now - Duration::minutes(age_minutes))
            .build()
            .await?;
    }

    let repo = BlacklistRepository::new(db);
    let entries = repo.list(7, 50).await?;

    let user_ids: Vec<u64> = entries.iter().map(|e| e.user_id).collect();
    assert_eq!(user_ids, vec![2, 3, 1]);

    Ok(())
}

/// Tests that the limit caps the number of returned entries.
///
/// Expected: Ok with exactly `limit` entries
#[tokio::test]
async fn respects_limit() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Blacklist)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for user_id in 1..=5u64 {
        factory::create_blacklist_entry(db, 7, user_id).await?;
    }

    let repo = BlacklistRepository::new(db);
    let entries = repo.list(7, 3).await?;

    assert_eq!(entries.len(), 3);

    Ok(())
}

/// Tests that only the requested guild's entries are listed.
///
/// Expected: Ok with entries from guild 7 only
#[tokio::test]
async fn returns_only_requested_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Blacklist)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_blacklist_entry(db, 7, 1).await?;
    factory::create_blacklist_entry(db, 8, 2).await?;

    let repo = BlacklistRepository::new(db);
    let entries = repo.list(7, 50).await?;

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].guild_id, 7);
    assert_eq!(entries[0].user_id, 1);

    Ok(())
}

/// Tests listing an empty guild.
///
/// Expected: Ok(empty vec)
#[tokio::test]
async fn returns_empty_for_unknown_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Blacklist)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = BlacklistRepository::new(db);
    assert!(repo.list(7, 50).await?.is_empty());

    Ok(())
}
