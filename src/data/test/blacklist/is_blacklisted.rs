use super::*;

/// Tests lookup of a blacklisted member.
///
/// Expected: Ok(true)
#[tokio::test]
async fn returns_true_for_entry() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Blacklist)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_blacklist_entry(db, 1, 2).await?;

    let repo = BlacklistRepository::new(db);
    assert!(repo.is_blacklisted(1, 2).await?);

    Ok(())
}

/// Tests lookup of a member who is not blacklisted.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_without_entry() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Blacklist)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = BlacklistRepository::new(db);
    assert!(!repo.is_blacklisted(1, 2).await?);

    Ok(())
}

/// Tests that an entry only applies to its own guild.
///
/// Expected: Ok(false) for the same user in another guild
#[tokio::test]
async fn is_scoped_to_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Blacklist)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_blacklist_entry(db, 1, 2).await?;

    let repo = BlacklistRepository::new(db);
    assert!(!repo.is_blacklisted(99, 2).await?);

    Ok(())
}
