use super::*;

/// Tests removing a blacklisted member.
///
/// Expected: Ok(true) and the row is gone
#[tokio::test]
async fn removes_existing_entry() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Blacklist)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_blacklist_entry(db, 1, 2).await?;

    let repo = BlacklistRepository::new(db);
    assert!(repo.remove(1, 2).await?);
    assert!(!repo.is_blacklisted(1, 2).await?);

    Ok(())
}

/// Tests removing a member who is not blacklisted.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_when_missing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Blacklist)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = BlacklistRepository::new(db);
    assert!(!repo.remove(1, 2).await?);

    Ok(())
}

/// Tests that removal in one guild leaves other guilds untouched.
///
/// Expected: Ok with the other guild's entry intact
#[tokio::test]
async fn leaves_other_guilds() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Blacklist)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_blacklist_entry(db, 1, 2).await?;
    factory::create_blacklist_entry(db, 3, 2).await?;

    let repo = BlacklistRepository::new(db);
    repo.remove(1, 2).await?;

    assert!(repo.is_blacklisted(3, 2).await?);

    Ok(())
}
