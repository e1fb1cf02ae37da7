use super::*;

/// Tests an unexpired exemption.
///
/// Expected: Ok(true)
#[tokio::test]
async fn returns_true_before_expiry() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::TempExempt)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_temp_exempt(db, 1, 2).await?;

    let repo = TempExemptRepository::new(db);
    assert!(repo.is_active(1, 2, Utc::now()).await?);

    Ok(())
}

/// Tests a member without any exemption.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_without_exemption() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::TempExempt)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TempExemptRepository::new(db);
    assert!(!repo.is_active(1, 2, Utc::now()).await?);

    Ok(())
}

/// Tests that an expired exemption is reported inactive and deleted.
///
/// Expected: Ok(false) and the row no longer exists
#[tokio::test]
async fn deletes_expired_exemption() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::TempExempt)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::temp_exempt::TempExemptFactory::new(db)
        .guild_id(1)
        .user_id(2)
        .expires_in_seconds(-1)
        .build()
        .await?;

    let repo = TempExemptRepository::new(db);
    assert!(!repo.is_active(1, 2, Utc::now()).await?);
    assert!(repo.find(1, 2).await?.is_none());

    Ok(())
}

/// Tests the expiry boundary.
///
/// An exemption expiring exactly at `now` no longer applies.
///
/// Expected: Ok(false)
#[tokio::test]
async fn expires_at_exact_instant() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::TempExempt)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    factory::temp_exempt::TempExemptFactory::new(db)
        .guild_id(1)
        .user_id(2)
        .expires_at(now)
        .build()
        .await?;

    let repo = TempExemptRepository::new(db);
    assert!(!repo.is_active(1, 2, now).await?);

    Ok(())
}
