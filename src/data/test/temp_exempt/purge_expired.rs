use super::*;

/// Tests purging expired exemptions.
///
/// Verifies that only rows at or past their expiry are deleted.
///
/// Expected: Ok(2) with the active exemption kept
#[tokio::test]
async fn deletes_only_expired_rows() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::TempExempt)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::temp_exempt::TempExemptFactory::new(db)
        .expires_in_seconds(-600)
        .build()
        .await?;
    factory::temp_exempt::TempExemptFactory::new(db)
        .expires_in_seconds(-5)
        .build()
        .await?;
    let active = factory::create_temp_exempt(db, 1, 2).await?;

    let repo = TempExemptRepository::new(db);
    let purged = repo.purge_expired(Utc::now()).await?;

    assert_eq!(purged, 2);
    let remaining = entity::prelude::TempExempt::find().all(db).await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].user_id, active.user_id);

    Ok(())
}

/// Tests purging when nothing has expired.
///
/// Expected: Ok(0)
#[tokio::test]
async fn purges_nothing_when_all_active() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::TempExempt)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_temp_exempt(db, 1, 2).await?;

    let repo = TempExemptRepository::new(db);
    assert_eq!(repo.purge_expired(Utc::now()).await?, 0);
    assert_eq!(entity::prelude::TempExempt::find().count(db).await?, 1);

    Ok(())
}
