use super::*;

/// Tests granting a new temporary exemption.
///
/// Expected: Ok with the exemption persisted
#[tokio::test]
async fn creates_exemption() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::TempExempt)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let expires_at = Utc::now() + Duration::seconds(300);
    let repo = TempExemptRepository::new(db);
    let exemption = repo
        .grant(GrantTempExemptionParam {
            guild_id: 1,
            user_id: 2,
            expires_at,
            granted_by: Some(3),
            reason: Some("recording".to_string()),
        })
        .await?;

    assert_eq!(exemption.expires_at, expires_at);

    let stored = repo.find(1, 2).await?.unwrap();
    assert_eq!(stored.granted_by, Some(3));
    assert_eq!(stored.reason.as_deref(), Some("recording"));
    assert!(stored.is_active_at(Utc::now()));

    Ok(())
}

/// Tests that a second grant replaces the first one.
///
/// Verifies the (guild_id, user_id) key is upserted, extending an expired or
/// running exemption rather than failing.
///
/// Expected: Ok with one row carrying the new expiry
#[tokio::test]
async fn replaces_existing_exemption() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::TempExempt)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::temp_exempt::TempExemptFactory::new(db)
        .guild_id(1)
        .user_id(2)
        .expires_in_seconds(-60)
        .build()
        .await?;

    let repo = TempExemptRepository::new(db);
    repo.grant(GrantTempExemptionParam {
        guild_id: 1,
        user_id: 2,
        expires_at: Utc::now() + Duration::hours(2),
        granted_by: None,
        reason: None,
    })
    .await?;

    let count = entity::prelude::TempExempt::find().count(db).await?;
    assert_eq!(count, 1);
    assert!(repo.is_active(1, 2, Utc::now()).await?);

    Ok(())
}
