use super::*;

/// Tests removing an exemption.
///
/// Expected: Ok(true), then Ok(false) on a second attempt
#[tokio::test]
async fn removes_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::TempExempt)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_temp_exempt(db, 1, 2).await?;

    let repo = TempExemptRepository::new(db);
    assert!(repo.remove(1, 2).await?);
    assert!(!repo.remove(1, 2).await?);

    Ok(())
}
