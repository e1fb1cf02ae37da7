use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TempExempt::Table)
                    .if_not_exists()
                    .col(big_integer(TempExempt::GuildId))
                    .col(big_integer(TempExempt::UserId))
                    .col(timestamp_with_time_zone(TempExempt::ExpiresAt))
                    .col(big_integer_null(TempExempt::GrantedBy))
                    .col(text_null(TempExempt::Reason))
                    .primary_key(
                        Index::create()
                            .col(TempExempt::GuildId)
                            .col(TempExempt::UserId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_temp_exempt_expires_at")
                    .table(TempExempt::Table)
                    .col(TempExempt::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_temp_exempt_expires_at")
                    .table(TempExempt::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(TempExempt::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TempExempt {
    Table,
    GuildId,
    UserId,
    ExpiresAt,
    GrantedBy,
    Reason,
}
