use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Blacklist::Table)
                    .if_not_exists()
                    .col(big_integer(Blacklist::GuildId))
                    .col(big_integer(Blacklist::UserId))
                    .col(big_integer_null(Blacklist::AddedBy))
                    .col(text_null(Blacklist::Reason))
                    .col(timestamp_with_time_zone(Blacklist::AddedAt))
                    .primary_key(
                        Index::create()
                            .col(Blacklist::GuildId)
                            .col(Blacklist::UserId),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing is always scoped to one guild, newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_blacklist_guild_id_added_at")
                    .table(Blacklist::Table)
                    .col(Blacklist::GuildId)
                    .col(Blacklist::AddedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_blacklist_guild_id_added_at")
                    .table(Blacklist::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Blacklist::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Blacklist {
    Table,
    GuildId,
    UserId,
    AddedBy,
    Reason,
    AddedAt,
}
