use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum SmsCodes {
    Table,
    Id,
    Phone,
    Code,
    ExpiresAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SmsCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SmsCodes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SmsCodes::Phone).string().not_null())
                    .col(ColumnDef::new(SmsCodes::Code).string().not_null())
                    .col(
                        ColumnDef::new(SmsCodes::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // upsert target: one code per phone
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_sms_codes_phone")
                    .table(SmsCodes::Table)
                    .col(SmsCodes::Phone)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SmsCodes::Table).to_owned())
            .await?;
        Ok(())
    }
}
