use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum AccountClassifications {
    Table,
    Code,
    Name,
    Orientation,
    Custom,
}

#[derive(Iden)]
enum AccountGroups {
    Table,
    Code,
    Name,
    ClassificationCode,
    Custom,
}

#[derive(Iden)]
enum Accounts {
    Table,
    Code,
    Name,
    GroupCode,
    Deleted,
    Custom,
}

#[derive(Iden)]
enum FiscalYears {
    Table,
    Code,
    Fixed,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccountClassifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccountClassifications::Code)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AccountClassifications::Name)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AccountClassifications::Orientation)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AccountClassifications::Custom).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AccountGroups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccountGroups::Code)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AccountGroups::Name).string().not_null())
                    .col(
                        ColumnDef::new(AccountGroups::ClassificationCode)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AccountGroups::Custom).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-account_groups-classification_code")
                            .from(AccountGroups::Table, AccountGroups::ClassificationCode)
                            .to(
                                AccountClassifications::Table,
                                AccountClassifications::Code,
                            ),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Code)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accounts::Name).string().not_null())
                    .col(ColumnDef::new(Accounts::GroupCode).string().not_null())
                    .col(
                        ColumnDef::new(Accounts::Deleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Accounts::Custom).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-accounts-group_code")
                            .from(Accounts::Table, Accounts::GroupCode)
                            .to(AccountGroups::Table, AccountGroups::Code),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-accounts-group_code")
                    .table(Accounts::Table)
                    .col(Accounts::GroupCode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FiscalYears::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FiscalYears::Code)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FiscalYears::Fixed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FiscalYears::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AccountGroups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AccountClassifications::Table).to_owned())
            .await?;
        Ok(())
    }
}
