use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum JournalEntries {
    Table,
    Id,
    Nendo,
    Date,
    DebitCode,
    DebitAmount,
    CreditCode,
    CreditAmount,
    Note,
    Checked,
    Deleted,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(JournalEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JournalEntries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(JournalEntries::Nendo).string().not_null())
                    .col(ColumnDef::new(JournalEntries::Date).string().not_null())
                    .col(
                        ColumnDef::new(JournalEntries::DebitCode)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JournalEntries::DebitAmount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JournalEntries::CreditCode)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JournalEntries::CreditAmount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(JournalEntries::Note).string())
                    .col(
                        ColumnDef::new(JournalEntries::Checked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(JournalEntries::Deleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(JournalEntries::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JournalEntries::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-journal_entries-nendo-date")
                    .table(JournalEntries::Table)
                    .col(JournalEntries::Nendo)
                    .col(JournalEntries::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-journal_entries-debit_code")
                    .table(JournalEntries::Table)
                    .col(JournalEntries::DebitCode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-journal_entries-credit_code")
                    .table(JournalEntries::Table)
                    .col(JournalEntries::CreditCode)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(JournalEntries::Table).to_owned())
            .await?;
        Ok(())
    }
}
