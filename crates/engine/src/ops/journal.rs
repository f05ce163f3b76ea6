//! Journal write and scan operations.
//!
//! `create_journal`/`update_journal` run validation and persistence inside
//! one DB transaction, so two concurrent writers can never both pass
//! validation against uncommitted state. Rejections come back as data
//! ([`SaveResult::Rejected`]); only infrastructure faults become errors.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue, Condition, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait, prelude::*,
};

use crate::{
    CreateJournalCmd, EngineError, JournalEntry, JournalUpdateCmd, ResultEngine, SaveResult,
    journal, validation,
};

use super::{
    Engine, directory::existing_account_codes, normalize_optional_text, with_tx,
};

/// Filters for scanning journal entries.
///
/// Every field narrows the result set; an empty filter matches all
/// non-deleted entries.
#[derive(Clone, Debug, Default)]
pub struct JournalFilter {
    pub nendo: Option<String>,
    /// `YYYYMM` prefix of the transaction date.
    pub month: Option<String>,
    /// Matches entries with this account on either side.
    pub account_code: Option<String>,
    /// Substring match on the note text.
    pub note: Option<String>,
    /// Exact amount on either side.
    pub amount: Option<i64>,
    pub checked: Option<bool>,
    /// If true, includes soft-deleted entries (default: false).
    pub include_deleted: bool,
}

pub(super) fn validate_filter(filter: &JournalFilter) -> ResultEngine<()> {
    if let Some(month) = &filter.month
        && (month.len() != 6 || !month.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(EngineError::InvalidArgument(format!(
            "invalid month filter: {month}"
        )));
    }
    Ok(())
}

pub(super) trait ApplyJournalFilters: QueryFilter + Sized {
    fn apply_journal_filters(self, filter: &JournalFilter) -> Self;
}

impl<T> ApplyJournalFilters for T
where
    T: QueryFilter + Sized,
{
    fn apply_journal_filters(mut self, filter: &JournalFilter) -> Self {
        if let Some(nendo) = &filter.nendo {
            self = self.filter(journal::Column::Nendo.eq(nendo.as_str()));
        }
        if let Some(month) = &filter.month {
            self = self.filter(journal::Column::Date.starts_with(month.as_str()));
        }
        if let Some(code) = &filter.account_code {
            self = self.filter(
                Condition::any()
                    .add(journal::Column::DebitCode.eq(code.as_str()))
                    .add(journal::Column::CreditCode.eq(code.as_str())),
            );
        }
        if let Some(note) = &filter.note {
            self = self.filter(journal::Column::Note.contains(note.as_str()));
        }
        if let Some(amount) = filter.amount {
            self = self.filter(
                Condition::any()
                    .add(journal::Column::DebitAmount.eq(amount))
                    .add(journal::Column::CreditAmount.eq(amount)),
            );
        }
        if let Some(checked) = filter.checked {
            self = self.filter(journal::Column::Checked.eq(checked));
        }
        if !filter.include_deleted {
            self = self.filter(journal::Column::Deleted.eq(false));
        }
        self
    }
}

impl Engine {
    /// Validate and persist a new journal entry.
    ///
    /// Both request shapes (two-sided entry, single posting from a ledger
    /// view) go through here; the single posting is normalized to a
    /// two-sided row before the insert.
    pub async fn create_journal(
        &self,
        cmd: &CreateJournalCmd,
        now: DateTime<Utc>,
    ) -> ResultEngine<SaveResult> {
        with_tx!(self, |db_tx| {
            let codes = cmd.account_codes();
            let existing = existing_account_codes(&db_tx, &codes).await?;
            let violations = match cmd {
                CreateJournalCmd::Entry(entry) => validation::validate_save(entry, &existing),
                CreateJournalCmd::SinglePosting(posting) => {
                    validation::validate_single_posting(posting, &existing)
                }
            };
            if !violations.is_empty() {
                tracing::debug!(violations = violations.len(), "journal entry rejected");
                Ok(SaveResult::Rejected(violations))
            } else {
                let row = cmd.normalized().ok_or_else(|| {
                    EngineError::InvalidArgument("unusable amount selection".to_string())
                })?;
                let model = journal::ActiveModel {
                    id: ActiveValue::NotSet,
                    nendo: ActiveValue::Set(row.nendo),
                    date: ActiveValue::Set(row.date),
                    debit_code: ActiveValue::Set(row.debit_code),
                    debit_amount: ActiveValue::Set(row.debit_amount),
                    credit_code: ActiveValue::Set(row.credit_code),
                    credit_amount: ActiveValue::Set(row.credit_amount),
                    note: ActiveValue::Set(normalize_optional_text(row.note.as_deref())),
                    checked: ActiveValue::Set(false),
                    deleted: ActiveValue::Set(false),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                }
                .insert(&db_tx)
                .await?;

                tracing::info!(id = model.id, nendo = %model.nendo, "journal entry created");
                Ok(SaveResult::Saved(model.id))
            }
        })
    }

    /// Validate and apply a partial update to an existing journal entry.
    ///
    /// Only supplied fields are validated and written; `updated_at` always
    /// advances, even when no business field was supplied.
    pub async fn update_journal(
        &self,
        cmd: &JournalUpdateCmd,
        now: DateTime<Utc>,
    ) -> ResultEngine<SaveResult> {
        with_tx!(self, |db_tx| {
            journal::Entity::find_by_id(cmd.id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| {
                    EngineError::NotFound(format!("journal entry {} not exists", cmd.id))
                })?;

            let codes = cmd.account_codes();
            let existing = existing_account_codes(&db_tx, &codes).await?;
            let violations = validation::validate_update(cmd, &existing);
            if !violations.is_empty() {
                tracing::debug!(
                    id = cmd.id,
                    violations = violations.len(),
                    "journal update rejected"
                );
                Ok(SaveResult::Rejected(violations))
            } else {
                let mut active = journal::ActiveModel {
                    id: ActiveValue::Set(cmd.id),
                    updated_at: ActiveValue::Set(now),
                    ..Default::default()
                };
                if let Some(nendo) = &cmd.nendo {
                    active.nendo = ActiveValue::Set(nendo.clone());
                }
                if let Some(date) = &cmd.date {
                    active.date = ActiveValue::Set(date.clone());
                }
                if let Some(code) = &cmd.debit_code {
                    active.debit_code = ActiveValue::Set(code.clone());
                }
                if let Some(amount) = cmd.debit_amount {
                    active.debit_amount = ActiveValue::Set(amount);
                }
                if let Some(code) = &cmd.credit_code {
                    active.credit_code = ActiveValue::Set(code.clone());
                }
                if let Some(amount) = cmd.credit_amount {
                    active.credit_amount = ActiveValue::Set(amount);
                }
                if let Some(note) = &cmd.note {
                    active.note = ActiveValue::Set(normalize_optional_text(Some(note.as_str())));
                }
                if let Some(checked) = cmd.checked {
                    active.checked = ActiveValue::Set(checked);
                }
                if let Some(deleted) = cmd.deleted {
                    active.deleted = ActiveValue::Set(deleted);
                }
                let model = active.update(&db_tx).await?;

                tracing::info!(id = model.id, "journal entry updated");
                Ok(SaveResult::Saved(model.id))
            }
        })
    }

    /// Fetch a single journal entry by id.
    pub async fn journal_entry(&self, id: i64) -> ResultEngine<JournalEntry> {
        journal::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(JournalEntry::from)
            .ok_or_else(|| EngineError::NotFound(format!("journal entry {id} not exists")))
    }

    /// List journal entries matching a filter, newest first, paginated.
    ///
    /// Pages are 1-based; zero page parameters are rejected.
    pub async fn list_journal(
        &self,
        filter: &JournalFilter,
        page_no: u64,
        page_size: u64,
    ) -> ResultEngine<Vec<JournalEntry>> {
        validate_filter(filter)?;
        if page_no == 0 || page_size == 0 {
            return Err(EngineError::InvalidArgument(
                "page_no and page_size must be > 0".to_string(),
            ));
        }

        let models = journal::Entity::find()
            .apply_journal_filters(filter)
            .order_by_desc(journal::Column::Date)
            .order_by_desc(journal::Column::Id)
            .offset((page_no - 1) * page_size)
            .limit(page_size)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(JournalEntry::from).collect())
    }

    /// Count journal entries matching a filter.
    pub async fn count_journal(&self, filter: &JournalFilter) -> ResultEngine<u64> {
        validate_filter(filter)?;
        let count = journal::Entity::find()
            .apply_journal_filters(filter)
            .count(&self.database)
            .await?;
        Ok(count)
    }
}
