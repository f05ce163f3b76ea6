//! Ledger projection: the chronological view of one account with a
//! running balance.
//!
//! The projection always walks the full filtered set in ascending
//! (date, id) order before any pagination, so every row's balance reflects
//! all prior entries, not just the returned page.

use std::collections::{HashMap, HashSet};

use sea_orm::{QueryFilter, QueryOrder, prelude::*};
use serde::Serialize;

use crate::{EngineError, Orientation, ResultEngine, accounts, journal};

use super::Engine;
use super::journal::{ApplyJournalFilters, JournalFilter, validate_filter};

const DEFAULT_PAGE_SIZE: u64 = 25;

/// Query for one account's ledger view.
#[derive(Clone, Debug)]
pub struct LedgerQuery {
    pub nendo: String,
    pub account_code: String,
    /// `YYYYMM` prefix of the transaction date.
    pub month: Option<String>,
    /// Substring match on the note text.
    pub note: Option<String>,
    /// Exact amount on either side of the entry.
    pub amount: Option<i64>,
    pub checked: Option<bool>,
    /// 1-based page number.
    pub page_no: u64,
    pub page_size: u64,
}

impl LedgerQuery {
    #[must_use]
    pub fn new(nendo: impl Into<String>, account_code: impl Into<String>) -> Self {
        Self {
            nendo: nendo.into(),
            account_code: account_code.into(),
            month: None,
            note: None,
            amount: None,
            checked: None,
            page_no: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    #[must_use]
    pub fn month(mut self, month: impl Into<String>) -> Self {
        self.month = Some(month.into());
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    #[must_use]
    pub fn amount(mut self, amount: i64) -> Self {
        self.amount = Some(amount);
        self
    }

    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    #[must_use]
    pub fn page(mut self, page_no: u64, page_size: u64) -> Self {
        self.page_no = page_no;
        self.page_size = page_size;
        self
    }
}

/// One journal entry seen from the perspective of the home account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRow {
    pub journal_id: i64,
    pub date: String,
    /// The account on the other side of the entry.
    pub counter_code: String,
    pub counter_name: Option<String>,
    /// Contribution of this entry to the home account's balance: positive
    /// when the entry sits on the account's natural-increase side.
    pub signed_amount: i64,
    /// Running balance after applying this entry, cumulative over the
    /// filtered set.
    pub balance: i64,
    pub note: Option<String>,
    pub checked: bool,
}

impl Engine {
    /// Project the ledger of one account: filtered entries, newest first,
    /// each carrying the running balance as of that entry.
    pub async fn project_ledger(&self, query: &LedgerQuery) -> ResultEngine<Vec<LedgerRow>> {
        if query.page_no == 0 || query.page_size == 0 {
            return Err(EngineError::InvalidArgument(
                "page_no and page_size must be > 0".to_string(),
            ));
        }
        if query.account_code.trim().is_empty() {
            return Err(EngineError::NotFound("account code is empty".to_string()));
        }

        let account = self.account(&query.account_code).await?;
        let classification = self.classification_of(&account).await?;

        let filter = JournalFilter {
            nendo: Some(query.nendo.clone()),
            month: query.month.clone(),
            account_code: Some(account.code.clone()),
            note: query.note.clone(),
            amount: query.amount,
            checked: query.checked,
            include_deleted: false,
        };
        validate_filter(&filter)?;
        let models = journal::Entity::find()
            .apply_journal_filters(&filter)
            .order_by_asc(journal::Column::Date)
            .order_by_asc(journal::Column::Id)
            .all(&self.database)
            .await?;

        let counter_names = self.counter_names(&account.code, &models).await?;

        let mut balance = 0i64;
        let mut rows = Vec::with_capacity(models.len());
        for model in models {
            let home_on_debit = model.debit_code == account.code;
            let amount = if home_on_debit {
                model.debit_amount
            } else {
                model.credit_amount
            };
            let signed_amount = match (classification.orientation, home_on_debit) {
                (Orientation::Debit, true) | (Orientation::Credit, false) => amount,
                _ => -amount,
            };
            balance += signed_amount;

            let counter_code = if home_on_debit {
                model.credit_code
            } else {
                model.debit_code
            };
            rows.push(LedgerRow {
                journal_id: model.id,
                date: model.date,
                counter_name: counter_names.get(&counter_code).cloned(),
                counter_code,
                signed_amount,
                balance,
                note: model.note,
                checked: model.checked,
            });
        }
        rows.reverse();

        tracing::debug!(
            account = %account.code,
            rows = rows.len(),
            "ledger projected"
        );

        let start = usize::try_from((query.page_no - 1).saturating_mul(query.page_size))
            .unwrap_or(usize::MAX);
        let size = usize::try_from(query.page_size).unwrap_or(usize::MAX);
        Ok(rows.into_iter().skip(start).take(size).collect())
    }

    /// Display names for every counter-account appearing in the row set.
    /// Includes deleted accounts so historical rows keep their labels.
    async fn counter_names(
        &self,
        home_code: &str,
        models: &[journal::Model],
    ) -> ResultEngine<HashMap<String, String>> {
        let mut codes: HashSet<&str> = HashSet::new();
        for model in models {
            if model.debit_code == home_code {
                codes.insert(model.credit_code.as_str());
            } else {
                codes.insert(model.debit_code.as_str());
            }
        }
        if codes.is_empty() {
            return Ok(HashMap::new());
        }

        let accounts = accounts::Entity::find()
            .filter(accounts::Column::Code.is_in(codes))
            .all(&self.database)
            .await?;
        Ok(accounts
            .into_iter()
            .map(|model| (model.code, model.name))
            .collect())
    }
}
