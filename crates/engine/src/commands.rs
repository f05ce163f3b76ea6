//! Command structs for journal write operations.
//!
//! These types group parameters for create/update requests, keeping call
//! sites readable and avoiding long argument lists. They double as the
//! wire shapes submitted by UI callers, hence the camelCase renames.

use serde::{Deserialize, Serialize};

/// Create a two-sided journal entry (the regular journal form).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalSaveCmd {
    pub nendo: String,
    pub date: String,
    pub debit_code: String,
    pub debit_amount: i64,
    pub credit_code: String,
    pub credit_amount: i64,
    pub note: Option<String>,
}

impl JournalSaveCmd {
    #[must_use]
    pub fn new(
        nendo: impl Into<String>,
        date: impl Into<String>,
        debit_code: impl Into<String>,
        debit_amount: i64,
        credit_code: impl Into<String>,
        credit_amount: i64,
    ) -> Self {
        Self {
            nendo: nendo.into(),
            date: date.into(),
            debit_code: debit_code.into(),
            debit_amount,
            credit_code: credit_code.into(),
            credit_amount,
            note: None,
        }
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Create an entry from the ledger view of one account: a single posting
/// against a home account with an implicit counter-account.
///
/// Exactly one of `debit_amount`/`credit_amount` must be present; the
/// stored row places the home account on the side of the supplied amount.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSaveCmd {
    pub nendo: String,
    pub date: String,
    /// The home account whose ledger the posting was entered from.
    pub ledger_code: String,
    /// The counter-account on the other side of the posting.
    pub counter_code: String,
    pub debit_amount: Option<i64>,
    pub credit_amount: Option<i64>,
    pub note: Option<String>,
}

impl LedgerSaveCmd {
    #[must_use]
    pub fn new(
        nendo: impl Into<String>,
        date: impl Into<String>,
        ledger_code: impl Into<String>,
        counter_code: impl Into<String>,
    ) -> Self {
        Self {
            nendo: nendo.into(),
            date: date.into(),
            ledger_code: ledger_code.into(),
            counter_code: counter_code.into(),
            debit_amount: None,
            credit_amount: None,
            note: None,
        }
    }

    #[must_use]
    pub fn debit_amount(mut self, amount: i64) -> Self {
        self.debit_amount = Some(amount);
        self
    }

    #[must_use]
    pub fn credit_amount(mut self, amount: i64) -> Self {
        self.credit_amount = Some(amount);
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// The two request shapes accepted by journal creation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreateJournalCmd {
    Entry(JournalSaveCmd),
    SinglePosting(LedgerSaveCmd),
}

/// A validated request normalized to the stored two-sided row shape.
pub(crate) struct NormalizedEntry {
    pub nendo: String,
    pub date: String,
    pub debit_code: String,
    pub debit_amount: i64,
    pub credit_code: String,
    pub credit_amount: i64,
    pub note: Option<String>,
}

impl CreateJournalCmd {
    /// Account codes this request references, in rule-evaluation order.
    pub(crate) fn account_codes(&self) -> Vec<&str> {
        match self {
            Self::Entry(cmd) => vec![cmd.debit_code.as_str(), cmd.credit_code.as_str()],
            Self::SinglePosting(cmd) => {
                vec![cmd.ledger_code.as_str(), cmd.counter_code.as_str()]
            }
        }
    }

    /// Two-sided row for a request that passed validation. `None` when the
    /// single-posting amount selection is unusable (validation reports it).
    pub(crate) fn normalized(&self) -> Option<NormalizedEntry> {
        match self {
            Self::Entry(cmd) => Some(NormalizedEntry {
                nendo: cmd.nendo.clone(),
                date: cmd.date.clone(),
                debit_code: cmd.debit_code.clone(),
                debit_amount: cmd.debit_amount,
                credit_code: cmd.credit_code.clone(),
                credit_amount: cmd.credit_amount,
                note: cmd.note.clone(),
            }),
            Self::SinglePosting(cmd) => {
                let (debit_code, credit_code, amount) =
                    match (cmd.debit_amount, cmd.credit_amount) {
                        (Some(amount), None) => {
                            (cmd.ledger_code.clone(), cmd.counter_code.clone(), amount)
                        }
                        (None, Some(amount)) => {
                            (cmd.counter_code.clone(), cmd.ledger_code.clone(), amount)
                        }
                        _ => return None,
                    };
                Some(NormalizedEntry {
                    nendo: cmd.nendo.clone(),
                    date: cmd.date.clone(),
                    debit_code,
                    debit_amount: amount,
                    credit_code,
                    credit_amount: amount,
                    note: cmd.note.clone(),
                })
            }
        }
    }
}

/// Partially update an existing journal entry.
///
/// Only supplied fields change; `updated_at` always advances, even for a
/// request carrying nothing but the id.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalUpdateCmd {
    pub id: i64,
    pub nendo: Option<String>,
    pub date: Option<String>,
    pub debit_code: Option<String>,
    pub debit_amount: Option<i64>,
    pub credit_code: Option<String>,
    pub credit_amount: Option<i64>,
    pub note: Option<String>,
    pub checked: Option<bool>,
    pub deleted: Option<bool>,
}

impl JournalUpdateCmd {
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self {
            id,
            nendo: None,
            date: None,
            debit_code: None,
            debit_amount: None,
            credit_code: None,
            credit_amount: None,
            note: None,
            checked: None,
            deleted: None,
        }
    }

    #[must_use]
    pub fn nendo(mut self, nendo: impl Into<String>) -> Self {
        self.nendo = Some(nendo.into());
        self
    }

    #[must_use]
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    #[must_use]
    pub fn debit_code(mut self, code: impl Into<String>) -> Self {
        self.debit_code = Some(code.into());
        self
    }

    #[must_use]
    pub fn debit_amount(mut self, amount: i64) -> Self {
        self.debit_amount = Some(amount);
        self
    }

    #[must_use]
    pub fn credit_code(mut self, code: impl Into<String>) -> Self {
        self.credit_code = Some(code.into());
        self
    }

    #[must_use]
    pub fn credit_amount(mut self, amount: i64) -> Self {
        self.credit_amount = Some(amount);
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    #[must_use]
    pub fn deleted(mut self, deleted: bool) -> Self {
        self.deleted = Some(deleted);
        self
    }

    /// Account codes this request supplies, in rule-evaluation order.
    pub(crate) fn account_codes(&self) -> Vec<&str> {
        let mut codes = Vec::with_capacity(2);
        if let Some(code) = &self.debit_code {
            codes.push(code.as_str());
        }
        if let Some(code) = &self.credit_code {
            codes.push(code.as_str());
        }
        codes
    }
}
