//! Validation violations, the stable payload consumed by UI callers.
//!
//! A violation is data, not an error: the validator always returns the
//! complete, ordered, deduplicated list so every problem can be shown at
//! once. Codes and field paths are part of the wire contract and must not
//! change.

use serde::Serialize;

/// Request field paths referenced by violations, in the casing the UI
/// receives them.
pub(crate) const PATH_NENDO: &str = "nendo";
pub(crate) const PATH_DATE: &str = "date";
pub(crate) const PATH_DEBIT_CODE: &str = "debitCode";
pub(crate) const PATH_DEBIT_AMOUNT: &str = "debitAmount";
pub(crate) const PATH_CREDIT_CODE: &str = "creditCode";
pub(crate) const PATH_CREDIT_AMOUNT: &str = "creditAmount";
pub(crate) const PATH_LEDGER_CODE: &str = "ledgerCode";
pub(crate) const PATH_COUNTER_CODE: &str = "counterCode";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationCode {
    SameAccountCodes,
    InvalidAccountCode,
    AmountMismatch,
    InvalidDebitAmount,
    InvalidCreditAmount,
    InvalidDateFormat,
    OutOfFiscalYear,
    InvalidNendoFormat,
    MissingAmount,
    DuplicateAmount,
}

impl ViolationCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SameAccountCodes => "SAME_ACCOUNT_CODES",
            Self::InvalidAccountCode => "INVALID_ACCOUNT_CODE",
            Self::AmountMismatch => "AMOUNT_MISMATCH",
            Self::InvalidDebitAmount => "INVALID_DEBIT_AMOUNT",
            Self::InvalidCreditAmount => "INVALID_CREDIT_AMOUNT",
            Self::InvalidDateFormat => "INVALID_DATE_FORMAT",
            Self::OutOfFiscalYear => "OUT_OF_FISCAL_YEAR",
            Self::InvalidNendoFormat => "INVALID_NENDO_FORMAT",
            Self::MissingAmount => "MISSING_AMOUNT",
            Self::DuplicateAmount => "DUPLICATE_AMOUNT",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub code: ViolationCode,
    pub message: String,
    pub path: &'static str,
}

impl Violation {
    pub(crate) fn new(
        code: ViolationCode,
        path: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path,
        }
    }
}

/// Outcome of a journal create/update call.
///
/// `Rejected` is the normal response for bad input; infrastructure faults
/// surface as [`EngineError`](crate::EngineError) instead.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum SaveResult {
    Saved(i64),
    Rejected(Vec<Violation>),
}
