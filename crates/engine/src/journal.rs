//! Journal entry primitives.
//!
//! A `JournalEntry` is the atomic unit of the ledger: one balanced
//! debit/credit pair with a transaction date inside its fiscal year.
//! Entries are never physically deleted by the engine; the `deleted` flag
//! hides them from projections and aggregates.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: i64,
    pub nendo: String,
    /// Transaction date as an 8-digit `YYYYMMDD` string.
    pub date: String,
    pub debit_code: String,
    pub debit_amount: i64,
    pub credit_code: String,
    pub credit_amount: i64,
    pub note: Option<String>,
    pub checked: bool,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nendo: String,
    pub date: String,
    pub debit_code: String,
    pub debit_amount: i64,
    pub credit_code: String,
    pub credit_amount: i64,
    pub note: Option<String>,
    pub checked: bool,
    pub deleted: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for JournalEntry {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            nendo: model.nendo,
            date: model.date,
            debit_code: model.debit_code,
            debit_amount: model.debit_amount,
            credit_code: model.credit_code,
            credit_amount: model.credit_amount,
            note: model.note,
            checked: model.checked,
            deleted: model.deleted,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
