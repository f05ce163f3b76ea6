//! Fiscal years ("nendo").
//!
//! A fiscal year is identified by a 4-digit code and always runs from
//! April 1st of that year to March 31st of the next. The date range is
//! derived from the code; only the code and the locked flag are stored.

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalYear {
    pub code: String,
    /// A fixed (closed) year: external collaborators refuse edits to it.
    pub fixed: bool,
}

impl FiscalYear {
    /// Inclusive `[April 1st, March 31st]` range of this fiscal year, or
    /// `None` when the code is not a 4-digit number.
    pub fn range(&self) -> Option<(NaiveDate, NaiveDate)> {
        nendo_range(&self.code)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.range()
            .is_some_and(|(start, end)| start <= date && date <= end)
    }
}

/// Inclusive date range of a fiscal-year code.
pub(crate) fn nendo_range(nendo: &str) -> Option<(NaiveDate, NaiveDate)> {
    if nendo.len() != 4 || !nendo.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = nendo.parse().ok()?;
    let start = NaiveDate::from_ymd_opt(year, 4, 1)?;
    let end = NaiveDate::from_ymd_opt(year + 1, 3, 31)?;
    Some((start, end))
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fiscal_years")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub fixed: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for FiscalYear {
    fn from(model: Model) -> Self {
        Self {
            code: model.code,
            fixed: model.fixed,
        }
    }
}
