//! Account classifications ("kamoku bunrui").
//!
//! A classification is the coarsest rollup level of the chart of accounts
//! (assets, liabilities, revenue, expenses, ...). It carries the
//! [`Orientation`] that decides on which side the balance of its accounts
//! naturally grows, and therefore how net figures are signed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// The side on which an account balance naturally increases.
///
/// Stored as `"L"` (debit) or `"R"` (credit) in the reference table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Debit,
    Credit,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debit => "L",
            Self::Credit => "R",
        }
    }
}

impl TryFrom<&str> for Orientation {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "L" => Ok(Self::Debit),
            "R" => Ok(Self::Credit),
            other => Err(EngineError::InvalidArgument(format!(
                "invalid orientation: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountClassification {
    pub code: String,
    pub name: String,
    pub orientation: Orientation,
    pub custom: Option<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "account_classifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub name: String,
    pub orientation: String,
    pub custom: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::account_groups::Entity")]
    AccountGroups,
}

impl Related<super::account_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountGroups.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for AccountClassification {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            code: model.code,
            name: model.name,
            orientation: Orientation::try_from(model.orientation.as_str())?,
            custom: model
                .custom
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok()),
        })
    }
}
