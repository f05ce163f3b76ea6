//! Accounts ("saimoku"), the finest level of the chart of accounts.
//!
//! Account rows are slowly-changing reference data: the engine never writes
//! them. An account whose `deleted` flag is set is invisible to validation
//! and to the directory lookups, but journal rows that reference it keep
//! aggregating normally.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub code: String,
    pub name: String,
    pub group_code: String,
    pub deleted: bool,
    pub custom: Option<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub name: String,
    pub group_code: String,
    pub deleted: bool,
    pub custom: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account_groups::Entity",
        from = "Column::GroupCode",
        to = "super::account_groups::Column::Code",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    AccountGroups,
}

impl Related<super::account_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountGroups.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Account {
    fn from(model: Model) -> Self {
        Self {
            code: model.code,
            name: model.name,
            group_code: model.group_code,
            deleted: model.deleted,
            custom: model
                .custom
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok()),
        }
    }
}
