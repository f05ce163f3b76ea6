//! Account groups ("kamoku"), the middle rollup level between individual
//! accounts and their classification.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountGroup {
    pub code: String,
    pub name: String,
    pub classification_code: String,
    pub custom: Option<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "account_groups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub name: String,
    pub classification_code: String,
    pub custom: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classifications::Entity",
        from = "Column::ClassificationCode",
        to = "super::classifications::Column::Code",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    AccountClassifications,
    #[sea_orm(has_many = "super::accounts::Entity")]
    Accounts,
}

impl Related<super::classifications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountClassifications.def()
    }
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for AccountGroup {
    fn from(model: Model) -> Self {
        Self {
            code: model.code,
            name: model.name,
            classification_code: model.classification_code,
            custom: model
                .custom
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok()),
        }
    }
}
