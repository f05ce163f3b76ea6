//! Read-only lookups over the chart-of-accounts reference data.
//!
//! The directory never writes; master rows are maintained outside the
//! engine and consulted here by exact code match.

use std::collections::HashSet;

use sea_orm::{ConnectionTrait, QueryFilter, QueryOrder, prelude::*};

use crate::{
    Account, AccountClassification, EngineError, FiscalYear, ResultEngine, account_groups,
    accounts, classifications, fiscal_years,
};

use super::Engine;

impl Engine {
    /// Resolve an active account by code.
    pub async fn account(&self, code: &str) -> ResultEngine<Account> {
        find_account(&self.database, code)
            .await?
            .map(Account::from)
            .ok_or_else(|| EngineError::NotFound(format!("account '{code}' not exists")))
    }

    /// List active accounts ordered by code.
    pub async fn accounts(&self) -> ResultEngine<Vec<Account>> {
        let models = accounts::Entity::find()
            .filter(accounts::Column::Deleted.eq(false))
            .order_by_asc(accounts::Column::Code)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Account::from).collect())
    }

    /// Resolve the classification an account rolls up into.
    pub async fn classification_of(
        &self,
        account: &Account,
    ) -> ResultEngine<AccountClassification> {
        let group = account_groups::Entity::find_by_id(account.group_code.clone())
            .one(&self.database)
            .await?
            .ok_or_else(|| {
                EngineError::NotFound(format!("account group '{}' not exists", account.group_code))
            })?;
        self.classification(&group.classification_code).await
    }

    /// Resolve a classification by code.
    pub async fn classification(&self, code: &str) -> ResultEngine<AccountClassification> {
        let model = find_classification(&self.database, code)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("classification '{code}' not exists")))?;
        AccountClassification::try_from(model)
    }

    /// Resolve a fiscal year by its 4-digit code.
    pub async fn fiscal_year(&self, code: &str) -> ResultEngine<FiscalYear> {
        let model = fiscal_years::Entity::find_by_id(code.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("fiscal year '{code}' not exists")))?;
        Ok(FiscalYear::from(model))
    }

    /// List fiscal years ordered by code.
    pub async fn fiscal_years(&self) -> ResultEngine<Vec<FiscalYear>> {
        let models = fiscal_years::Entity::find()
            .order_by_asc(fiscal_years::Column::Code)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(FiscalYear::from).collect())
    }
}

pub(super) async fn find_account<C: ConnectionTrait>(
    db: &C,
    code: &str,
) -> ResultEngine<Option<accounts::Model>> {
    let model = accounts::Entity::find_by_id(code.to_string())
        .filter(accounts::Column::Deleted.eq(false))
        .one(db)
        .await?;
    Ok(model)
}

pub(super) async fn find_classification<C: ConnectionTrait>(
    db: &C,
    code: &str,
) -> ResultEngine<Option<classifications::Model>> {
    let model = classifications::Entity::find_by_id(code.to_string())
        .one(db)
        .await?;
    Ok(model)
}

/// Which of `codes` name an active account. One query, used to feed the
/// validator's existence checks.
pub(super) async fn existing_account_codes<C: ConnectionTrait>(
    db: &C,
    codes: &[&str],
) -> ResultEngine<HashSet<String>> {
    if codes.is_empty() {
        return Ok(HashSet::new());
    }
    let models = accounts::Entity::find()
        .filter(accounts::Column::Code.is_in(codes.iter().copied()))
        .filter(accounts::Column::Deleted.eq(false))
        .all(db)
        .await?;
    Ok(models.into_iter().map(|model| model.code).collect())
}
