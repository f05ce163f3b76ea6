//! Multi-dimensional breakdown aggregation for reporting.
//!
//! Each request rolls the journal of one fiscal year up by a granularity
//! (account / account group / classification), an orientation (debit-only,
//! credit-only, net) and a time unit (month / annual). The grouped sums run
//! as raw SQL against the journal joined to the reference tables; the net
//! orientation merges both sides in memory and signs the result by the
//! classification's natural balance side.

use std::collections::BTreeMap;

use sea_orm::{ConnectionTrait, Statement};
use serde::{Deserialize, Serialize};

use crate::{AccountClassification, EngineError, Orientation, ResultEngine};

use super::{Engine, directory::find_classification};

/// Rollup level of a breakdown request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Account,
    AccountGroup,
    Classification,
}

/// Which side(s) of the journal a breakdown sums.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownSide {
    Debit,
    Credit,
    /// Debit and credit sums combined, signed by the classification's
    /// orientation; a side with no postings contributes 0.
    Net,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Month,
    Annual,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownRequest {
    pub nendo: String,
    pub classification_code: String,
    pub granularity: Granularity,
    pub side: BreakdownSide,
    pub time_unit: TimeUnit,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthValue {
    /// `YYYYMM` month key extracted from the transaction date.
    pub month: String,
    pub value: i64,
}

/// Per-code monthly series. Only months with qualifying data appear.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownSeries {
    pub code: String,
    pub name: String,
    pub custom: Option<serde_json::Value>,
    pub months: Vec<MonthValue>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownTotal {
    pub code: String,
    pub name: String,
    pub custom: Option<serde_json::Value>,
    pub value: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBreakdown {
    pub request: BreakdownRequest,
    pub series: Vec<BreakdownSeries>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualBreakdown {
    pub request: BreakdownRequest,
    pub totals: Vec<BreakdownTotal>,
}

/// All monthly results and all annual results, each paired with its
/// originating request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownResponse {
    pub monthly: Vec<MonthlyBreakdown>,
    pub annual: Vec<AnnualBreakdown>,
}

#[derive(Clone, Copy)]
enum Side {
    Debit,
    Credit,
}

impl Side {
    /// Prefix of the journal columns for this side.
    fn prefix(self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }
}

struct SumRow {
    code: String,
    name: String,
    custom: Option<String>,
    month: Option<String>,
    total: i64,
}

#[derive(Default)]
struct GroupAcc {
    debit_meta: Option<(String, Option<String>)>,
    credit_meta: Option<(String, Option<String>)>,
    values: BTreeMap<Option<String>, i64>,
}

impl Engine {
    /// Run a batch of breakdown requests.
    ///
    /// An unknown classification code fails the whole call; partial results
    /// are never returned for a batch containing a bad request.
    pub async fn aggregate_breakdown(
        &self,
        requests: &[BreakdownRequest],
    ) -> ResultEngine<BreakdownResponse> {
        tracing::debug!(requests = requests.len(), "aggregating breakdown");

        let mut classifications = Vec::with_capacity(requests.len());
        for request in requests {
            let model = find_classification(&self.database, &request.classification_code)
                .await?
                .ok_or_else(|| {
                    EngineError::ClassificationNotFound(request.classification_code.clone())
                })?;
            classifications.push(AccountClassification::try_from(model)?);
        }

        let mut response = BreakdownResponse::default();
        for (request, classification) in requests.iter().zip(&classifications) {
            match request.time_unit {
                TimeUnit::Month => {
                    let series = self.monthly_series(request, classification).await?;
                    response.monthly.push(MonthlyBreakdown {
                        request: request.clone(),
                        series,
                    });
                }
                TimeUnit::Annual => {
                    let totals = self.annual_totals(request, classification).await?;
                    response.annual.push(AnnualBreakdown {
                        request: request.clone(),
                        totals,
                    });
                }
            }
        }
        Ok(response)
    }

    async fn monthly_series(
        &self,
        request: &BreakdownRequest,
        classification: &AccountClassification,
    ) -> ResultEngine<Vec<BreakdownSeries>> {
        let groups = self.side_groups(request, classification, true).await?;
        Ok(groups
            .into_iter()
            .map(|(code, acc)| {
                let GroupAcc {
                    debit_meta,
                    credit_meta,
                    values,
                } = acc;
                let (name, custom) = debit_meta.or(credit_meta).unwrap_or_default();
                BreakdownSeries {
                    code,
                    name,
                    custom: parse_custom(custom.as_deref()),
                    months: values
                        .into_iter()
                        .filter_map(|(month, value)| {
                            month.map(|month| MonthValue { month, value })
                        })
                        .collect(),
                }
            })
            .collect())
    }

    async fn annual_totals(
        &self,
        request: &BreakdownRequest,
        classification: &AccountClassification,
    ) -> ResultEngine<Vec<BreakdownTotal>> {
        let groups = self.side_groups(request, classification, false).await?;
        Ok(groups
            .into_iter()
            .map(|(code, acc)| {
                let GroupAcc {
                    debit_meta,
                    credit_meta,
                    values,
                } = acc;
                let (name, custom) = debit_meta.or(credit_meta).unwrap_or_default();
                BreakdownTotal {
                    code,
                    name,
                    custom: parse_custom(custom.as_deref()),
                    value: values.into_values().sum(),
                }
            })
            .collect())
    }

    /// Grouped sums for the side(s) the request asks for, merged by group
    /// code. Net weights the two sides by the classification orientation.
    async fn side_groups(
        &self,
        request: &BreakdownRequest,
        classification: &AccountClassification,
        monthly: bool,
    ) -> ResultEngine<BTreeMap<String, GroupAcc>> {
        let (debit_rows, credit_rows, debit_weight, credit_weight) = match request.side {
            BreakdownSide::Debit => (
                self.grouped_sums(request, Side::Debit, monthly).await?,
                Vec::new(),
                1,
                0,
            ),
            BreakdownSide::Credit => (
                Vec::new(),
                self.grouped_sums(request, Side::Credit, monthly).await?,
                0,
                1,
            ),
            BreakdownSide::Net => {
                let debit_rows = self.grouped_sums(request, Side::Debit, monthly).await?;
                let credit_rows = self.grouped_sums(request, Side::Credit, monthly).await?;
                match classification.orientation {
                    Orientation::Debit => (debit_rows, credit_rows, 1, -1),
                    Orientation::Credit => (debit_rows, credit_rows, -1, 1),
                }
            }
        };

        let mut groups: BTreeMap<String, GroupAcc> = BTreeMap::new();
        for row in debit_rows {
            let acc = groups.entry(row.code).or_default();
            if acc.debit_meta.is_none() {
                acc.debit_meta = Some((row.name, row.custom));
            }
            *acc.values.entry(row.month).or_insert(0) += debit_weight * row.total;
        }
        for row in credit_rows {
            let acc = groups.entry(row.code).or_default();
            if acc.credit_meta.is_none() {
                acc.credit_meta = Some((row.name, row.custom));
            }
            *acc.values.entry(row.month).or_insert(0) += credit_weight * row.total;
        }
        Ok(groups)
    }

    async fn grouped_sums(
        &self,
        request: &BreakdownRequest,
        side: Side,
        monthly: bool,
    ) -> ResultEngine<Vec<SumRow>> {
        let backend = self.database.get_database_backend();
        let stmt = Statement::from_sql_and_values(
            backend,
            sum_sql(request.granularity, side, monthly),
            vec![
                request.nendo.clone().into(),
                false.into(),
                request.classification_code.clone().into(),
            ],
        );

        let rows = self.database.query_all(stmt).await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(SumRow {
                code: row.try_get("", "code")?,
                name: row.try_get("", "name")?,
                custom: row.try_get("", "custom")?,
                month: if monthly {
                    Some(row.try_get("", "month")?)
                } else {
                    None
                },
                total: row.try_get("", "total")?,
            });
        }
        Ok(out)
    }
}

fn parse_custom(raw: Option<&str>) -> Option<serde_json::Value> {
    raw.and_then(|raw| serde_json::from_str(raw).ok())
}

fn sum_sql(granularity: Granularity, side: Side, monthly: bool) -> String {
    let side_prefix = side.prefix();
    let key = match granularity {
        Granularity::Account => "a",
        Granularity::AccountGroup => "g",
        Granularity::Classification => "c",
    };
    let month_select = if monthly {
        ", substr(j.date, 1, 6) AS month"
    } else {
        ""
    };
    let month_group = if monthly { ", month" } else { "" };

    format!(
        "SELECT {key}.code AS code, {key}.name AS name, {key}.custom AS custom{month_select}, \
         SUM(j.{side_prefix}_amount) AS total \
         FROM journal_entries j \
         JOIN accounts a ON a.code = j.{side_prefix}_code \
         JOIN account_groups g ON g.code = a.group_code \
         JOIN account_classifications c ON c.code = g.classification_code \
         WHERE j.nendo = ? AND j.deleted = ? AND c.code = ? \
         GROUP BY {key}.code{month_group} \
         ORDER BY {key}.code{month_group}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_sql_varies_by_granularity_and_side() {
        let sql = sum_sql(Granularity::Account, Side::Debit, true);
        assert!(sql.contains("SUM(j.debit_amount)"));
        assert!(sql.contains("a.code = j.debit_code"));
        assert!(sql.contains("substr(j.date, 1, 6)"));
        assert!(sql.contains("GROUP BY a.code, month"));

        let sql = sum_sql(Granularity::AccountGroup, Side::Credit, false);
        assert!(sql.contains("SUM(j.credit_amount)"));
        assert!(sql.contains("SELECT g.code"));
        assert!(!sql.contains("month"));

        let sql = sum_sql(Granularity::Classification, Side::Credit, true);
        assert!(sql.contains("SELECT c.code"));
    }
}
