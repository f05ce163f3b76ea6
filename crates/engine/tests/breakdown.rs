mod common;

use common::{engine_with_db, post_entry, ts};
use engine::{
    BreakdownRequest, BreakdownSide, EngineError, Granularity, JournalUpdateCmd, TimeUnit,
};

fn request(
    classification: &str,
    granularity: Granularity,
    side: BreakdownSide,
    time_unit: TimeUnit,
) -> BreakdownRequest {
    BreakdownRequest {
        nendo: "2021".to_string(),
        classification_code: classification.to_string(),
        granularity,
        side,
        time_unit,
    }
}

#[tokio::test]
async fn net_equals_credit_sum_when_no_debit_postings() {
    let (engine, _db) = engine_with_db().await;
    post_entry(&engine, "2021", "20210410", "1101", "4101", 50000).await;
    post_entry(&engine, "2021", "20210515", "1102", "4101", 30000).await;

    let response = engine
        .aggregate_breakdown(&[
            request("400", Granularity::Account, BreakdownSide::Net, TimeUnit::Annual),
            request(
                "400",
                Granularity::Account,
                BreakdownSide::Credit,
                TimeUnit::Annual,
            ),
        ])
        .await
        .unwrap();

    assert_eq!(response.annual.len(), 2);
    let net = &response.annual[0];
    let credit = &response.annual[1];
    assert_eq!(net.request.side, BreakdownSide::Net);
    assert_eq!(net.totals.len(), 1);
    assert_eq!(net.totals[0].code, "4101");
    assert_eq!(net.totals[0].value, 80000);
    assert_eq!(net.totals, credit.totals);
}

#[tokio::test]
async fn annual_total_equals_sum_of_monthly_values() {
    let (engine, _db) = engine_with_db().await;
    let amounts = [50000, 60000, 55000, 52000, 58000, 65000, 70000, 75000];
    for (offset, amount) in amounts.iter().enumerate() {
        let month = 4 + offset as u32;
        post_entry(
            &engine,
            "2021",
            &format!("2021{month:02}10"),
            "5101",
            "1101",
            *amount,
        )
        .await;
    }

    let response = engine
        .aggregate_breakdown(&[
            request("500", Granularity::Account, BreakdownSide::Debit, TimeUnit::Month),
            request(
                "500",
                Granularity::Account,
                BreakdownSide::Debit,
                TimeUnit::Annual,
            ),
        ])
        .await
        .unwrap();

    assert_eq!(response.monthly.len(), 1);
    assert_eq!(response.annual.len(), 1);

    let series = &response.monthly[0].series;
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].code, "5101");
    assert_eq!(series[0].name, "仕入");
    assert_eq!(series[0].months.len(), amounts.len());
    let monthly_sum: i64 = series[0].months.iter().map(|point| point.value).sum();

    let totals = &response.annual[0].totals;
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].value, 485000);
    assert_eq!(totals[0].value, monthly_sum);
}

#[tokio::test]
async fn unknown_classification_fails_the_whole_batch() {
    let (engine, _db) = engine_with_db().await;
    post_entry(&engine, "2021", "20210410", "1101", "4101", 50000).await;

    let err = engine
        .aggregate_breakdown(&[
            request("400", Granularity::Account, BreakdownSide::Credit, TimeUnit::Annual),
            request("999", Granularity::Account, BreakdownSide::Credit, TimeUnit::Annual),
        ])
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::ClassificationNotFound("999".to_string()));
}

#[tokio::test]
async fn net_signs_follow_the_classification_orientation() {
    let (engine, _db) = engine_with_db().await;
    // 現金 takes 10000 in and pays 4000 out; 普通預金 only pays out.
    post_entry(&engine, "2021", "20210410", "1101", "4101", 10000).await;
    post_entry(&engine, "2021", "20210412", "5101", "1101", 4000).await;
    post_entry(&engine, "2021", "20210415", "5101", "1102", 2000).await;

    let response = engine
        .aggregate_breakdown(&[request(
            "100",
            Granularity::Account,
            BreakdownSide::Net,
            TimeUnit::Annual,
        )])
        .await
        .unwrap();

    let totals = &response.annual[0].totals;
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].code, "1101");
    assert_eq!(totals[0].value, 6000);
    // Appears even though it only ever shows up on the credit side.
    assert_eq!(totals[1].code, "1102");
    assert_eq!(totals[1].value, -2000);
    assert_eq!(totals[1].name, "普通預金");
}

#[tokio::test]
async fn group_granularity_merges_sibling_accounts() {
    let (engine, _db) = engine_with_db().await;
    post_entry(&engine, "2021", "20210410", "5101", "1101", 3000).await;
    post_entry(&engine, "2021", "20210411", "5102", "1101", 1200).await;

    let response = engine
        .aggregate_breakdown(&[
            request(
                "500",
                Granularity::AccountGroup,
                BreakdownSide::Debit,
                TimeUnit::Annual,
            ),
            request(
                "500",
                Granularity::Classification,
                BreakdownSide::Debit,
                TimeUnit::Annual,
            ),
        ])
        .await
        .unwrap();

    let by_group = &response.annual[0].totals;
    assert_eq!(by_group.len(), 1);
    assert_eq!(by_group[0].code, "510");
    assert_eq!(by_group[0].name, "販売管理費");
    assert_eq!(by_group[0].value, 4200);

    let by_classification = &response.annual[1].totals;
    assert_eq!(by_classification.len(), 1);
    assert_eq!(by_classification[0].code, "500");
    assert_eq!(by_classification[0].name, "費用");
    assert_eq!(by_classification[0].value, 4200);
}

#[tokio::test]
async fn months_without_data_are_omitted() {
    let (engine, _db) = engine_with_db().await;
    post_entry(&engine, "2021", "20210410", "1101", "4101", 50000).await;
    post_entry(&engine, "2021", "20210620", "1101", "4101", 20000).await;

    let response = engine
        .aggregate_breakdown(&[request(
            "400",
            Granularity::Account,
            BreakdownSide::Credit,
            TimeUnit::Month,
        )])
        .await
        .unwrap();

    let series = &response.monthly[0].series;
    assert_eq!(series.len(), 1);
    let months: Vec<(&str, i64)> = series[0]
        .months
        .iter()
        .map(|point| (point.month.as_str(), point.value))
        .collect();
    assert_eq!(months, vec![("202104", 50000), ("202106", 20000)]);
}

#[tokio::test]
async fn custom_reference_fields_ride_along() {
    let (engine, _db) = engine_with_db().await;
    post_entry(&engine, "2021", "20210410", "1101", "4101", 50000).await;

    let response = engine
        .aggregate_breakdown(&[request(
            "400",
            Granularity::Account,
            BreakdownSide::Credit,
            TimeUnit::Annual,
        )])
        .await
        .unwrap();

    let totals = &response.annual[0].totals;
    assert_eq!(totals[0].custom, Some(serde_json::json!({"page": 1})));
}

#[tokio::test]
async fn soft_deleted_entries_do_not_aggregate() {
    let (engine, _db) = engine_with_db().await;
    post_entry(&engine, "2021", "20210410", "1101", "4101", 50000).await;
    let removed = post_entry(&engine, "2021", "20210411", "1101", "4101", 9999).await;
    engine
        .update_journal(&JournalUpdateCmd::new(removed).deleted(true), ts(2021, 4, 12))
        .await
        .unwrap();

    let response = engine
        .aggregate_breakdown(&[request(
            "400",
            Granularity::Account,
            BreakdownSide::Credit,
            TimeUnit::Annual,
        )])
        .await
        .unwrap();

    assert_eq!(response.annual[0].totals[0].value, 50000);
}

#[tokio::test]
async fn other_fiscal_years_stay_out_of_the_rollup() {
    let (engine, _db) = engine_with_db().await;
    post_entry(&engine, "2021", "20210410", "1101", "4101", 50000).await;
    post_entry(&engine, "2022", "20220410", "1101", "4101", 70000).await;

    let response = engine
        .aggregate_breakdown(&[request(
            "400",
            Granularity::Account,
            BreakdownSide::Credit,
            TimeUnit::Annual,
        )])
        .await
        .unwrap();

    assert_eq!(response.annual[0].totals[0].value, 50000);
}
