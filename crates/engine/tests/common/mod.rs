use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{CreateJournalCmd, Engine, JournalSaveCmd, SaveResult};
use migration::MigratorTrait;

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    seed_reference_data(&db).await;
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

/// A small chart of accounts: four classifications, one group each (two for
/// expenses' sake), and a handful of accounts, plus two open fiscal years.
async fn seed_reference_data(db: &DatabaseConnection) {
    let backend = db.get_database_backend();

    for (code, name, orientation) in [
        ("100", "資産", "L"),
        ("300", "負債", "R"),
        ("400", "収益", "R"),
        ("500", "費用", "L"),
    ] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO account_classifications (code, name, orientation) VALUES (?, ?, ?)",
            vec![code.into(), name.into(), orientation.into()],
        ))
        .await
        .unwrap();
    }

    for (code, name, classification) in [
        ("110", "流動資産", "100"),
        ("310", "流動負債", "300"),
        ("410", "売上", "400"),
        ("510", "販売管理費", "500"),
    ] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO account_groups (code, name, classification_code) VALUES (?, ?, ?)",
            vec![code.into(), name.into(), classification.into()],
        ))
        .await
        .unwrap();
    }

    for (code, name, group, deleted) in [
        ("1101", "現金", "110", false),
        ("1102", "普通預金", "110", false),
        ("3101", "買掛金", "310", false),
        ("4101", "売上高", "410", false),
        ("5101", "仕入", "510", false),
        ("5102", "旅費交通費", "510", false),
        ("9101", "旧口座", "110", true),
    ] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO accounts (code, name, group_code, deleted) VALUES (?, ?, ?, ?)",
            vec![code.into(), name.into(), group.into(), deleted.into()],
        ))
        .await
        .unwrap();
    }

    db.execute(Statement::from_sql_and_values(
        backend,
        "UPDATE accounts SET custom = ? WHERE code = ?",
        vec![r#"{"page":1}"#.into(), "4101".into()],
    ))
    .await
    .unwrap();

    for (code, fixed) in [("2021", false), ("2022", false), ("2020", true)] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO fiscal_years (code, fixed) VALUES (?, ?)",
            vec![code.into(), fixed.into()],
        ))
        .await
        .unwrap();
    }
}

#[allow(dead_code)]
pub fn ts(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0).unwrap()
}

/// Post a balanced two-sided entry and return its id.
#[allow(dead_code)]
pub async fn post_entry(
    engine: &Engine,
    nendo: &str,
    date: &str,
    debit: &str,
    credit: &str,
    amount: i64,
) -> i64 {
    let cmd = CreateJournalCmd::Entry(JournalSaveCmd::new(
        nendo, date, debit, amount, credit, amount,
    ));
    match engine.create_journal(&cmd, ts(2021, 4, 1)).await.unwrap() {
        SaveResult::Saved(id) => id,
        SaveResult::Rejected(violations) => panic!("unexpected rejection: {violations:?}"),
    }
}
