pub use account_groups::AccountGroup;
pub use accounts::Account;
pub use classifications::{AccountClassification, Orientation};
pub use commands::{CreateJournalCmd, JournalSaveCmd, JournalUpdateCmd, LedgerSaveCmd};
pub use error::EngineError;
pub use fiscal_years::FiscalYear;
pub use journal::JournalEntry;
pub use ops::{
    AnnualBreakdown, BreakdownRequest, BreakdownResponse, BreakdownSeries, BreakdownSide,
    BreakdownTotal, Engine, EngineBuilder, Granularity, JournalFilter, LedgerQuery, LedgerRow,
    MonthValue, MonthlyBreakdown, TimeUnit,
};
pub use violations::{SaveResult, Violation, ViolationCode};

mod account_groups;
mod accounts;
mod classifications;
mod commands;
mod error;
mod fiscal_years;
mod journal;
mod ops;
mod validation;
mod violations;

type ResultEngine<T> = Result<T, EngineError>;
