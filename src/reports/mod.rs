//! Reports module for the household ledger
//!
//! Pure derivations over loaded expenses: spending breakdowns, trends,
//! budget progress and installment expansion.

pub mod budget_overview;
pub mod installment;
pub mod spending;
pub mod trend;

pub use budget_overview::{BudgetProgress, BudgetReport};
pub use installment::expand_installments;
pub use spending::{
    category_breakdown, consumption_breakdown, daily_total, dashboard_summary, top_n, total,
    CategorySpending, ConsumptionSpending, DashboardSummary,
};
pub use trend::{daily_totals, month_delta, month_totals, weekly_buckets, MonthDelta, WeekBucket};
