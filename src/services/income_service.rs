use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect};
use sea_orm::sea_query::Expr;

use crate::{
    dto::income::DailyIncomeList,
    entity::order_header::{Column as OrderCol, Entity as Orders},
    error::{AppError, AppResult},
    models::{DailyIncome, IncomeReport, IncomeSummary, PaymentStatus},
    money::{format_cents, from_cents},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub const DEFAULT_SUMMARY_WINDOW_DAYS: i64 = 30;
pub const DEFAULT_BREAKDOWN_WINDOW_DAYS: i64 = 60;

/// The report's summary and detail windows differ (30 vs 60 days). Both are
/// fixed and intentionally not unified.
pub const REPORT_SUMMARY_WINDOW_DAYS: i64 = 30;
pub const REPORT_DETAIL_WINDOW_DAYS: i64 = 60;

/// Paid totals over all time and over the trailing `window_days`.
pub async fn summary(state: &AppState, window_days: i64) -> AppResult<ApiResponse<IncomeSummary>> {
    let data = compute_summary(&state.orm, window_days).await?;
    Ok(ApiResponse::success("Income summary", data, Some(Meta::empty())))
}

/// Paid orders in the trailing `window_days`, bucketed per UTC day, newest day first.
pub async fn daily_breakdown(
    state: &AppState,
    window_days: i64,
) -> AppResult<ApiResponse<DailyIncomeList>> {
    let items = compute_daily_breakdown(&state.orm, window_days).await?;
    let meta = Meta::count(items.len());
    Ok(ApiResponse::success(
        "Daily income",
        DailyIncomeList { items },
        Some(meta),
    ))
}

pub async fn report(state: &AppState) -> AppResult<ApiResponse<IncomeReport>> {
    let summary = compute_summary(&state.orm, REPORT_SUMMARY_WINDOW_DAYS).await?;
    let details = compute_daily_breakdown(&state.orm, REPORT_DETAIL_WINDOW_DAYS).await?;

    Ok(ApiResponse::success(
        "Income report",
        IncomeReport {
            total_all_time: summary.total_all_time,
            total_in_window: summary.total_in_window,
            details,
        },
        Some(Meta::empty()),
    ))
}

async fn compute_summary<C: ConnectionTrait>(db: &C, window_days: i64) -> AppResult<IncomeSummary> {
    let since = window_start(window_days)?;
    let all_time = paid_total(db, None).await?;
    let in_window = paid_total(db, Some(since)).await?;

    Ok(IncomeSummary {
        total_all_time: from_cents(all_time),
        total_in_window: from_cents(in_window),
        window_days,
    })
}

async fn compute_daily_breakdown<C: ConnectionTrait>(
    db: &C,
    window_days: i64,
) -> AppResult<Vec<DailyIncome>> {
    let since = window_start(window_days)?;
    let rows: Vec<(DateTime<Utc>, i64)> = Orders::find()
        .select_only()
        .column(OrderCol::OrderDate)
        .column(OrderCol::TotalAmount)
        .filter(OrderCol::PaymentStatus.eq(PaymentStatus::Paid.as_str()))
        .filter(OrderCol::OrderDate.gte(since))
        .into_tuple()
        .all(db)
        .await?;

    Ok(bucket_by_day(rows))
}

/// Sum of Paid order totals in cents, 0 when nothing matches.
async fn paid_total<C: ConnectionTrait>(db: &C, since: Option<DateTime<Utc>>) -> AppResult<i64> {
    let mut query = Orders::find()
        .select_only()
        .column_as(
            Expr::cust("CAST(COALESCE(SUM(total_amount), 0) AS BIGINT)"),
            "total",
        )
        .filter(OrderCol::PaymentStatus.eq(PaymentStatus::Paid.as_str()));
    if let Some(since) = since {
        query = query.filter(OrderCol::OrderDate.gte(since));
    }

    let total: Option<i64> = query.into_tuple().one(db).await?;
    Ok(total.unwrap_or(0))
}

fn window_start(window_days: i64) -> AppResult<DateTime<Utc>> {
    if window_days < 0 {
        return Err(AppError::InvalidInput(format!(
            "Window must not be negative, got {window_days} days"
        )));
    }
    Duration::try_days(window_days)
        .and_then(|window| Utc::now().checked_sub_signed(window))
        .ok_or_else(|| AppError::InvalidInput(format!("Window of {window_days} days is too large")))
}

fn bucket_by_day(rows: impl IntoIterator<Item = (DateTime<Utc>, i64)>) -> Vec<DailyIncome> {
    let mut days: BTreeMap<NaiveDate, (i64, i64)> = BTreeMap::new();
    for (order_date, total_cents) in rows {
        let entry = days.entry(order_date.date_naive()).or_default();
        entry.0 += 1;
        entry.1 += total_cents;
    }

    days.into_iter()
        .rev()
        .map(|(day, (order_count, total_cents))| DailyIncome {
            day: day.format("%Y-%m-%d").to_string(),
            order_count,
            total: format_cents(total_cents),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn buckets_newest_day_first() {
        let at = |d: u32, h: u32| Utc.with_ymd_and_hms(2026, 10, d, h, 0, 0).unwrap();
        let rows = vec![
            (at(17, 9), 1000),
            (at(18, 8), 250),
            (at(17, 23), 500),
            (at(18, 12), 5),
        ];

        let days = bucket_by_day(rows);
        assert_eq!(
            days,
            vec![
                DailyIncome {
                    day: "2026-10-18".into(),
                    order_count: 2,
                    total: "2.55".into(),
                },
                DailyIncome {
                    day: "2026-10-17".into(),
                    order_count: 2,
                    total: "15.00".into(),
                },
            ]
        );
    }

    #[test]
    fn no_rows_no_buckets() {
        assert!(bucket_by_day(Vec::new()).is_empty());
    }

    #[test]
    fn negative_window_is_rejected() {
        assert!(matches!(window_start(-1), Err(AppError::InvalidInput(_))));
        assert!(window_start(0).is_ok());
    }
}
