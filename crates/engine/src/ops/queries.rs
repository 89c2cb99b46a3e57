//! Read-only views over the records. None of these take the write lock.

use chrono::{Datelike, Local, NaiveDate};

use crate::{Engine, EngineError, Money, Record, ResultEngine};

/// Totals shown on the dashboard.
///
/// `month_count` only looks at the current month while `total_amount` covers
/// every record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DashboardSummary {
    pub month_count: usize,
    pub total_amount: Money,
}

impl Engine {
    /// Dashboard totals relative to the local date at call time.
    pub async fn dashboard_summary(&self) -> ResultEngine<DashboardSummary> {
        self.dashboard_summary_at(Local::now().date_naive()).await
    }

    /// Dashboard totals with `today` deciding which month is current.
    ///
    /// Fails with [`EngineError::AmountOverflow`] when the total does not fit
    /// in the cents range.
    pub async fn dashboard_summary_at(&self, today: NaiveDate) -> ResultEngine<DashboardSummary> {
        let records = self.records.read().await;
        let month_count = records
            .iter()
            .filter(|record| {
                record.date.year() == today.year() && record.date.month() == today.month()
            })
            .count();
        let total_amount = records
            .iter()
            .try_fold(Money::ZERO, |acc, record| acc.checked_add(record.amount))
            .ok_or_else(|| {
                EngineError::AmountOverflow("total amount is out of range".to_string())
            })?;

        Ok(DashboardSummary {
            month_count,
            total_amount,
        })
    }

    /// The `n` most recently inserted records, newest first.
    ///
    /// Ordering follows insertion, not the record date.
    pub async fn last_n(&self, n: usize) -> Vec<Record> {
        self.records
            .read()
            .await
            .iter()
            .rev()
            .take(n)
            .cloned()
            .collect()
    }

    /// The first `limit` expenses in insertion order.
    ///
    /// Not ranked by magnitude: a large expense inserted after `limit`
    /// smaller ones is left out.
    pub async fn top_expenses(&self, limit: usize) -> Vec<Record> {
        self.records
            .read()
            .await
            .iter()
            .filter(|record| record.amount.is_negative())
            .take(limit)
            .cloned()
            .collect()
    }

    /// Records whose name or notes contain `term`, ignoring case.
    pub async fn search(&self, term: &str) -> ResultEngine<Vec<Record>> {
        if term.is_empty() {
            return Err(EngineError::InvalidArgument(
                "search term is required".to_string(),
            ));
        }
        let needle = term.to_lowercase();

        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|record| record.matches(&needle))
            .cloned()
            .collect())
    }
}
