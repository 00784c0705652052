//! Balance and usage.

use crate::api::ApiTransport;
use crate::error::SploxResult;
use crate::models::{ActivityStats, DailyActivityResponse, TransactionHistoryResponse, TransactionQuery, UserBalance};

/// Billing operations, borrowed from [`SploxClient::billing`](crate::SploxClient::billing).
#[derive(Debug, Clone, Copy)]
pub struct Billing<'a> {
    api: &'a ApiTransport,
}

impl<'a> Billing<'a> {
    pub(crate) fn new(api: &'a ApiTransport) -> Self {
        Self { api }
    }

    pub async fn get_balance(&self) -> SploxResult<UserBalance> {
        self.api.get("/billing/balance", &[]).await
    }

    /// Filtered, paginated transactions. Unset filters are not sent.
    pub async fn get_transaction_history(
        &self,
        query: &TransactionQuery,
    ) -> SploxResult<TransactionHistoryResponse> {
        self.api
            .get("/billing/transactions", &query.to_pairs())
            .await
    }

    pub async fn get_activity_stats(&self) -> SploxResult<ActivityStats> {
        self.api.get("/activity/stats", &[]).await
    }

    /// Per-day spend over the last `days` days.
    pub async fn get_daily_activity(&self, days: u32) -> SploxResult<DailyActivityResponse> {
        self.api
            .get("/activity/daily", &[("days", days.to_string())])
            .await
    }
}
