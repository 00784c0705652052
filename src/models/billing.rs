use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{deserialize_nullable_vec, JsonObject};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserBalance {
    pub balance_microdollars: i64,
    pub balance_usd: f64,
    pub currency: String,
}

/// A credit, debit or refund on the account balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceTransaction {
    pub id: String,
    pub user_id: String,
    /// Amount in microdollars.
    pub amount: i64,
    pub currency: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub metadata: Option<JsonObject>,
    #[serde(default)]
    pub stripe_payment_intent_id: Option<String>,
    #[serde(default)]
    pub stripe_charge_id: Option<String>,
}

/// Offset pagination used by the transaction history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionPagination {
    pub page: u32,
    pub limit: u32,
    pub total_count: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionHistoryResponse {
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub transactions: Vec<BalanceTransaction>,
    pub pagination: TransactionPagination,
}

/// Filters for `GET /billing/transactions`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Comma-separated transaction types (`credit,debit,refund`).
    pub types: Option<String>,
    /// Comma-separated statuses (`pending,completed,failed`).
    pub statuses: Option<String>,
    /// ISO 8601 lower bound.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub search: Option<String>,
}

impl TransactionQuery {
    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(types) = &self.types {
            pairs.push(("types", types.clone()));
        }
        if let Some(statuses) = &self.statuses {
            pairs.push(("statuses", statuses.clone()));
        }
        if let Some(start) = &self.start_date {
            pairs.push(("start_date", start.clone()));
        }
        if let Some(end) = &self.end_date {
            pairs.push(("end_date", end.clone()));
        }
        if let Some(min) = self.min_amount {
            pairs.push(("min_amount", min.to_string()));
        }
        if let Some(max) = self.max_amount {
            pairs.push(("max_amount", max.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityStats {
    pub balance: f64,
    pub total_requests: u64,
    pub total_spending: f64,
    pub avg_cost_per_request: f64,
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub total_cost: f64,
    pub request_count: u64,
    pub node_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyActivityResponse {
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub data: Vec<DailyActivity>,
    pub days: u32,
}
