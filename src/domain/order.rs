use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::errors::DomainError;

/// Order-level metadata, keyed by meta key. Values keep their stored JSON
/// shape because legacy tracking integrations wrote scalars as well as
/// structured arrays under different keys.
pub type MetaMap = HashMap<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    OnHold,
    Shipped,
    Completed,
    Cancelled,
    Refunded,
    Failed,
    /// Soft-delete parking state. Never part of the default queryable set.
    Trash,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 9] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::OnHold,
        OrderStatus::Shipped,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
        OrderStatus::Refunded,
        OrderStatus::Failed,
        OrderStatus::Trash,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::OnHold => "on-hold",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
            OrderStatus::Failed => "failed",
            OrderStatus::Trash => "trash",
        }
    }

    /// Every status an API consumer may query by default. `trash` is only
    /// reachable by asking for it explicitly.
    pub fn default_queryable() -> Vec<OrderStatus> {
        Self::ALL
            .into_iter()
            .filter(|s| *s != OrderStatus::Trash)
            .collect()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown order status '{}'", s)))
    }
}

/// Postal address attached to an order. Billing addresses carry the optional
/// contact fields; shipping addresses leave them unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub address_1: String,
    pub address_2: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub country: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub id: i64,
    pub name: String,
    pub quantity: i32,
}

/// An order as the store hands it to us: identity, status, both addresses,
/// line items, and the raw metadata map the tracking projection reads.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub id: i64,
    pub order_number: String,
    pub status: OrderStatus,
    pub customer_note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub billing: Address,
    pub shipping: Address,
    pub lines: Vec<LineItem>,
    pub meta: MetaMap,
}

#[derive(Debug, Clone)]
pub struct OrderNoteRecord {
    pub id: i64,
    pub order_id: i64,
    pub content: String,
    pub kind: String,
    pub is_customer_note: bool,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Category of notes this API serves. Anything else (payment gateway chatter,
/// webhook delivery logs) is invisible to the orders endpoints.
pub const ORDER_NOTE_KIND: &str = "order_note";

/// Query criteria for listing and counting orders. An empty status list means
/// "whatever the deployment considers queryable" and is resolved by the
/// service before the filter reaches the repository.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub statuses: Vec<OrderStatus>,
    pub created_at_min: Option<DateTime<Utc>>,
    pub created_at_max: Option<DateTime<Utc>>,
    pub page: i64,
    pub per_page: i64,
}

/// Payload of the edit operation. Only a status transition (with its audit
/// note) is honored; general order mutation is owned by the store.
#[derive(Debug, Clone, Default)]
pub struct StatusUpdate {
    pub status: Option<OrderStatus>,
    pub note: String,
}

/// One page of matching order ids plus the totals pagination is derived from.
#[derive(Debug, Clone)]
pub struct OrderPage {
    pub ids: Vec<i64>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

impl OrderPage {
    pub fn pagination(&self) -> Pagination {
        let total_pages = if self.per_page > 0 {
            (self.total + self.per_page - 1) / self.per_page
        } else {
            0
        };
        Pagination {
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, utoipa::ToSchema)]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_invalid_input() {
        let err = "sideways".parse::<OrderStatus>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn default_queryable_excludes_trash() {
        let statuses = OrderStatus::default_queryable();
        assert_eq!(statuses.len(), OrderStatus::ALL.len() - 1);
        assert!(!statuses.contains(&OrderStatus::Trash));
    }

    #[test]
    fn pagination_rounds_partial_pages_up() {
        let page = OrderPage {
            ids: vec![],
            total: 5,
            page: 1,
            per_page: 3,
        };
        assert_eq!(page.pagination().total_pages, 2);
    }

    #[test]
    fn pagination_of_empty_result_has_zero_pages() {
        let page = OrderPage {
            ids: vec![],
            total: 0,
            page: 1,
            per_page: 20,
        };
        assert_eq!(page.pagination().total_pages, 0);
    }
}
