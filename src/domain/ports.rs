use super::errors::DomainError;
use super::order::{OrderFilter, OrderNoteRecord, OrderPage, OrderRecord, OrderStatus};

/// Narrow view of the order store. Order placement and fulfillment live on
/// the store side; this port only covers what the API reads and the two
/// mutations it is allowed to make (status transition, trash/delete).
pub trait OrderRepository: Send + Sync + 'static {
    fn find_by_id(&self, id: i64) -> Result<Option<OrderRecord>, DomainError>;

    /// Page of matching order ids plus totals. Ids only: per-order permission
    /// filtering happens before the full records are loaded.
    fn query(&self, filter: &OrderFilter) -> Result<OrderPage, DomainError>;

    fn count(&self, filter: &OrderFilter) -> Result<i64, DomainError>;

    /// Apply a status transition and record `note` against it. Must commit
    /// before returning so a follow-up read observes the new status.
    fn update_status(&self, id: i64, status: OrderStatus, note: &str) -> Result<(), DomainError>;

    fn notes(&self, order_id: i64, scope: NoteQueryScope)
        -> Result<Vec<OrderNoteRecord>, DomainError>;

    /// `force` deletes the order outright; otherwise it is moved to trash.
    fn delete(&self, id: i64, force: bool) -> Result<(), DomainError>;
}

/// Whether a note query may see order notes. Generic note listings exclude
/// them; the orders API passes `IncludeOrderNotes` explicitly. A per-call
/// argument rather than process-wide state, so concurrent requests cannot
/// observe each other's toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteQueryScope {
    ExcludeOrderNotes,
    IncludeOrderNotes,
}

/// The identity a request presented, resolved by the access policy.
#[derive(Debug, Clone, Default)]
pub struct Caller {
    pub api_key: Option<String>,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self { api_key: None }
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            api_key: Some(key.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Edit,
    Delete,
}

/// Named permissions beyond per-order actions. Counting is gated separately
/// because totals can be used to probe order states the caller cannot list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ReadPrivateOrders,
}

pub trait AccessPolicy: Send + Sync + 'static {
    fn permits(&self, caller: &Caller, action: Action, order_id: i64) -> bool;
    fn has_capability(&self, caller: &Caller, capability: Capability) -> bool;
}
