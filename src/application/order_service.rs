use serde_json::{json, Value};

use crate::config::{Settings, TrackingIntegration};
use crate::domain::errors::DomainError;
use crate::domain::order::{OrderFilter, OrderRecord, OrderStatus, Pagination, StatusUpdate};
use crate::domain::ports::{
    AccessPolicy, Action, Caller, Capability, NoteQueryScope, OrderRepository,
};
use crate::projection::{self, FieldSelection, ResponseHooks};

/// The order resource handler: authorization, store orchestration, and
/// projection for every operation the HTTP surface exposes. Stateless per
/// call; the store below owns all order lifecycle not covered here.
pub struct OrderService<R, P> {
    repo: R,
    policy: P,
    tracking_integration: TrackingIntegration,
    queryable_statuses: Vec<OrderStatus>,
    hooks: ResponseHooks,
}

impl<R: OrderRepository, P: AccessPolicy> OrderService<R, P> {
    pub fn new(
        repo: R,
        policy: P,
        tracking_integration: TrackingIntegration,
        queryable_statuses: Vec<OrderStatus>,
        hooks: ResponseHooks,
    ) -> Self {
        Self {
            repo,
            policy,
            tracking_integration,
            queryable_statuses,
            hooks,
        }
    }

    pub fn from_settings(repo: R, policy: P, settings: &Settings, hooks: ResponseHooks) -> Self {
        Self::new(
            repo,
            policy,
            settings.tracking_integration,
            settings.queryable_statuses.clone(),
            hooks,
        )
    }

    /// List one page of orders the caller may read. Orders the caller cannot
    /// read (or that vanished between the id query and the fetch) are
    /// excluded silently; pagination still reflects the store's totals.
    pub fn list_orders(
        &self,
        caller: &Caller,
        filter: OrderFilter,
        fields: &FieldSelection,
    ) -> Result<(Vec<Value>, Pagination), DomainError> {
        let filter = self.resolve_statuses(filter);
        let page = self.repo.query(&filter)?;
        let pagination = page.pagination();

        let mut orders = Vec::with_capacity(page.ids.len());
        for id in page.ids {
            if !self.policy.permits(caller, Action::Read, id) {
                continue;
            }
            let Some(record) = self.repo.find_by_id(id)? else {
                continue;
            };
            orders.push(self.render_order(&record, fields)?);
        }
        Ok((orders, pagination))
    }

    /// Total match count. Gated on `ReadPrivateOrders` regardless of the
    /// filter: totals can probe states the caller is not allowed to list.
    pub fn count_orders(&self, caller: &Caller, filter: OrderFilter) -> Result<i64, DomainError> {
        if !self
            .policy
            .has_capability(caller, Capability::ReadPrivateOrders)
        {
            return Err(DomainError::Forbidden);
        }
        let filter = self.resolve_statuses(filter);
        self.repo.count(&filter)
    }

    pub fn get_order(
        &self,
        caller: &Caller,
        id: i64,
        fields: &FieldSelection,
    ) -> Result<Value, DomainError> {
        let record = self.load_authorized(caller, id, Action::Read)?;
        self.render_order(&record, fields)
    }

    /// Apply a status transition (the only mutation this API supports) and
    /// return the refreshed view. The transition commits before the re-read,
    /// so the returned view always reflects the new state.
    pub fn edit_order(
        &self,
        caller: &Caller,
        id: i64,
        update: StatusUpdate,
    ) -> Result<Value, DomainError> {
        self.load_authorized(caller, id, Action::Edit)?;

        if let Some(status) = update.status {
            self.repo.update_status(id, status, &update.note)?;
            log::info!("order {} transitioned to {}", id, status);
        }

        self.get_order(caller, id, &FieldSelection::all())
    }

    /// Approved order notes for an order, order notes included explicitly in
    /// the query scope.
    pub fn order_notes(
        &self,
        caller: &Caller,
        id: i64,
        fields: &FieldSelection,
    ) -> Result<Value, DomainError> {
        self.load_authorized(caller, id, Action::Read)?;

        let notes = self.repo.notes(id, NoteQueryScope::IncludeOrderNotes)?;
        let views: Result<Vec<Value>, DomainError> = notes
            .iter()
            .map(|note| {
                let value = to_json(&projection::note_view(note))?;
                Ok(fields.apply(value))
            })
            .collect();
        Ok(self.hooks.apply_order_notes(Value::Array(views?)))
    }

    /// Remove an order: trash it, or delete it outright when `force` is set.
    /// Not reachable over HTTP yet; the route stays unregistered until a
    /// future release.
    pub fn delete_order(
        &self,
        caller: &Caller,
        id: i64,
        force: bool,
    ) -> Result<Value, DomainError> {
        self.load_authorized(caller, id, Action::Delete)?;
        self.repo.delete(id, force)?;
        let message = if force {
            "Permanently deleted order"
        } else {
            "Moved order to trash"
        };
        Ok(json!({ "message": message }))
    }

    /// Liveness probe: no side effects, no authorization.
    pub fn ping(&self) -> &'static str {
        "pong"
    }

    fn load_authorized(
        &self,
        caller: &Caller,
        id: i64,
        action: Action,
    ) -> Result<OrderRecord, DomainError> {
        let record = self.repo.find_by_id(id)?.ok_or(DomainError::NotFound)?;
        if !self.policy.permits(caller, action, id) {
            return Err(DomainError::Forbidden);
        }
        Ok(record)
    }

    /// An unconstrained status filter means "every queryable status" for
    /// this deployment.
    fn resolve_statuses(&self, mut filter: OrderFilter) -> OrderFilter {
        if filter.statuses.is_empty() {
            filter.statuses = self.queryable_statuses.clone();
        }
        filter
    }

    fn render_order(
        &self,
        record: &OrderRecord,
        fields: &FieldSelection,
    ) -> Result<Value, DomainError> {
        let view = projection::order_view(record, self.tracking_integration);
        let value = self.hooks.apply_order(to_json(&view)?);
        Ok(fields.apply(value))
    }
}

fn to_json<T: serde::Serialize>(view: &T) -> Result<Value, DomainError> {
    serde_json::to_value(view).map_err(|e| DomainError::Internal(e.to_string()))
}
