//! Post-processing extension points for assembled views.
//!
//! External code registers transforms that run, in registration order, on
//! the final JSON shape of an order view or of the notes array before it is
//! returned to the caller. Nothing is registered by default.

use std::sync::Arc;

use serde_json::Value;

pub type ViewTransform = Arc<dyn Fn(Value) -> Value + Send + Sync>;

#[derive(Clone, Default)]
pub struct ResponseHooks {
    order: Vec<ViewTransform>,
    order_notes: Vec<ViewTransform>,
}

impl ResponseHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_order<F>(mut self, transform: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.order.push(Arc::new(transform));
        self
    }

    pub fn on_order_notes<F>(mut self, transform: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.order_notes.push(Arc::new(transform));
        self
    }

    pub fn apply_order(&self, view: Value) -> Value {
        Self::apply(&self.order, view)
    }

    pub fn apply_order_notes(&self, notes: Value) -> Value {
        Self::apply(&self.order_notes, notes)
    }

    fn apply(transforms: &[ViewTransform], value: Value) -> Value {
        transforms.iter().fold(value, |value, t| t(value))
    }
}

impl std::fmt::Debug for ResponseHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseHooks")
            .field("order", &self.order.len())
            .field("order_notes", &self.order_notes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_hooks_leave_the_view_untouched() {
        let hooks = ResponseHooks::new();
        let view = json!({"id": 1});
        assert_eq!(hooks.apply_order(view.clone()), view);
        assert_eq!(hooks.apply_order_notes(json!([])), json!([]));
    }

    #[test]
    fn order_hooks_run_in_registration_order() {
        let hooks = ResponseHooks::new()
            .on_order(|mut v| {
                v["tag"] = json!("first");
                v
            })
            .on_order(|mut v| {
                v["tag"] = json!(format!("{}-second", v["tag"].as_str().unwrap()));
                v
            });
        let out = hooks.apply_order(json!({"id": 1}));
        assert_eq!(out["tag"], "first-second");
        assert_eq!(out["id"], 1);
    }

    #[test]
    fn notes_hooks_do_not_affect_order_views() {
        let hooks = ResponseHooks::new().on_order_notes(|mut v| {
            if let Some(notes) = v.as_array_mut() {
                notes.clear();
            }
            v
        });
        let view = json!({"id": 1});
        assert_eq!(hooks.apply_order(view.clone()), view);
        assert_eq!(hooks.apply_order_notes(json!([{"id": 2}])), json!([]));
    }
}
