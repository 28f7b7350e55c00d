//! Shipment-tracking metadata extraction.
//!
//! Three generations of integrations have written tracking data under
//! different meta keys. They are tried as an ordered priority list and the
//! first tier that yields anything wins, so precedence is testable in
//! isolation instead of being buried in nested conditionals.

use serde_json::Value;

use crate::domain::order::MetaMap;

use super::views::TrackingView;

/// AfterShip integration meta keys (primary tier).
const AFTERSHIP_PROVIDER: &str = "_aftership_tracking_provider";
const AFTERSHIP_NUMBER: &str = "_aftership_tracking_number";
const AFTERSHIP_SHIP_DATE: &str = "_aftership_tracking_shipdate";
const AFTERSHIP_POSTAL: &str = "_aftership_tracking_postal";
const AFTERSHIP_ACCOUNT: &str = "_aftership_tracking_account";
const AFTERSHIP_KEY: &str = "_aftership_tracking_key";
const AFTERSHIP_DESTINATION: &str = "_aftership_tracking_destination_country";

/// Shipment-tracking plugin keys: the original scalar key and the structured
/// key its later versions switched to.
const LEGACY_NUMBER: &str = "_tracking_number";
const LEGACY_ITEMS: &str = "_wc_shipment_tracking_items";

pub struct TrackingSource<'a> {
    pub meta: &'a MetaMap,
    /// Whether the AfterShip integration is the active tracking plugin. The
    /// primary tier is skipped entirely when it is not.
    pub aftership_active: bool,
}

type Extractor = fn(&TrackingSource<'_>) -> Vec<TrackingView>;

/// Tiers in precedence order; first non-empty result wins.
const TIERS: &[Extractor] = &[extract_aftership, extract_legacy_number, extract_legacy_items];

pub fn project_trackings(source: &TrackingSource<'_>) -> Vec<TrackingView> {
    TIERS
        .iter()
        .map(|extract| extract(source))
        .find(|trackings| !trackings.is_empty())
        .unwrap_or_default()
}

fn extract_aftership(source: &TrackingSource<'_>) -> Vec<TrackingView> {
    if !source.aftership_active {
        return Vec::new();
    }
    // The integration is only considered present once it has written a
    // tracking number; stray secondary fields alone do not claim the tier.
    let Some(number) = meta_string(source.meta, AFTERSHIP_NUMBER) else {
        return Vec::new();
    };
    vec![TrackingView {
        tracking_provider: meta_string(source.meta, AFTERSHIP_PROVIDER),
        tracking_number: Some(number),
        tracking_ship_date: meta_string(source.meta, AFTERSHIP_SHIP_DATE),
        tracking_postal_code: meta_string(source.meta, AFTERSHIP_POSTAL),
        tracking_account_number: meta_string(source.meta, AFTERSHIP_ACCOUNT),
        tracking_key: meta_string(source.meta, AFTERSHIP_KEY),
        tracking_destination_country: meta_string(source.meta, AFTERSHIP_DESTINATION),
    }]
}

/// Scalar `_tracking_number`: a bare number with no provider attached.
fn extract_legacy_number(source: &TrackingSource<'_>) -> Vec<TrackingView> {
    match meta_string(source.meta, LEGACY_NUMBER) {
        Some(number) => vec![TrackingView {
            tracking_number: Some(number),
            ..TrackingView::default()
        }],
        None => Vec::new(),
    }
}

/// Structured `_wc_shipment_tracking_items`: an array of entries carrying
/// `tracking_number` and `custom_tracking_provider`. Only the first entry is
/// surfaced, matching what consumers of the old key expect.
fn extract_legacy_items(source: &TrackingSource<'_>) -> Vec<TrackingView> {
    let Some(Value::Array(items)) = source.meta.get(LEGACY_ITEMS) else {
        return Vec::new();
    };
    let Some(first) = items.first() else {
        return Vec::new();
    };
    let number = string_field(first, "tracking_number");
    let provider = string_field(first, "custom_tracking_provider");
    if number.is_none() && provider.is_none() {
        return Vec::new();
    }
    vec![TrackingView {
        tracking_number: number,
        tracking_provider: provider,
        ..TrackingView::default()
    }]
}

/// A meta value as a non-empty string, if it is one.
fn meta_string(meta: &MetaMap, key: &str) -> Option<String> {
    match meta.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn string_field(value: &Value, field: &str) -> Option<String> {
    match value.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn meta(entries: &[(&str, Value)]) -> MetaMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn project(meta: &MetaMap, aftership_active: bool) -> Vec<TrackingView> {
        project_trackings(&TrackingSource {
            meta,
            aftership_active,
        })
    }

    #[test]
    fn no_metadata_yields_no_trackings() {
        assert!(project(&MetaMap::new(), true).is_empty());
    }

    #[test]
    fn legacy_scalar_number_yields_number_only_entry() {
        let meta = meta(&[("_tracking_number", json!("1Z999"))]);
        let trackings = project(&meta, true);
        assert_eq!(trackings.len(), 1);
        assert_eq!(trackings[0].tracking_number.as_deref(), Some("1Z999"));
        assert_eq!(trackings[0].tracking_provider, None);
    }

    #[test]
    fn legacy_items_array_is_adapted_structurally() {
        let meta = meta(&[(
            "_wc_shipment_tracking_items",
            json!([{
                "tracking_number": "ABC123",
                "custom_tracking_provider": "dhl"
            }]),
        )]);
        let trackings = project(&meta, true);
        assert_eq!(trackings.len(), 1);
        assert_eq!(trackings[0].tracking_number.as_deref(), Some("ABC123"));
        assert_eq!(trackings[0].tracking_provider.as_deref(), Some("dhl"));
    }

    #[test]
    fn aftership_tier_wins_over_both_legacy_tiers() {
        let meta = meta(&[
            ("_aftership_tracking_number", json!("AS-1")),
            ("_aftership_tracking_provider", json!("ups")),
            ("_tracking_number", json!("OLD-1")),
            (
                "_wc_shipment_tracking_items",
                json!([{"tracking_number": "OLD-2"}]),
            ),
        ]);
        let trackings = project(&meta, true);
        assert_eq!(trackings.len(), 1);
        assert_eq!(trackings[0].tracking_number.as_deref(), Some("AS-1"));
        assert_eq!(trackings[0].tracking_provider.as_deref(), Some("ups"));
    }

    #[test]
    fn scalar_number_wins_over_items_array() {
        let meta = meta(&[
            ("_tracking_number", json!("OLD-1")),
            (
                "_wc_shipment_tracking_items",
                json!([{"tracking_number": "OLD-2"}]),
            ),
        ]);
        let trackings = project(&meta, true);
        assert_eq!(trackings.len(), 1);
        assert_eq!(trackings[0].tracking_number.as_deref(), Some("OLD-1"));
    }

    #[test]
    fn inactive_integration_falls_through_to_legacy_tiers() {
        let meta = meta(&[
            ("_aftership_tracking_number", json!("AS-1")),
            ("_tracking_number", json!("OLD-1")),
        ]);
        let trackings = project(&meta, false);
        assert_eq!(trackings[0].tracking_number.as_deref(), Some("OLD-1"));
    }

    #[test]
    fn empty_aftership_number_does_not_claim_the_tier() {
        let meta = meta(&[
            ("_aftership_tracking_number", json!("")),
            ("_aftership_tracking_provider", json!("ups")),
            ("_tracking_number", json!("OLD-1")),
        ]);
        let trackings = project(&meta, true);
        assert_eq!(trackings[0].tracking_number.as_deref(), Some("OLD-1"));
        assert_eq!(trackings[0].tracking_provider, None);
    }

    #[test]
    fn aftership_entry_carries_all_present_fields() {
        let meta = meta(&[
            ("_aftership_tracking_number", json!("AS-1")),
            ("_aftership_tracking_provider", json!("fedex")),
            ("_aftership_tracking_shipdate", json!("2024-03-01")),
            ("_aftership_tracking_postal", json!("94107")),
            ("_aftership_tracking_account", json!("acct-9")),
            ("_aftership_tracking_key", json!("key-1")),
            ("_aftership_tracking_destination_country", json!("USA")),
        ]);
        let trackings = project(&meta, true);
        let entry = &trackings[0];
        assert_eq!(entry.tracking_ship_date.as_deref(), Some("2024-03-01"));
        assert_eq!(entry.tracking_postal_code.as_deref(), Some("94107"));
        assert_eq!(entry.tracking_account_number.as_deref(), Some("acct-9"));
        assert_eq!(entry.tracking_key.as_deref(), Some("key-1"));
        assert_eq!(
            entry.tracking_destination_country.as_deref(),
            Some("USA")
        );
    }

    #[test]
    fn empty_items_array_yields_nothing() {
        let meta = meta(&[("_wc_shipment_tracking_items", json!([]))]);
        assert!(project(&meta, true).is_empty());
    }
}
