use serde::Serialize;
use utoipa::ToSchema;

use crate::config::TrackingIntegration;
use crate::domain::order::{Address, OrderNoteRecord, OrderRecord};

use super::tracking::{self, TrackingSource};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BillingAddressView {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub address_1: String,
    pub address_2: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub country: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShippingAddressView {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub address_1: String,
    pub address_2: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LineItemView {
    pub id: i64,
    pub quantity: i32,
    pub name: String,
}

/// One shipment-tracking entry. Which fields are present depends on the
/// metadata tier that produced it, so everything except its origin is
/// optional and absent fields stay out of the JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct TrackingView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_ship_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_destination_country: Option<String>,
}

/// Extension block appended to every order view, nested to stay wire
/// compatible with consumers of the previous incarnation of this API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AftershipExtension {
    pub woocommerce: WoocommerceTrackings,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WoocommerceTrackings {
    pub trackings: Vec<TrackingView>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderView {
    pub id: i64,
    pub order_number: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub billing_address: BillingAddressView,
    pub shipping_address: ShippingAddressView,
    pub note: String,
    pub line_items: Vec<LineItemView>,
    pub aftership: AftershipExtension,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderNoteView {
    pub id: i64,
    pub created_at: String,
    pub note: String,
    pub customer_note: bool,
}

/// Assemble the public view of an order.
pub fn order_view(record: &OrderRecord, integration: TrackingIntegration) -> OrderView {
    let trackings = tracking::project_trackings(&TrackingSource {
        meta: &record.meta,
        aftership_active: integration == TrackingIntegration::Aftership,
    });

    OrderView {
        id: record.id,
        order_number: record.order_number.clone(),
        status: record.status.to_string(),
        created_at: record.created_at.to_rfc3339(),
        updated_at: record.updated_at.to_rfc3339(),
        billing_address: billing_view(&record.billing),
        shipping_address: shipping_view(&record.shipping),
        note: record.customer_note.clone(),
        line_items: record
            .lines
            .iter()
            .map(|l| LineItemView {
                id: l.id,
                quantity: l.quantity,
                name: l.name.clone(),
            })
            .collect(),
        aftership: AftershipExtension {
            woocommerce: WoocommerceTrackings { trackings },
        },
    }
}

pub fn note_view(note: &OrderNoteRecord) -> OrderNoteView {
    OrderNoteView {
        id: note.id,
        created_at: note.created_at.to_rfc3339(),
        note: note.content.clone(),
        customer_note: note.is_customer_note,
    }
}

fn billing_view(address: &Address) -> BillingAddressView {
    BillingAddressView {
        first_name: address.first_name.clone(),
        last_name: address.last_name.clone(),
        company: address.company.clone(),
        address_1: address.address_1.clone(),
        address_2: address.address_2.clone(),
        city: address.city.clone(),
        state: address.state.clone(),
        postcode: address.postcode.clone(),
        country: address.country.clone(),
        email: address.email.clone().unwrap_or_default(),
        phone: address.phone.clone().unwrap_or_default(),
    }
}

fn shipping_view(address: &Address) -> ShippingAddressView {
    ShippingAddressView {
        first_name: address.first_name.clone(),
        last_name: address.last_name.clone(),
        company: address.company.clone(),
        address_1: address.address_1.clone(),
        address_2: address.address_2.clone(),
        city: address.city.clone(),
        state: address.state.clone(),
        postcode: address.postcode.clone(),
        country: address.country.clone(),
    }
}
