use serde::{Deserialize, Serialize};

use crate::stripe::enums::stripe_event_type::StripeEventType;

// https://stripe.com/docs/api/events/object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripeEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub livemode: bool,
    pub data: StripeEventData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

impl StripeEvent {
    pub fn kind(&self) -> StripeEventType {
        StripeEventType::from_str(&self.event_type)
    }

    /// `data.object.metadata.price`, set by the app when it created the checkout session.
    pub fn metadata_price(&self) -> Option<&str> {
        self.data.object.get("metadata")?.get("price")?.as_str()
    }

    pub fn object_str(&self, key: &str) -> Option<&str> {
        self.data.object.get(key)?.as_str()
    }
}
