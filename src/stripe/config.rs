use std::fmt;

use crate::app::envy::Envy;

pub static DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Stripe settings read once at startup and shared read-only between requests.
#[derive(Clone)]
pub struct StripeConfig {
    pub webhook_secret: Option<String>,
    pub product_price_id: Option<String>,
    pub subscription_price_id: Option<String>,
    /// Replay window in seconds. Zero disables the timestamp check.
    pub tolerance_secs: i64,
}

impl StripeConfig {
    pub fn from_envy(envy: &Envy) -> Self {
        StripeConfig {
            webhook_secret: non_empty(&envy.stripe_webhook_secret),
            product_price_id: non_empty(&envy.stripe_product_price_id),
            subscription_price_id: non_empty(&envy.stripe_subscription_price_id),
            tolerance_secs: envy
                .stripe_webhook_tolerance
                .unwrap_or(DEFAULT_TOLERANCE_SECS),
        }
    }

    pub fn is_product_price(&self, price: Option<&str>) -> bool {
        matches_price(&self.product_price_id, price)
    }

    pub fn is_subscription_price(&self, price: Option<&str>) -> bool {
        matches_price(&self.subscription_price_id, price)
    }
}

impl fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeConfig")
            .field(
                "webhook_secret",
                &self.webhook_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("product_price_id", &self.product_price_id)
            .field("subscription_price_id", &self.subscription_price_id)
            .field("tolerance_secs", &self.tolerance_secs)
            .finish()
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// An unset price id never matches, even when the event carries no price.
fn matches_price(configured: &Option<String>, price: Option<&str>) -> bool {
    match (configured, price) {
        (Some(configured), Some(price)) => configured == price,
        _ => false,
    }
}
