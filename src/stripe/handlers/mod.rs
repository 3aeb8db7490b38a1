use std::sync::Arc;

use futures::future::BoxFuture;

use super::structs::stripe_event::StripeEvent;

use self::errors::HandlersApiError;

pub mod cancel_subscription;
pub mod errors;
pub mod payment;
pub mod subscription;

/// Side effects for one category of verified event. Implementations own
/// their persistence and must tolerate redelivery of the same event id.
pub trait StripeEventHandler: Send + Sync {
    fn handle<'a>(&'a self, event: &'a StripeEvent) -> BoxFuture<'a, Result<(), HandlersApiError>>;
}

#[derive(Clone)]
pub struct StripeHandlers {
    pub payment: Arc<dyn StripeEventHandler>,
    pub subscription: Arc<dyn StripeEventHandler>,
    pub cancellation: Arc<dyn StripeEventHandler>,
}

impl Default for StripeHandlers {
    fn default() -> Self {
        StripeHandlers {
            payment: Arc::new(payment::PaymentHandler),
            subscription: Arc::new(subscription::SubscriptionHandler),
            cancellation: Arc::new(cancel_subscription::CancelSubscriptionHandler),
        }
    }
}

fn required<'a>(event: &'a StripeEvent, field: &'static str) -> Result<&'a str, HandlersApiError> {
    event
        .object_str(field)
        .ok_or_else(|| HandlersApiError::InvalidEventObject {
            event_id: event.id.to_string(),
            field,
        })
}
