use futures::future::BoxFuture;

use crate::stripe::structs::stripe_event::StripeEvent;

use super::{errors::HandlersApiError, required, StripeEventHandler};

pub struct CancelSubscriptionHandler;

impl StripeEventHandler for CancelSubscriptionHandler {
    fn handle<'a>(&'a self, event: &'a StripeEvent) -> BoxFuture<'a, Result<(), HandlersApiError>> {
        Box::pin(async move {
            let subscription_id = required(event, "id")?;
            let status = event.object_str("status").unwrap_or("canceled");

            if status != "canceled" {
                return Err(HandlersApiError::HandlerFailed(format!(
                    "Subscription {} was deleted with status {}.",
                    subscription_id, status
                )));
            }

            tracing::info!(
                event_id = %event.id,
                subscription_id,
                customer = event.object_str("customer").unwrap_or_default(),
                "cancelling subscription"
            );

            Ok(())
        })
    }
}
