use futures::future::BoxFuture;

use crate::stripe::structs::stripe_event::StripeEvent;

use super::{errors::HandlersApiError, required, StripeEventHandler};

/// Fulfils one-time purchases once the checkout session is paid.
pub struct PaymentHandler;

impl StripeEventHandler for PaymentHandler {
    fn handle<'a>(&'a self, event: &'a StripeEvent) -> BoxFuture<'a, Result<(), HandlersApiError>> {
        Box::pin(async move {
            let session_id = required(event, "id")?;
            let payment_status = event.object_str("payment_status").unwrap_or("unknown");

            // Boleto and other delayed methods complete with "unpaid" and settle
            // through checkout.session.async_payment_succeeded.
            if payment_status != "paid" {
                tracing::info!(
                    event_id = %event.id,
                    session_id,
                    payment_status,
                    "checkout completed without payment, skipping fulfillment"
                );
                return Ok(());
            }

            tracing::info!(
                event_id = %event.id,
                session_id,
                customer = event.object_str("customer").unwrap_or_default(),
                customer_email = event.object_str("customer_email").unwrap_or_default(),
                "fulfilling one-time payment"
            );

            Ok(())
        })
    }
}
