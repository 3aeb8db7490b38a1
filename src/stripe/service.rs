use super::{
    config::StripeConfig,
    enums::stripe_event_type::StripeEventType,
    handlers::{errors::HandlersApiError, StripeHandlers},
    structs::stripe_event::StripeEvent,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// At least one handler ran to completion.
    Processed,
    /// Logged and acknowledged without side effects.
    Ignored,
}

pub async fn handle_event(
    event: &StripeEvent,
    config: &StripeConfig,
    handlers: &StripeHandlers,
) -> Result<WebhookOutcome, HandlersApiError> {
    let kind = event.kind();
    tracing::debug!(event_id = %event.id, event_type = kind.value(), "handling stripe event");

    match kind {
        StripeEventType::CheckoutSessionCompleted => {
            handle_checkout_completed(event, config, handlers).await
        }
        StripeEventType::CheckoutSessionExpired => {
            tracing::info!(event_id = %event.id, "checkout session expired, customer should be notified");
            Ok(WebhookOutcome::Ignored)
        }
        StripeEventType::CheckoutSessionAsyncPaymentSucceeded => {
            tracing::info!(event_id = %event.id, "async payment succeeded, customer should be notified");
            Ok(WebhookOutcome::Ignored)
        }
        StripeEventType::CheckoutSessionAsyncPaymentFailed => {
            tracing::info!(event_id = %event.id, "async payment failed, customer should be notified");
            Ok(WebhookOutcome::Ignored)
        }
        StripeEventType::CustomerSubscriptionCreated => {
            tracing::info!(event_id = %event.id, "subscription created, customer should be notified");
            Ok(WebhookOutcome::Ignored)
        }
        StripeEventType::CustomerSubscriptionUpdated => {
            tracing::info!(event_id = %event.id, "subscription updated, customer should be notified");
            Ok(WebhookOutcome::Ignored)
        }
        StripeEventType::CustomerSubscriptionDeleted => {
            handlers.cancellation.handle(event).await?;
            Ok(WebhookOutcome::Processed)
        }
        StripeEventType::Other(event_type) => {
            tracing::info!(event_id = %event.id, "Unhandled event type: {}", event_type);
            Ok(WebhookOutcome::Ignored)
        }
    }
}

// Both price checks run independently; a session matching both ids fires both handlers.
async fn handle_checkout_completed(
    event: &StripeEvent,
    config: &StripeConfig,
    handlers: &StripeHandlers,
) -> Result<WebhookOutcome, HandlersApiError> {
    let price = event.metadata_price();
    let mut outcome = WebhookOutcome::Ignored;

    if config.is_product_price(price) {
        handlers.payment.handle(event).await?;
        outcome = WebhookOutcome::Processed;
    }

    if config.is_subscription_price(price) {
        handlers.subscription.handle(event).await?;
        outcome = WebhookOutcome::Processed;
    }

    if outcome == WebhookOutcome::Ignored {
        tracing::warn!(
            event_id = %event.id,
            price = price.unwrap_or_default(),
            "checkout session price matches no configured price id"
        );
    }

    Ok(outcome)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use futures::future::BoxFuture;
    use serde_json::json;

    use crate::stripe::handlers::StripeEventHandler;

    use super::*;

    #[derive(Default)]
    pub struct RecordingHandler {
        pub calls: AtomicUsize,
        pub fail: bool,
    }

    impl RecordingHandler {
        pub fn failing() -> Self {
            RecordingHandler {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }

        pub fn count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl StripeEventHandler for RecordingHandler {
        fn handle<'a>(&'a self, event: &'a StripeEvent) -> BoxFuture<'a, Result<(), HandlersApiError>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                if self.fail {
                    return Err(HandlersApiError::HandlerFailed(format!(
                        "downstream unavailable for {}",
                        event.id
                    )));
                }
                Ok(())
            })
        }
    }

    pub struct Recorders {
        pub payment: Arc<RecordingHandler>,
        pub subscription: Arc<RecordingHandler>,
        pub cancellation: Arc<RecordingHandler>,
    }

    impl Recorders {
        pub fn new() -> Self {
            Recorders {
                payment: Arc::new(RecordingHandler::default()),
                subscription: Arc::new(RecordingHandler::default()),
                cancellation: Arc::new(RecordingHandler::default()),
            }
        }

        pub fn handlers(&self) -> StripeHandlers {
            StripeHandlers {
                payment: self.payment.clone(),
                subscription: self.subscription.clone(),
                cancellation: self.cancellation.clone(),
            }
        }

        pub fn counts(&self) -> (usize, usize, usize) {
            (
                self.payment.count(),
                self.subscription.count(),
                self.cancellation.count(),
            )
        }
    }

    pub fn config(secret: Option<&str>) -> StripeConfig {
        StripeConfig {
            webhook_secret: secret.map(str::to_string),
            product_price_id: Some("price_once".to_string()),
            subscription_price_id: Some("price_monthly".to_string()),
            tolerance_secs: 300,
        }
    }

    fn checkout_completed(price: Option<&str>) -> StripeEvent {
        let metadata = match price {
            Some(price) => json!({ "price": price }),
            None => json!({}),
        };

        serde_json::from_value(json!({
            "id": "evt_checkout",
            "type": "checkout.session.completed",
            "data": { "object": { "id": "cs_1", "metadata": metadata } }
        }))
        .unwrap()
    }

    fn event_of_type(event_type: &str) -> StripeEvent {
        serde_json::from_value(json!({
            "id": "evt_1",
            "type": event_type,
            "data": { "object": { "id": "obj_1" } }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn one_time_price_invokes_payment_handler_once() {
        let recorders = Recorders::new();

        let outcome = handle_event(
            &checkout_completed(Some("price_once")),
            &config(None),
            &recorders.handlers(),
        )
        .await
        .unwrap();

        assert_eq!(outcome, WebhookOutcome::Processed);
        assert_eq!(recorders.counts(), (1, 0, 0));
    }

    #[tokio::test]
    async fn subscription_price_invokes_activation_handler_once() {
        let recorders = Recorders::new();

        let outcome = handle_event(
            &checkout_completed(Some("price_monthly")),
            &config(None),
            &recorders.handlers(),
        )
        .await
        .unwrap();

        assert_eq!(outcome, WebhookOutcome::Processed);
        assert_eq!(recorders.counts(), (0, 1, 0));
    }

    #[tokio::test]
    async fn unknown_or_missing_price_invokes_nothing() {
        let recorders = Recorders::new();

        for price in [Some("price_other"), None] {
            let outcome = handle_event(
                &checkout_completed(price),
                &config(None),
                &recorders.handlers(),
            )
            .await
            .unwrap();
            assert_eq!(outcome, WebhookOutcome::Ignored);
        }

        assert_eq!(recorders.counts(), (0, 0, 0));
    }

    #[tokio::test]
    async fn overlapping_price_ids_fire_both_handlers() {
        let recorders = Recorders::new();
        let mut config = config(None);
        config.subscription_price_id = Some("price_once".to_string());

        handle_event(
            &checkout_completed(Some("price_once")),
            &config,
            &recorders.handlers(),
        )
        .await
        .unwrap();

        assert_eq!(recorders.counts(), (1, 1, 0));
    }

    #[tokio::test]
    async fn subscription_deleted_invokes_only_cancellation() {
        let recorders = Recorders::new();

        let outcome = handle_event(
            &event_of_type("customer.subscription.deleted"),
            &config(None),
            &recorders.handlers(),
        )
        .await
        .unwrap();

        assert_eq!(outcome, WebhookOutcome::Processed);
        assert_eq!(recorders.counts(), (0, 0, 1));
    }

    #[tokio::test]
    async fn log_only_and_unknown_types_invoke_nothing() {
        let recorders = Recorders::new();

        for event_type in [
            "checkout.session.expired",
            "checkout.session.async_payment_succeeded",
            "checkout.session.async_payment_failed",
            "customer.subscription.created",
            "customer.subscription.updated",
            "invoice.paid",
        ] {
            let outcome = handle_event(
                &event_of_type(event_type),
                &config(None),
                &recorders.handlers(),
            )
            .await
            .unwrap();
            assert_eq!(outcome, WebhookOutcome::Ignored, "{}", event_type);
        }

        assert_eq!(recorders.counts(), (0, 0, 0));
    }

    #[tokio::test]
    async fn handler_failure_is_returned() {
        let recorders = Recorders {
            payment: Arc::new(RecordingHandler::failing()),
            ..Recorders::new()
        };

        let result = handle_event(
            &checkout_completed(Some("price_once")),
            &config(None),
            &recorders.handlers(),
        )
        .await;

        assert!(matches!(result, Err(HandlersApiError::HandlerFailed(_))));
        assert_eq!(recorders.counts(), (1, 0, 0));
    }
}
