pub mod stripe_event_type;
