pub mod stripe_event;
