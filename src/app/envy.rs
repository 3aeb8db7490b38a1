use serde::Deserialize;

static DEFAULT_PORT: u16 = 3000;
static DEFAULT_MAX_BODY_BYTES: usize = 256 * 1024;
static DEFAULT_RATE_LIMIT_PER_SEC: u64 = 100;

#[derive(Clone, Deserialize)]
pub struct Envy {
    pub app_env: Option<String>,
    pub port: Option<u16>,

    pub stripe_webhook_secret: Option<String>,
    pub stripe_product_price_id: Option<String>,
    pub stripe_subscription_price_id: Option<String>,
    pub stripe_webhook_tolerance: Option<i64>,

    pub max_body_bytes: Option<usize>,
    pub rate_limit_per_sec: Option<u64>,
}

impl Envy {
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_BODY_BYTES)
    }

    /// RateLimitLayer panics on zero, so zero falls back to the default.
    pub fn rate_limit_per_sec(&self) -> u64 {
        self.rate_limit_per_sec
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_RATE_LIMIT_PER_SEC)
    }
}
