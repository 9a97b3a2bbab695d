// Environment-backed configuration, read once at startup. The token is not
// validated here; a missing or bad token surfaces as an authentication
// failure from the completion call.

use std::env;

lazy_static::lazy_static! {
    pub static ref HF_TOKEN: String = env::var("HF_TOKEN").unwrap_or_default();
    pub static ref HF_ROUTER_URL: String = env::var("HF_ROUTER_URL")
        .unwrap_or_else(|_| "https://router.huggingface.co/v1".to_string());
    pub static ref ITINERARY_MODEL: String = env::var("ITINERARY_MODEL")
        .unwrap_or_else(|_| "openai/gpt-oss-20b:fireworks-ai".to_string());
}
