pub mod http_client;
pub mod openrouter;
pub mod scrub;
pub mod traits;

pub use http_client::build_http_client;
pub use openrouter::OpenRouterProvider;
pub use scrub::{api_error, sanitize_api_error, scrub_secret_patterns};
pub use traits::Provider;
