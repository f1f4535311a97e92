pub mod settings;

pub use settings::Config;

use crate::error::RouterError;
use std::sync::Arc;

/// Loads `.env` (if present), reads the environment and validates the result.
/// Runs before logging is set up, so it does not log.
pub fn load_config() -> Result<Arc<Config>, RouterError> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config.validate()?;

    Ok(Arc::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    // The only test in the library that touches the process environment.
    #[test]
    fn load_config_validates_environment() {
        std::env::set_var("QUOTE_TIMEOUT_MS", "0");
        let rejected = load_config();
        std::env::remove_var("QUOTE_TIMEOUT_MS");

        assert!(matches!(rejected, Err(RouterError::Config(_))));
    }
}
