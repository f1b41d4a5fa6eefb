//! Logger initialization.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Honors the `RUST_LOG` filter syntax when set and stays at warn level
/// otherwise, so diagnostics don't scribble over the interactive
/// session. Subsequent calls are ignored.
pub fn init() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Warn);
        }

        builder.init();

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
