//! Process-wide book config.
//!
//! The config is loaded once at startup and never mutated afterwards.
//! `arc-swap` gives lock-free reads from any thread.

use crate::config::BookConfig;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Global config storage.
pub static CONFIG: LazyLock<ArcSwap<BookConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(BookConfig::default()));

/// Current config.
#[inline]
pub fn cfg() -> Arc<BookConfig> {
    CONFIG.load_full()
}

/// Install the loaded config and return a handle to it.
#[inline]
pub fn init_config(config: BookConfig) -> Arc<BookConfig> {
    let arc = Arc::new(config);
    CONFIG.store(Arc::clone(&arc));
    arc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_then_cfg_returns_same_config() {
        let mut config = BookConfig::default();
        config.title = "handle test".to_string();
        let handle = init_config(config);
        assert!(Arc::ptr_eq(&handle, &cfg()));
        assert_eq!(cfg().title, "handle test");
    }
}
