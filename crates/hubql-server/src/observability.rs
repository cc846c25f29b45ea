//! Tracing setup.
//!
//! The subscriber is installed before configuration is read, so the filter
//! sits behind a reload layer and `logging.level` is applied afterwards.
//! A `RUST_LOG` in the environment wins over the configured level.

use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

/// Level used until the configuration has been loaded.
pub const BOOT_LEVEL: &str = "info";

/// Builds the filter for a configured level.
///
/// Connection-pool chatter from the upstream HTTP stack is capped at `warn`
/// unless the level asks for `trace`.
pub fn filter_for(level: &str) -> EnvFilter {
    let level = level.to_ascii_lowercase();
    if level == "trace" {
        return EnvFilter::new(level);
    }
    EnvFilter::new(format!("{level},hyper_util=warn,h2=warn"))
}

/// Swaps the active filter once configuration is known.
pub struct LogLevel {
    handle: reload::Handle<EnvFilter, Registry>,
    pinned_by_env: bool,
}

impl LogLevel {
    /// Applies `level` unless `RUST_LOG` pinned the filter at startup.
    pub fn set(&self, level: &str) {
        if self.pinned_by_env {
            tracing::debug!(level, "RUST_LOG is set, ignoring logging.level");
            return;
        }
        if let Err(e) = self.handle.reload(filter_for(level)) {
            tracing::warn!(error = %e, level, "failed to apply logging level");
        }
    }
}

/// Installs the global subscriber and returns the level switch.
///
/// A second call leaves the first subscriber in place; its switch still
/// targets a detached filter, so the call is harmless.
pub fn init_tracing() -> LogLevel {
    let from_env = std::env::var_os("RUST_LOG")
        .is_some()
        .then(|| EnvFilter::try_from_default_env().ok())
        .flatten();
    let pinned_by_env = from_env.is_some();

    let (filter, handle) = reload::Layer::new(from_env.unwrap_or_else(|| filter_for(BOOT_LEVEL)));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();

    LogLevel {
        handle,
        pinned_by_env,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_caps_transport_noise() {
        let rendered = filter_for("DEBUG").to_string();
        assert!(rendered.contains("debug"));
        assert!(rendered.contains("hyper_util=warn"));
    }

    #[test]
    fn trace_level_is_unfiltered() {
        assert_eq!(filter_for("trace").to_string(), "trace");
    }

    #[test]
    fn set_reloads_unpinned_filter() {
        let (_layer, handle) = reload::Layer::<EnvFilter, Registry>::new(filter_for(BOOT_LEVEL));
        let level = LogLevel {
            handle: handle.clone(),
            pinned_by_env: false,
        };
        level.set("error");
        let current = handle.with_current(|f| f.to_string()).unwrap();
        assert!(current.contains("error"));
        assert!(!current.contains("info"));
    }

    #[test]
    fn set_is_ignored_when_pinned() {
        let (_layer, handle) = reload::Layer::<EnvFilter, Registry>::new(filter_for(BOOT_LEVEL));
        let level = LogLevel {
            handle: handle.clone(),
            pinned_by_env: true,
        };
        level.set("error");
        let current = handle.with_current(|f| f.to_string()).unwrap();
        assert!(current.contains("info"));
        assert!(!current.contains("error"));
    }
}
