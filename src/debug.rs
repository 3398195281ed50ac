use std::sync::OnceLock;

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Diagnostics on stderr are printed only when `VCS_DEBUG` is set.
pub(crate) fn debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| std::env::var("VCS_DEBUG").is_ok())
}
