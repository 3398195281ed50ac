//! Process-wide tunables, read once from the environment.

use std::path::PathBuf;
use std::sync::OnceLock;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_u8(name: &str, default: u8) -> u8 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .unwrap_or(default)
}

/// Luminance cutoff used for `Threshold::Default` when `VCS_THRESHOLD` is unset
pub const DEFAULT_THRESHOLD: u8 = 128;

static THRESHOLD: OnceLock<u8> = OnceLock::new();

/// Default binarization cutoff (`VCS_THRESHOLD`, clamped to 1..=255)
pub fn default_threshold() -> u8 {
    *THRESHOLD.get_or_init(|| parse_env_u8("VCS_THRESHOLD", DEFAULT_THRESHOLD).max(1))
}

static PARALLEL_MIN_PIXELS: OnceLock<usize> = OnceLock::new();

/// Secret images with at least this many pixels are processed row-parallel
pub fn parallel_min_pixels() -> usize {
    *PARALLEL_MIN_PIXELS.get_or_init(|| parse_env_usize("VCS_PARALLEL_MIN_PIXELS", 256 * 256))
}

static STORE_ROOT: OnceLock<PathBuf> = OnceLock::new();

/// Default share store directory (`VCS_STORE_ROOT`, else `media/shares`)
pub fn store_root() -> PathBuf {
    STORE_ROOT
        .get_or_init(|| {
            std::env::var("VCS_STORE_ROOT")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("media/shares"))
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test owns its variable names, so parallel tests never race
    fn set(name: &str, value: &str) {
        unsafe { std::env::set_var(name, value) };
    }

    #[test]
    fn test_parse_reads_set_values() {
        set("VCS_TEST_PARSE_U8", "42");
        set("VCS_TEST_PARSE_USIZE", " 300 ");
        assert_eq!(parse_env_u8("VCS_TEST_PARSE_U8", 7), 42);
        assert_eq!(parse_env_usize("VCS_TEST_PARSE_USIZE", 9), 300);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        set("VCS_TEST_GARBAGE_U8", "256");
        set("VCS_TEST_GARBAGE_USIZE", "-3");
        set("VCS_TEST_EMPTY_U8", "");
        assert_eq!(parse_env_u8("VCS_TEST_GARBAGE_U8", 7), 7);
        assert_eq!(parse_env_usize("VCS_TEST_GARBAGE_USIZE", 9), 9);
        assert_eq!(parse_env_u8("VCS_TEST_EMPTY_U8", 5), 5);
    }

    #[test]
    fn test_parse_fallbacks() {
        assert_eq!(parse_env_u8("VCS_TEST_SURELY_UNSET_U8", 7), 7);
        assert_eq!(parse_env_usize("VCS_TEST_SURELY_UNSET_USIZE", 9), 9);
    }

    #[test]
    fn test_threshold_is_never_zero() {
        assert!(default_threshold() >= 1);
        assert!(!store_root().as_os_str().is_empty());
    }
}
