//! Tests for capability detection and capping.

use crate::capabilities::{capabilities, HardwareCapabilities, SimdTier};

#[test]
fn test_detection_is_cached() {
    let first = capabilities();
    let second = capabilities();
    assert_eq!(first, second);
}

#[test]
fn test_cached_never_exceeds_detected() {
    let detected = HardwareCapabilities::detect();
    let cached = capabilities();
    assert!(cached.tier() <= detected.tier());
    assert!(!cached.has_256() || detected.has_256());
    assert!(!cached.has_128() || detected.has_128());
}

#[test]
fn test_scalar_has_nothing() {
    let caps = HardwareCapabilities::scalar();
    assert!(!caps.has_128());
    assert!(!caps.has_256());
    assert_eq!(caps.tier(), SimdTier::Scalar);
}

#[test]
fn test_capping_only_removes() {
    let detected = HardwareCapabilities::detect();

    let capped = detected.capped(SimdTier::Simd128);
    assert!(!capped.has_256());
    assert!(!capped.avx2());
    assert_eq!(capped.has_128(), detected.has_128());

    assert_eq!(detected.capped(SimdTier::Scalar), HardwareCapabilities::scalar());
    assert_eq!(detected.capped(SimdTier::Simd256), detected);
}

#[test]
fn test_tier_ordering() {
    assert!(SimdTier::Scalar < SimdTier::Simd128);
    assert!(SimdTier::Simd128 < SimdTier::Simd256);
}

#[cfg(target_arch = "x86_64")]
#[test]
fn test_x86_64_baseline_has_sse2() {
    let caps = HardwareCapabilities::detect();
    assert!(caps.sse2());
    assert!(caps.has_128());
    assert!(!caps.neon());
}

#[cfg(target_arch = "aarch64")]
#[test]
fn test_aarch64_has_neon_but_no_256() {
    let caps = HardwareCapabilities::detect();
    assert!(caps.neon());
    assert!(!caps.has_256());
}
