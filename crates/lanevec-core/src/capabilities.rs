//! Runtime SIMD capability detection.
//!
//! This module provides:
//! - `SimdTier` for the widest usable float-lane width
//! - `HardwareCapabilities` for the detected instruction extensions
//! - `capabilities()` for cached once-per-process detection
//! - `install_capabilities()` / `init_from_config()` for capping before first use

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::config::LanevecConfig;
use crate::error::{Error, Result};

// =============================================================================
// SIMD tier
// =============================================================================

/// Widest SIMD width usable for double-precision lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimdTier {
    /// No SIMD, every lane is computed separately.
    Scalar,
    /// 128-bit lanes (SSE2 on x86_64, NEON on aarch64).
    Simd128,
    /// 256-bit lanes (AVX on x86_64).
    Simd256,
}

// =============================================================================
// Hardware capabilities
// =============================================================================

/// Instruction extensions usable on the current CPU.
///
/// Values can only be obtained through [`HardwareCapabilities::detect`],
/// [`HardwareCapabilities::scalar`] or by capping one of those, so a value
/// never reports an extension the CPU lacks. Kernels rely on this to call
/// `#[target_feature]` functions soundly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HardwareCapabilities {
    sse: bool,
    sse2: bool,
    avx: bool,
    avx2: bool,
    neon: bool,
}

impl HardwareCapabilities {
    /// Probes the current CPU.
    ///
    /// Prefer [`capabilities`], which runs this once per process.
    #[must_use]
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            Self {
                sse: is_x86_feature_detected!("sse"),
                sse2: is_x86_feature_detected!("sse2"),
                avx: is_x86_feature_detected!("avx"),
                avx2: is_x86_feature_detected!("avx2"),
                neon: false,
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            Self {
                neon: std::arch::is_aarch64_feature_detected!("neon"),
                ..Self::scalar()
            }
        }

        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        {
            Self::scalar()
        }
    }

    /// Capabilities with every extension disabled.
    #[must_use]
    pub const fn scalar() -> Self {
        Self {
            sse: false,
            sse2: false,
            avx: false,
            avx2: false,
            neon: false,
        }
    }

    /// Removes every extension wider than `tier`.
    #[must_use]
    pub fn capped(self, tier: SimdTier) -> Self {
        match tier {
            SimdTier::Simd256 => self,
            SimdTier::Simd128 => Self {
                avx: false,
                avx2: false,
                ..self
            },
            SimdTier::Scalar => Self::scalar(),
        }
    }

    /// Whether a 128-bit double-lane extension is usable.
    #[inline]
    #[must_use]
    pub fn has_128(&self) -> bool {
        self.sse2 || self.neon
    }

    /// Whether a 256-bit double-lane extension is usable.
    #[inline]
    #[must_use]
    pub fn has_256(&self) -> bool {
        self.avx
    }

    /// Widest tier these capabilities support.
    #[must_use]
    pub fn tier(&self) -> SimdTier {
        if self.has_256() {
            SimdTier::Simd256
        } else if self.has_128() {
            SimdTier::Simd128
        } else {
            SimdTier::Scalar
        }
    }

    /// SSE (x86_64).
    #[must_use]
    pub fn sse(&self) -> bool {
        self.sse
    }

    /// SSE2 (x86_64).
    #[must_use]
    pub fn sse2(&self) -> bool {
        self.sse2
    }

    /// AVX (x86_64).
    #[must_use]
    pub fn avx(&self) -> bool {
        self.avx
    }

    /// AVX2 (x86_64).
    #[must_use]
    pub fn avx2(&self) -> bool {
        self.avx2
    }

    /// NEON (aarch64).
    #[must_use]
    pub fn neon(&self) -> bool {
        self.neon
    }
}

// =============================================================================
// Cached process-wide detection
// =============================================================================

/// Capabilities in effect for this process - set once at first use.
static CAPABILITIES: OnceLock<HardwareCapabilities> = OnceLock::new();

fn detect_and_log() -> HardwareCapabilities {
    let caps = HardwareCapabilities::detect();
    tracing::debug!(
        tier = ?caps.tier(),
        sse2 = caps.sse2,
        avx = caps.avx,
        neon = caps.neon,
        "Detected SIMD capabilities"
    );
    caps
}

/// Returns the cached process-wide capabilities.
#[inline]
#[must_use]
pub fn capabilities() -> HardwareCapabilities {
    *CAPABILITIES.get_or_init(detect_and_log)
}

/// Installs `caps` as the process-wide capabilities.
///
/// Must run before the first arithmetic operation or [`capabilities`] call;
/// the report is never re-detected or replaced afterwards.
pub fn install_capabilities(caps: HardwareCapabilities) -> Result<()> {
    CAPABILITIES.set(caps).map_err(|_| {
        tracing::warn!("Ignoring capability install, detection already ran");
        Error::CapabilitiesAlreadyInitialized
    })
}

/// Detects capabilities, caps them to the configured tier and installs them.
pub fn init_from_config(config: &LanevecConfig) -> Result<HardwareCapabilities> {
    let detected = HardwareCapabilities::detect();
    let caps = detected.capped(config.simd.max_tier);
    if caps != detected {
        tracing::info!(
            detected = ?detected.tier(),
            max_tier = ?config.simd.max_tier,
            "Capping SIMD capabilities from configuration"
        );
    }
    install_capabilities(caps)?;
    Ok(caps)
}
