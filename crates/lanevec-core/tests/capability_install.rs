//! Installing capped capabilities from configuration.
//!
//! Lives in its own test binary: installation is once per process.

use lanevec_core::{
    capabilities, BinaryOp, Error, HardwareCapabilities, LanevecConfig, SimdTier, SmallVector,
    Strategy,
};

#[test]
fn test_configured_cap_is_installed_once() {
    let config = LanevecConfig::from_toml_str("[simd]\nmax_tier = \"scalar\"\n").expect("config");
    assert_eq!(config.simd.max_tier, SimdTier::Scalar);

    let installed = capabilities::init_from_config(&config).expect("first install");
    assert_eq!(installed, HardwareCapabilities::scalar());
    assert_eq!(capabilities(), installed);

    // Every dimension now runs on the scalar strategy.
    for dim in 1..=4 {
        assert_eq!(
            lanevec_core::small_vector::select_strategy(dim, &capabilities()),
            Ok(Strategy::Scalar)
        );
    }

    // The scalar strategy treats NaN as equal to itself.
    let nan = SmallVector::from([f64::NAN, 1.0, 2.0, 3.0]);
    assert_eq!(nan, nan);
    assert_eq!(
        nan.apply(BinaryOp::Add, &SmallVector::ZERO)
            .expect("sum")
            .dim(),
        4
    );

    assert_eq!(
        capabilities::install_capabilities(HardwareCapabilities::detect()),
        Err(Error::CapabilitiesAlreadyInitialized)
    );
    assert_eq!(
        capabilities::init_from_config(&LanevecConfig::default()),
        Err(Error::CapabilitiesAlreadyInitialized)
    );
    assert_eq!(capabilities(), HardwareCapabilities::scalar());
}
