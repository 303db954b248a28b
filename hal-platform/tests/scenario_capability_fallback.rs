//! Scenario S6 (spec §8): a caller asks for a capability the platform lacks
//! natively, finds a software fallback is declared, and can ask for the
//! platform's tier to decide whether the fallback is worth taking.

use hal_platform::{Capability, CapabilityProvider, PerformanceTier, PlatformDetect, PlatformTag};

#[test]
fn web_lacks_compute_shaders_but_declares_a_fallback() {
    let info = PlatformDetect::static_info(PlatformTag::Web);
    let provider = CapabilityProvider::for_platform(PlatformTag::Web, info);

    assert!(!provider.supports(Capability::ComputeShaders));
    assert!(provider.has_fallback(Capability::ComputeShaders));
}

#[test]
fn dreamcast_lacks_networking_with_no_fallback_and_is_minimal_tier() {
    let info = PlatformDetect::static_info(PlatformTag::Dreamcast);
    let provider = CapabilityProvider::for_platform(PlatformTag::Dreamcast, info);

    assert!(!provider.supports(Capability::Networking));
    assert!(!provider.has_fallback(Capability::Networking));
    assert_eq!(provider.tier(), PerformanceTier::Minimal);
}

#[test]
fn desktop_supports_everything_the_capability_table_knows_about() {
    let info = PlatformDetect::static_info(PlatformTag::Desktop);
    let provider = CapabilityProvider::for_platform(PlatformTag::Desktop, info);

    for cap in Capability::ALL {
        assert!(
            provider.supports(cap) || provider.has_fallback(cap),
            "desktop should either support {cap:?} natively or declare a fallback for it"
        );
    }
}
