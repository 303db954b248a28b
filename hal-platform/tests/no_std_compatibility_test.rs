//! `hal-platform` with `--no-default-features` must compile and behave the
//! same way as the `std` build for everything that does not touch the OS.

use hal_platform::{CapabilityProvider, PlatformDetect, PlatformTag};
use pretty_assertions::assert_eq;

#[test]
fn static_info_matches_preset_for_every_platform() {
    for tag in [
        PlatformTag::Dreamcast,
        PlatformTag::Psp,
        PlatformTag::Vita,
        PlatformTag::Web,
        PlatformTag::Desktop,
    ] {
        let info = PlatformDetect::static_info(tag);
        assert_eq!(info.name, tag.name());
        assert_eq!(info.performance_tier, tag.default_tier());
    }
}

#[test]
fn capability_provider_builds_without_probing() {
    let info = PlatformDetect::static_info(PlatformTag::Dreamcast);
    let provider = CapabilityProvider::for_platform(PlatformTag::Dreamcast, info);
    assert_eq!(provider.tier(), hal_platform::PerformanceTier::Minimal);
}
