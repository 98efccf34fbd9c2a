mod common;

use common::FakeHost;
use fallthumb_engine::host::{NamedSizeConfig, StaticSizeRegistry};
use fallthumb_engine::{ResolutionError, SizePolicy, SizeStatus};
use fallthumb_types::{ImageRef, ResolvedSize, SizeSpec};
use pretty_assertions::assert_eq;

fn registry() -> StaticSizeRegistry {
    StaticSizeRegistry::new()
        .with_setting("thumbnail", NamedSizeConfig::new(150, 150, true))
        .with_setting("medium", NamedSizeConfig::new(300, 300, false))
        .with_setting("large", NamedSizeConfig::new(0, 0, false))
        .with_custom("hero", NamedSizeConfig::new(1200, 400, true))
        .with_custom("post-thumbnail", NamedSizeConfig::new(640, 360, true))
}

fn resolved(width: u32, height: u32, crop: bool) -> ResolvedSize {
    ResolvedSize::new(width, height, crop).unwrap()
}

// ── resolve ─────────────────────────────────────────────────────

#[test]
fn resolves_media_setting() {
    let sizes = registry();
    let host = FakeHost::new();
    let policy = SizePolicy::new(&sizes, &host);

    assert_eq!(policy.resolve(&SizeSpec::named("medium")).unwrap(), resolved(300, 300, false));
    assert_eq!(policy.resolve(&SizeSpec::base()).unwrap(), resolved(150, 150, true));
}

#[test]
fn resolves_custom_size() {
    let sizes = registry();
    let host = FakeHost::new();
    let policy = SizePolicy::new(&sizes, &host);
    assert_eq!(policy.resolve(&SizeSpec::named("hero")).unwrap(), resolved(1200, 400, true));
}

#[test]
fn custom_size_wins_over_alias() {
    let sizes = registry();
    let host = FakeHost::new();
    let policy = SizePolicy::new(&sizes, &host);
    assert_eq!(
        policy.resolve(&SizeSpec::named("post-thumbnail")).unwrap(),
        resolved(640, 360, true)
    );
}

#[test]
fn aliases_resolve_to_thumbnail() {
    let sizes = StaticSizeRegistry::new().with_setting("thumbnail", NamedSizeConfig::new(96, 96, false));
    let host = FakeHost::new();
    let policy = SizePolicy::new(&sizes, &host);

    assert_eq!(policy.resolve(&SizeSpec::named("thumb")).unwrap(), resolved(96, 96, false));
    assert_eq!(policy.resolve(&SizeSpec::named("post-thumbnail")).unwrap(), resolved(96, 96, false));
}

#[test]
fn unknown_name_falls_back_to_thumbnail() {
    let sizes = registry();
    let host = FakeHost::new();
    let policy = SizePolicy::new(&sizes, &host);
    assert_eq!(policy.resolve(&SizeSpec::named("no-such-size")).unwrap(), resolved(150, 150, true));
}

#[test]
fn zero_width_setting_falls_back_to_thumbnail() {
    let sizes = registry();
    let host = FakeHost::new();
    let policy = SizePolicy::new(&sizes, &host);
    assert_eq!(policy.resolve(&SizeSpec::named("large")).unwrap(), resolved(150, 150, true));
}

#[test]
fn missing_base_size_is_terminal() {
    let sizes = StaticSizeRegistry::new();
    let host = FakeHost::new();
    let policy = SizePolicy::new(&sizes, &host);

    assert_eq!(
        policy.resolve(&SizeSpec::base()),
        Err(ResolutionError::BaseSizeUnconfigured { requested: "thumbnail".into() })
    );
    assert_eq!(
        policy.resolve(&SizeSpec::named("medium")),
        Err(ResolutionError::BaseSizeUnconfigured { requested: "medium".into() })
    );
}

#[test]
fn explicit_size_never_crops() {
    let sizes = StaticSizeRegistry::new();
    let host = FakeHost::new();
    let policy = SizePolicy::new(&sizes, &host);
    assert_eq!(policy.resolve(&SizeSpec::explicit(80, 60)).unwrap(), resolved(80, 60, false));
}

#[test]
fn explicit_zero_size_is_rejected() {
    let sizes = StaticSizeRegistry::new();
    let host = FakeHost::new();
    let policy = SizePolicy::new(&sizes, &host);
    assert_eq!(
        policy.resolve(&SizeSpec::explicit(0, 60)),
        Err(ResolutionError::InvalidDimensions { width: 0, height: 60 })
    );
}

// ── matches / status ────────────────────────────────────────────

#[test]
fn crop_matching_is_exact() {
    let sizes = registry();
    let host = FakeHost::new().image(1, 150, 150).image(2, 150, 200).image(3, 149, 150);
    let policy = SizePolicy::new(&sizes, &host);
    let spec = SizeSpec::base();
    let size = resolved(150, 150, true);

    assert!(policy.matches(ImageRef::new(1), &spec, &size));
    assert!(!policy.matches(ImageRef::new(2), &spec, &size));
    assert!(!policy.matches(ImageRef::new(3), &spec, &size));
}

#[test]
fn non_crop_matching_needs_one_dimension() {
    let sizes = registry();
    let host = FakeHost::new().image(1, 150, 300).image(2, 300, 150).image(3, 149, 149);
    let policy = SizePolicy::new(&sizes, &host);
    let spec = SizeSpec::explicit(150, 150);
    let size = resolved(150, 150, false);

    assert!(policy.matches(ImageRef::new(1), &spec, &size));
    assert!(policy.matches(ImageRef::new(2), &spec, &size));
    assert!(!policy.matches(ImageRef::new(3), &spec, &size));
}

#[test]
fn unrenderable_image_never_matches() {
    let sizes = registry();
    let host = FakeHost::new();
    let policy = SizePolicy::new(&sizes, &host);
    let size = resolved(150, 150, false);
    assert!(!policy.matches(ImageRef::new(404), &SizeSpec::base(), &size));
}

#[test]
fn status_distinguishes_missing_and_too_small() {
    let sizes = registry();
    let host = FakeHost::new().image(1, 150, 150).image(2, 100, 100);
    let policy = SizePolicy::new(&sizes, &host);
    let spec = SizeSpec::base();
    let size = resolved(150, 150, true);

    assert_eq!(policy.status(ImageRef::new(1), &spec, &size), SizeStatus::Fits);
    assert_eq!(policy.status(ImageRef::new(2), &spec, &size), SizeStatus::TooSmall);
    assert_eq!(policy.status(ImageRef::new(3), &spec, &size), SizeStatus::Missing);
}
