/*!
 * Tests for speaker canonicalization against on-disk registries
 */

use anyhow::Result;
use kazkar::registry::{NameMap, SpeakerRegistry};
use kazkar::script::resolve;

use crate::common;

/// Test that a registered ID resolves to itself with no diagnostic
#[test]
fn test_resolve_withRegisteredId_shouldReturnIdUnchanged() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::seed_registries(temp_dir.path())?;

    let registry = SpeakerRegistry::load(temp_dir.path())?;
    let map = NameMap::load(temp_dir.path())?;

    let resolution = resolve("lina", &registry, &map);
    assert_eq!(resolution.canonical, "lina");
    assert!(resolution.unresolved.is_none());
    Ok(())
}

/// Test that a display name maps through a pattern, case-insensitively
#[test]
fn test_resolve_withMappedName_shouldReturnMappedSpeaker() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::seed_registries(temp_dir.path())?;

    let registry = SpeakerRegistry::load(temp_dir.path())?;
    let map = NameMap::load(temp_dir.path())?;

    let resolution = resolve("Ліна", &registry, &map);
    assert_eq!(resolution.canonical, "lina");
    assert!(resolution.unresolved.is_none());
    Ok(())
}

/// Test that an unknown name falls back and reports the raw name
#[test]
fn test_resolve_withUnknownName_shouldFallBackWithDiagnostic() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::seed_registries(temp_dir.path())?;

    let registry = SpeakerRegistry::load(temp_dir.path())?;
    let map = NameMap::load(temp_dir.path())?;

    let resolution = resolve("ghost", &registry, &map);
    assert_eq!(resolution.canonical, "narrator");
    assert_eq!(resolution.unresolved.as_deref(), Some("ghost"));
    Ok(())
}

/// Test that missing registries degrade to empty defaults and the
/// fallback still applies
#[test]
fn test_resolve_withMissingRegistries_shouldUseFallback() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let registry = SpeakerRegistry::load_or_default(temp_dir.path());
    let map = NameMap::load_or_default(temp_dir.path());

    assert!(registry.items.is_empty());
    let resolution = resolve("Ліна", &registry, &map);
    assert_eq!(resolution.canonical, "narrator");
    assert_eq!(resolution.unresolved.as_deref(), Some("Ліна"));
    Ok(())
}

/// Test that the first matching pattern wins when several match
#[test]
fn test_resolve_withOverlappingPatterns_shouldUseFirstMatch() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::seed_registries(temp_dir.path())?;

    let registry = SpeakerRegistry::load(temp_dir.path())?;
    let mut map = NameMap::load(temp_dir.path())?;
    map.add_pattern("л", "narrator");

    let resolution = resolve("Ліна", &registry, &map);
    assert_eq!(resolution.canonical, "lina");
    Ok(())
}
