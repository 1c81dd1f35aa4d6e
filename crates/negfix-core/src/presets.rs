//! Gamma profile registry
//!
//! Built-in profiles are compiled in; additional profiles can be merged from a
//! YAML mapping of `name: { r, g, b }`, such as the output of `negfix-gamma --name`.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{NegfixError, Result};
use crate::models::GammaProfile;

/// Profiles shipped with the library. Values were measured with the
/// calibration tool.
pub const BUILTIN_PROFILES: &[(&str, GammaProfile)] = &[
    ("none", GammaProfile::NONE),
    (
        "ektar100",
        GammaProfile::new(0.5733379896124348, 0.5737822736392102, 0.6624829032379945),
    ),
    (
        "portra800",
        GammaProfile::new(0.5228012326204643, 0.536735995403697, 0.6114420242779521),
    ),
];

/// Validate a profile name before it is added to the registry.
pub fn validate_profile_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(NegfixError::Config("Profile name cannot be empty".to_string()));
    }
    if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(NegfixError::Config(format!(
            "Profile name '{}' cannot contain whitespace",
            name
        )));
    }
    Ok(())
}

/// Immutable lookup table of named gamma profiles.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: BTreeMap<String, GammaProfile>,
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ProfileRegistry {
    /// Registry containing only the built-in profiles.
    pub fn builtin() -> Self {
        let profiles = BUILTIN_PROFILES
            .iter()
            .map(|(name, profile)| (name.to_string(), *profile))
            .collect();
        Self { profiles }
    }

    /// Built-ins plus the profiles in `path`. File entries replace built-ins
    /// of the same name.
    pub fn with_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut registry = Self::builtin();
        for (name, profile) in load_profiles(path)? {
            registry.profiles.insert(name, profile);
        }
        Ok(registry)
    }

    pub fn get(&self, name: &str) -> Option<GammaProfile> {
        self.profiles.get(name).copied()
    }

    /// Look up a profile, failing with the list of known names.
    pub fn resolve(&self, name: &str) -> Result<GammaProfile> {
        self.get(name).ok_or_else(|| {
            NegfixError::Config(format!(
                "Unknown gamma profile '{}'. Options are: {}",
                name,
                self.names().collect::<Vec<_>>().join(", ")
            ))
        })
    }

    /// Profile names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GammaProfile)> {
        self.profiles.iter().map(|(name, profile)| (name.as_str(), profile))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Parse a YAML profile mapping, validating every entry.
pub fn load_profiles_from_str(contents: &str) -> Result<BTreeMap<String, GammaProfile>> {
    let profiles: BTreeMap<String, GammaProfile> = serde_yaml::from_str(contents)
        .map_err(|e| NegfixError::Config(format!("Failed to parse profile YAML: {}", e)))?;

    for (name, profile) in &profiles {
        validate_profile_name(name)?;
        profile
            .validate()
            .map_err(|e| NegfixError::Config(format!("Profile '{}': {}", name, e)))?;
    }

    Ok(profiles)
}

/// Load a YAML profile mapping from a file.
pub fn load_profiles<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, GammaProfile>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .map_err(|e| NegfixError::io("Failed to read profile file", path, e))?;
    load_profiles_from_str(&contents)
}

/// Render a single profile as a YAML mapping entry, loadable by `load_profiles`.
pub fn profile_to_yaml(name: &str, profile: &GammaProfile) -> Result<String> {
    validate_profile_name(name)?;
    let mut entry = BTreeMap::new();
    entry.insert(name, profile);
    serde_yaml::to_string(&entry)
        .map_err(|e| NegfixError::Config(format!("Failed to serialize profile: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_profiles_present() {
        let registry = ProfileRegistry::builtin();
        assert_eq!(registry.get("none"), Some(GammaProfile::NONE));
        assert_eq!(
            registry.get("ektar100").map(|p| p.r),
            Some(0.5733379896124348)
        );
        assert_eq!(
            registry.get("portra800").map(|p| p.b),
            Some(0.6114420242779521)
        );
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["ektar100", "none", "portra800"]
        );
    }

    #[test]
    fn test_builtin_profiles_are_valid() {
        for (name, profile) in BUILTIN_PROFILES {
            assert!(profile.validate().is_ok(), "{} should be valid", name);
        }
    }

    #[test]
    fn test_resolve_unknown_lists_options() {
        let err = ProfileRegistry::builtin().resolve("velvia50").unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, NegfixError::Config(_)));
        assert!(msg.contains("velvia50"));
        assert!(msg.contains("ektar100, none, portra800"));
    }

    #[test]
    fn test_load_profiles_rejects_zero_exponent() {
        let result = load_profiles_from_str("bad:\n  r: 0.0\n  g: 1.0\n  b: 1.0\n");
        assert!(matches!(result, Err(NegfixError::Config(_))));
    }

    #[test]
    fn test_load_profiles_rejects_malformed_yaml() {
        let result = load_profiles_from_str("gold200: [1.0, 2.0");
        assert!(matches!(result, Err(NegfixError::Config(_))));
    }

    #[test]
    fn test_registry_with_file_overrides_builtin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gold200:\n  r: 0.55\n  g: 0.56\n  b: 0.65").unwrap();
        writeln!(file, "none:\n  r: 1.0\n  g: 1.0\n  b: 0.9").unwrap();

        let registry = ProfileRegistry::with_file(file.path()).unwrap();

        assert_eq!(registry.len(), 4);
        assert_eq!(registry.get("gold200"), Some(GammaProfile::new(0.55, 0.56, 0.65)));
        assert_eq!(registry.get("none").map(|p| p.b), Some(0.9));
    }

    #[test]
    fn test_registry_with_missing_file() {
        let result = ProfileRegistry::with_file("/nonexistent/profiles.yml");
        assert!(matches!(result, Err(NegfixError::Io { .. })));
    }

    #[test]
    fn test_profile_yaml_is_loadable() {
        let profile = GammaProfile::new(0.5228012326204643, 0.536735995403697, 0.6114420242779521);
        let yaml = profile_to_yaml("portra800-copy", &profile).unwrap();
        let loaded = load_profiles_from_str(&yaml).unwrap();
        assert_eq!(loaded.get("portra800-copy"), Some(&profile));
    }

    #[test]
    fn test_profile_name_validation() {
        assert!(validate_profile_name("").is_err());
        assert!(validate_profile_name("tri x").is_err());
        assert!(validate_profile_name("trix400").is_ok());
    }
}
