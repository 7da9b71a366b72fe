//! Seed registry types and JSON parsing.
//!
//! The registry names the demo account, the tag palette shared by every
//! generated network, and the named seeds that drive generation.

use std::collections::HashSet;
use std::path::Path;

use cap_std::ambient_authority;
use cap_std::fs::Dir;
use serde::Deserialize;

use crate::error::RegistryError;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// A seed registry containing the demo account, tags and named seeds.
///
/// # Example
///
/// ```
/// use example_data::SeedRegistry;
///
/// let json = r##"{
///     "version": 1,
///     "demoUser": {"username": "demo_user", "email": "demo@example.com",
///                  "firstName": "John", "lastName": "Smith"},
///     "tags": [{"name": "Investor", "color": "#EC4899"}],
///     "seeds": [{"name": "test", "seed": 42, "contactCount": 5}]
/// }"##;
///
/// let registry = SeedRegistry::from_json(json).expect("valid registry");
/// assert_eq!(registry.seeds().len(), 1);
/// assert_eq!(registry.demo_user().username, "demo_user");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    version: u32,
    demo_user: DemoUserProfile,
    tags: Vec<TagDefinition>,
    seeds: Vec<SeedDefinition>,
}

impl SeedRegistry {
    /// Parses a seed registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the JSON is malformed, the version is
    /// unsupported, a tag is invalid, or no seeds are defined.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawSeedRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a seed registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let io_error = |message: String| RegistryError::IoError {
            path: path.to_path_buf(),
            message,
        };
        let file_name = path
            .file_name()
            .ok_or_else(|| io_error("registry path must name a file".to_owned()))?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|e| io_error(e.to_string()))?;
        let contents = dir
            .read_to_string(Path::new(file_name))
            .map_err(|e| io_error(e.to_string()))?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSeedRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.demo_user.username.trim().is_empty() {
            return Err(RegistryError::EmptyUsername);
        }

        if raw.tags.is_empty() {
            return Err(RegistryError::EmptyTags);
        }

        let mut seen = HashSet::new();
        for (index, tag) in raw.tags.iter().enumerate() {
            if !is_hex_colour(&tag.color) {
                return Err(RegistryError::InvalidTagColor {
                    index,
                    value: tag.color.clone(),
                });
            }
            if !seen.insert(tag.name.as_str()) {
                return Err(RegistryError::DuplicateTagName {
                    name: tag.name.clone(),
                });
            }
        }

        if raw.seeds.is_empty() {
            return Err(RegistryError::EmptySeeds);
        }

        let seeds = raw
            .seeds
            .into_iter()
            .map(|s| SeedDefinition::new(s.name, s.seed, s.contact_count))
            .collect();

        Ok(Self {
            version: raw.version,
            demo_user: raw.demo_user,
            tags: raw.tags,
            seeds,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the account every generated network belongs to.
    #[must_use]
    pub fn demo_user(&self) -> &DemoUserProfile {
        &self.demo_user
    }

    /// Returns the tag palette.
    #[must_use]
    pub fn tags(&self) -> &[TagDefinition] {
        &self.tags
    }

    /// Returns all seed definitions.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Finds a seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] if no seed with the given name
    /// exists.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }
}

fn is_hex_colour(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|digits| digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Profile of the demo account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoUserProfile {
    /// Login name.
    pub username: String,
    /// Contact e-mail.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// A named tag with its `#RRGGBB` colour.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagDefinition {
    /// Tag label.
    pub name: String,
    /// Hex colour.
    pub color: String,
}

/// A named seed definition for deterministic network generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDefinition {
    name: String,
    seed: u64,
    contact_count: usize,
}

impl SeedDefinition {
    /// Creates a seed definition.
    #[must_use]
    pub fn new(name: impl Into<String>, seed: u64, contact_count: usize) -> Self {
        Self {
            name: name.into(),
            seed,
            contact_count,
        }
    }

    /// Returns the seed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the RNG seed value.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of contacts to generate.
    #[must_use]
    pub const fn contact_count(&self) -> usize {
        self.contact_count
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedRegistry {
    version: u32,
    demo_user: DemoUserProfile,
    tags: Vec<TagDefinition>,
    seeds: Vec<RawSeedDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedDefinition {
    name: String,
    seed: u64,
    contact_count: usize,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const DEMO_USER: &str = r#""demoUser": {"username": "demo_user", "email": "demo@example.com", "firstName": "John", "lastName": "Smith"}"#;

    fn registry_json(tags: &str, seeds: &str) -> String {
        format!(r#"{{"version": 1, {DEMO_USER}, "tags": {tags}, "seeds": {seeds}}}"#)
    }

    #[test]
    fn parses_valid_registry() {
        let json = registry_json(
            r##"[{"name": "Investor", "color": "#EC4899"}, {"name": "Remote", "color": "#14b8a6"}]"##,
            r#"[{"name": "demo-network", "seed": 2024, "contactCount": 127}]"#,
        );
        let registry = SeedRegistry::from_json(&json).expect("valid registry");

        assert_eq!(registry.version(), 1);
        assert_eq!(registry.tags().len(), 2);
        let seed = registry.find_seed("demo-network").expect("seed found");
        assert_eq!(seed.seed(), 2024);
        assert_eq!(seed.contact_count(), 127);
    }

    #[rstest]
    #[case::bad_colour(
        r##"[{"name": "Investor", "color": "pink"}]"##,
        RegistryError::InvalidTagColor { index: 0, value: "pink".to_owned() }
    )]
    #[case::short_colour(
        r##"[{"name": "Investor", "color": "#EC4"}]"##,
        RegistryError::InvalidTagColor { index: 0, value: "#EC4".to_owned() }
    )]
    #[case::duplicate(
        r##"[{"name": "Sales", "color": "#EF4444"}, {"name": "Sales", "color": "#10B981"}]"##,
        RegistryError::DuplicateTagName { name: "Sales".to_owned() }
    )]
    #[case::no_tags("[]", RegistryError::EmptyTags)]
    fn rejects_invalid_tags(#[case] tags: &str, #[case] expected: RegistryError) {
        let json = registry_json(tags, r#"[{"name": "a", "seed": 1, "contactCount": 1}]"#);
        assert_eq!(SeedRegistry::from_json(&json), Err(expected));
    }

    #[test]
    fn rejects_empty_seeds() {
        let json = registry_json(r##"[{"name": "Sales", "color": "#EF4444"}]"##, "[]");
        assert_eq!(SeedRegistry::from_json(&json), Err(RegistryError::EmptySeeds));
    }
}
