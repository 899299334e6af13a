//! Entity profile: the validated input every document and plan is derived from.

use std::fmt;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use super::error::{Field, ValidationError};

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("slug pattern is valid"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Structural variant of an entity.
///
/// `Minimal` carries identity and objectives only; `Full` adds the memory,
/// skills, and inbox subtree plus the extra kernel documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Minimal,
    Full,
}

impl Tier {
    pub fn number(self) -> u8 {
        match self {
            Self::Minimal => 1,
            Self::Full => 2,
        }
    }
}

impl TryFrom<u8> for Tier {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Minimal),
            2 => Ok(Self::Full),
            other => Err(ValidationError::new(
                Field::Tier,
                format!("expected 1 or 2, got {other}"),
            )),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Raw, unnormalized input as collected from the user.
#[derive(Debug, Clone, Default)]
pub struct ProfileInput {
    pub name: String,
    /// Overrides the slug derived from `name`.
    pub slug: Option<String>,
    pub description: String,
    pub tier: u8,
    pub objectives: Vec<String>,
    pub output_root: PathBuf,
}

/// Validated entity profile. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityProfile {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub tier: Tier,
    pub objectives: Vec<String>,
    pub output_root: PathBuf,
}

impl EntityProfile {
    /// Normalize raw input (trim, derive slug, drop blank objectives) and validate it.
    pub fn from_input(input: ProfileInput) -> Result<Self, ValidationError> {
        let name = input.name.trim().to_string();
        let slug = match input.slug {
            Some(slug) => slug.trim().to_string(),
            None => derive_slug(&name),
        };
        let profile = Self {
            slug,
            description: input.description.trim().to_string(),
            tier: Tier::try_from(input.tier)?,
            objectives: clean_objectives(input.objectives),
            output_root: input.output_root,
            name,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Check every field against its constraint, first failure wins.
    ///
    /// Text fields must already be trimmed and every objective non-blank, so a
    /// profile built by hand renders the same documents as one from `from_input`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new(Field::Name, "name is required"));
        }
        check_trimmed(Field::Name, &self.name)?;
        if !is_valid_slug(&self.slug) {
            return Err(ValidationError::new(
                Field::Slug,
                format!(
                    "'{}' must use lowercase letters, numbers, and hyphens only",
                    self.slug
                ),
            ));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::new(
                Field::Description,
                "description is required",
            ));
        }
        check_trimmed(Field::Description, &self.description)?;
        if self.objectives.is_empty() {
            return Err(ValidationError::new(
                Field::Objectives,
                "at least one non-blank objective is required",
            ));
        }
        for (i, objective) in self.objectives.iter().enumerate() {
            if objective.trim().is_empty() {
                return Err(ValidationError::new(
                    Field::Objectives,
                    format!("objective {} is blank", i + 1),
                ));
            }
            check_trimmed(Field::Objectives, objective)?;
        }
        Ok(())
    }

    /// Directory the entity is created in (`output_root/slug`).
    pub fn entity_root(&self) -> PathBuf {
        self.output_root.join(&self.slug)
    }
}

/// Lower-case `name` and collapse whitespace runs into `-`.
///
/// The result is not guaranteed to be a valid slug; callers validate it.
pub fn derive_slug(name: &str) -> String {
    WHITESPACE_RE
        .replace_all(&name.trim().to_lowercase(), "-")
        .into_owned()
}

fn check_trimmed(field: Field, value: &str) -> Result<(), ValidationError> {
    if value.trim() != value {
        return Err(ValidationError::new(
            field,
            format!("'{value}' has leading or trailing whitespace"),
        ));
    }
    Ok(())
}

pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_RE.is_match(slug)
}

/// Split a comma-separated objectives string into trimmed, non-blank items.
pub fn parse_objectives(raw: &str) -> Vec<String> {
    clean_objectives(raw.split(',').map(str::to_string))
}

fn clean_objectives(items: impl IntoIterator<Item = String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(slug: Option<&str>) -> ProfileInput {
        ProfileInput {
            name: "Research Assistant".to_string(),
            slug: slug.map(str::to_string),
            description: "literature review support".to_string(),
            tier: 2,
            objectives: vec!["Summarize papers".to_string()],
            output_root: PathBuf::from("out"),
        }
    }

    #[test]
    fn slug_with_invalid_characters_is_rejected() {
        let err = EntityProfile::from_input(input(Some("My Entity!"))).unwrap_err();
        assert_eq!(err.field, Field::Slug);
        assert!(err.reason.contains("My Entity!"));
    }

    #[test]
    fn explicit_valid_slug_is_accepted() {
        let profile = EntityProfile::from_input(input(Some("research-assistant"))).expect("valid");
        assert_eq!(profile.slug, "research-assistant");
        assert_eq!(profile.entity_root(), PathBuf::from("out").join("research-assistant"));
    }

    #[test]
    fn slug_defaults_to_derived_name() {
        let profile = EntityProfile::from_input(input(None)).expect("valid");
        assert_eq!(profile.slug, "research-assistant");
    }

    #[test]
    fn derive_slug_collapses_whitespace_runs() {
        assert_eq!(derive_slug("  Deep   Research\tBot "), "deep-research-bot");
    }

    #[test]
    fn derived_slug_with_punctuation_still_fails_validation() {
        let mut raw = input(None);
        raw.name = "My Entity!".to_string();
        let err = EntityProfile::from_input(raw).unwrap_err();
        assert_eq!(err.field, Field::Slug);
    }

    #[test]
    fn blank_name_and_description_are_rejected() {
        let mut raw = input(None);
        raw.name = "   ".to_string();
        raw.slug = Some("valid".to_string());
        assert_eq!(EntityProfile::from_input(raw).unwrap_err().field, Field::Name);

        let mut raw = input(None);
        raw.description = "\n\t".to_string();
        assert_eq!(
            EntityProfile::from_input(raw).unwrap_err().field,
            Field::Description
        );
    }

    #[test]
    fn unknown_tier_is_rejected() {
        let mut raw = input(None);
        raw.tier = 3;
        let err = EntityProfile::from_input(raw).unwrap_err();
        assert_eq!(err.field, Field::Tier);
    }

    #[test]
    fn objectives_of_only_commas_and_whitespace_are_rejected() {
        let mut raw = input(None);
        raw.objectives = parse_objectives(" , ,,  ");
        assert!(raw.objectives.is_empty());
        let err = EntityProfile::from_input(raw).unwrap_err();
        assert_eq!(err.field, Field::Objectives);
    }

    #[test]
    fn hand_built_profile_with_untrimmed_fields_is_rejected() {
        let mut profile = EntityProfile::from_input(input(None)).expect("valid");
        profile.name = "  Research Assistant ".to_string();
        assert_eq!(profile.validate().unwrap_err().field, Field::Name);

        let mut profile = EntityProfile::from_input(input(None)).expect("valid");
        profile.description = "literature review support\n".to_string();
        assert_eq!(profile.validate().unwrap_err().field, Field::Description);

        let mut profile = EntityProfile::from_input(input(None)).expect("valid");
        profile.objectives = vec![" Summarize papers".to_string()];
        assert_eq!(profile.validate().unwrap_err().field, Field::Objectives);
    }

    #[test]
    fn blank_objective_among_valid_ones_is_rejected() {
        let mut profile = EntityProfile::from_input(input(None)).expect("valid");
        profile.objectives = vec!["Summarize papers".to_string(), "   ".to_string()];
        let err = profile.validate().unwrap_err();
        assert_eq!(err.field, Field::Objectives);
        assert!(err.reason.contains("objective 2"));
    }

    #[test]
    fn parse_objectives_trims_and_keeps_order() {
        assert_eq!(
            parse_objectives("Track citations,  Summarize papers , ,Draft reviews"),
            vec!["Track citations", "Summarize papers", "Draft reviews"]
        );
    }
}
