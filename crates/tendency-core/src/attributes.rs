//! The nine logical attributes and their extraction from a person.
//!
//! Attribute names arriving from users go through an alias table
//! (`"primary_os"`, `"primaryos"` -> [`Attribute::Os`], etc.) so the mining
//! engine only ever dispatches on the closed enum, never on raw strings.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::Person;

/// One of the nine minable attributes.
///
/// Single-valued attributes yield at most one value per person;
/// multi-valued attributes (color, hobby, language) yield the person's
/// whole set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Os,
    Study,
    Color,
    Hobby,
    Region,
    Language,
    Focus,
    Course,
    Graduation,
}

impl Attribute {
    /// Canonical short name, used in generic insight keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Os => "os",
            Self::Study => "study",
            Self::Color => "color",
            Self::Hobby => "hobby",
            Self::Region => "region",
            Self::Language => "language",
            Self::Focus => "focus",
            Self::Course => "course",
            Self::Graduation => "graduation",
        }
    }

    /// Human-readable name used in generated sentences
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Os => "primary OS",
            Self::Study => "study time",
            Self::Color => "favorite color",
            Self::Hobby => "hobby",
            Self::Region => "region",
            Self::Language => "language",
            Self::Focus => "engineering focus",
            Self::Course => "course load",
            Self::Graduation => "graduation year",
        }
    }

    /// The six original attributes driving the compact heat map
    pub const CORE: [Attribute; 6] = [
        Self::Os,
        Self::Study,
        Self::Color,
        Self::Hobby,
        Self::Region,
        Self::Language,
    ];

    /// All nine attributes, in fixed matrix order
    pub const ALL: [Attribute; 9] = [
        Self::Os,
        Self::Study,
        Self::Color,
        Self::Hobby,
        Self::Region,
        Self::Language,
        Self::Focus,
        Self::Course,
        Self::Graduation,
    ];

    pub fn is_multi_valued(&self) -> bool {
        matches!(self, Self::Color | Self::Hobby | Self::Language)
    }

    /// Extract this attribute's values from a person.
    ///
    /// An empty set means the person is not eligible for this attribute.
    /// Integers are rendered as decimal text so every attribute mines over
    /// the same string domain.
    pub fn extract(&self, person: &Person) -> BTreeSet<String> {
        match self {
            Self::Os => single(person.primary_os.map(|v| v.as_str().to_string())),
            Self::Study => single(person.study_time.map(|v| v.as_str().to_string())),
            Self::Region => single(person.region.map(|v| v.as_str().to_string())),
            Self::Focus => single(person.engineering_focus.map(|v| v.as_str().to_string())),
            Self::Course => single(person.course_load.map(|v| v.to_string())),
            Self::Graduation => single(person.graduation_year.map(|v| v.to_string())),
            Self::Color => person.favorite_colors.clone(),
            Self::Hobby => person.hobbies.clone(),
            Self::Language => person.languages.clone(),
        }
    }
}

fn single(value: Option<String>) -> BTreeSet<String> {
    value.into_iter().collect()
}

impl std::str::FromStr for Attribute {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "os" | "primary_os" | "primaryos" => Ok(Self::Os),
            "study" | "studytime" | "study_time" => Ok(Self::Study),
            "color" | "colors" | "favoritecolor" | "favorite_color" | "favouritecolor"
            | "favourite_color" | "favoritecolors" => Ok(Self::Color),
            "hobby" | "hobbies" => Ok(Self::Hobby),
            "region" | "area" => Ok(Self::Region),
            "language" | "lang" | "languages" => Ok(Self::Language),
            "focus" | "major" | "engineering" | "engfocus" | "engineeringfocus"
            | "engineering_focus" => Ok(Self::Focus),
            "course" | "courseload" | "course_load" | "load" | "courses" => Ok(Self::Course),
            "graduation" | "gradyear" | "grad_year" | "graduationyear" | "graduation_year"
            | "year" => Ok(Self::Graduation),
            _ => Err(format!("Unknown attribute: {}", s)),
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PersonBuilder, PrimaryOs, StudyTime};

    #[test]
    fn test_alias_normalization() {
        assert_eq!("primary_os".parse::<Attribute>().unwrap(), Attribute::Os);
        assert_eq!("PrimaryOS".parse::<Attribute>().unwrap(), Attribute::Os);
        assert_eq!("gradyear".parse::<Attribute>().unwrap(), Attribute::Graduation);
        assert_eq!("hobbies".parse::<Attribute>().unwrap(), Attribute::Hobby);
        assert_eq!("lang".parse::<Attribute>().unwrap(), Attribute::Language);
        assert!("favorite_pet".parse::<Attribute>().is_err());
    }

    #[test]
    fn test_extract_single_valued() {
        let person = PersonBuilder::new()
            .id("p1")
            .primary_os(PrimaryOs::Windows)
            .study_time(StudyTime::Night)
            .course_load(5)
            .build();

        assert_eq!(
            Attribute::Os.extract(&person),
            BTreeSet::from(["Windows".to_string()])
        );
        assert_eq!(
            Attribute::Course.extract(&person),
            BTreeSet::from(["5".to_string()])
        );
        // absent attribute yields an empty (ineligible) set
        assert!(Attribute::Region.extract(&person).is_empty());
        assert!(Attribute::Graduation.extract(&person).is_empty());
    }

    #[test]
    fn test_extract_multi_valued_verbatim() {
        let person = PersonBuilder::new()
            .id("p1")
            .add_favorite_color("blue")
            .add_favorite_color("green")
            .build();

        let colors = Attribute::Color.extract(&person);
        assert_eq!(colors.len(), 2);
        assert!(colors.contains("blue") && colors.contains("green"));
        assert!(Attribute::Hobby.extract(&person).is_empty());
    }

    #[test]
    fn test_multi_valued_classification() {
        assert!(Attribute::Color.is_multi_valued());
        assert!(Attribute::Language.is_multi_valued());
        assert!(!Attribute::Os.is_multi_valued());
        assert!(!Attribute::Course.is_multi_valued());
    }

    #[test]
    fn test_attribute_orderings() {
        assert_eq!(Attribute::CORE.len(), 6);
        assert_eq!(Attribute::ALL.len(), 9);
        assert!(Attribute::ALL.starts_with(&Attribute::CORE));
    }
}
