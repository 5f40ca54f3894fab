//! Domain models for Tendency

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Geographic region a person is from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    UsNortheast,
    UsSoutheast,
    UsMidwest,
    UsWest,
    China,
    India,
    Europe,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UsNortheast => "us-northeast",
            Self::UsSoutheast => "us-southeast",
            Self::UsMidwest => "us-midwest",
            Self::UsWest => "us-west",
            Self::China => "china",
            Self::India => "india",
            Self::Europe => "europe",
        }
    }
}

impl std::str::FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "us-northeast" | "northeast" => Ok(Self::UsNortheast),
            "us-southeast" | "southeast" => Ok(Self::UsSoutheast),
            "us-midwest" | "midwest" => Ok(Self::UsMidwest),
            "us-west" | "west" => Ok(Self::UsWest),
            "china" => Ok(Self::China),
            "india" => Ok(Self::India),
            "europe" => Ok(Self::Europe),
            _ => Err(format!("Unknown region: {}", s)),
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Primary operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PrimaryOs {
    Windows,
    MacOs,
    Linux,
}

impl PrimaryOs {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::MacOs => "MacOS",
            Self::Linux => "Linux",
        }
    }
}

impl std::str::FromStr for PrimaryOs {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "windows" | "win" => Ok(Self::Windows),
            "macos" | "mac" | "osx" => Ok(Self::MacOs),
            "linux" => Ok(Self::Linux),
            _ => Err(format!("Unknown OS: {}", s)),
        }
    }
}

impl std::fmt::Display for PrimaryOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Engineering focus area
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineeringFocus {
    Cybersecurity,
    Electronics,
    NeuralEngineering,
    Robotics,
    Software,
    Biomedical,
}

impl EngineeringFocus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cybersecurity => "cybersecurity",
            Self::Electronics => "electronics",
            Self::NeuralEngineering => "neural-engineering",
            Self::Robotics => "robotics",
            Self::Software => "software",
            Self::Biomedical => "biomedical",
        }
    }
}

impl std::str::FromStr for EngineeringFocus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "cybersecurity" | "security" => Ok(Self::Cybersecurity),
            "electronics" => Ok(Self::Electronics),
            "neural-engineering" | "neural" => Ok(Self::NeuralEngineering),
            "robotics" => Ok(Self::Robotics),
            "software" => Ok(Self::Software),
            "biomedical" => Ok(Self::Biomedical),
            _ => Err(format!("Unknown engineering focus: {}", s)),
        }
    }
}

impl std::fmt::Display for EngineeringFocus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Preferred time of day for studying
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StudyTime {
    Morning,
    Afternoon,
    Night,
}

impl StudyTime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Night => "Night",
        }
    }

    /// Plural phrasing used in generated sentences ("study in the nights")
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Morning => "mornings",
            Self::Afternoon => "afternoons",
            Self::Night => "nights",
        }
    }
}

impl std::str::FromStr for StudyTime {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "night" | "evening" => Ok(Self::Night),
            _ => Err(format!("Unknown study time: {}", s)),
        }
    }
}

impl std::fmt::Display for StudyTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One individual's demographic and preference attributes.
///
/// Every attribute is independently optional. A `Person` is immutable once
/// constructed; edits go through [`PersonBuilder::from_person`] and produce
/// a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    /// Positive year, absent when the source value was missing or <= 0
    pub graduation_year: Option<i32>,
    pub region: Option<Region>,
    pub primary_os: Option<PrimaryOs>,
    pub engineering_focus: Option<EngineeringFocus>,
    pub study_time: Option<StudyTime>,
    /// Positive course count, absent when missing or <= 0
    pub course_load: Option<u32>,
    pub favorite_colors: BTreeSet<String>,
    pub hobbies: BTreeSet<String>,
    pub languages: BTreeSet<String>,
}

impl Person {
    /// One-line summary for listings
    pub fn summary(&self) -> String {
        fn opt<T: std::fmt::Display>(v: &Option<T>) -> String {
            v.as_ref()
                .map(|x| x.to_string())
                .unwrap_or_else(|| "?".to_string())
        }
        fn set(s: &BTreeSet<String>) -> String {
            if s.is_empty() {
                "-".to_string()
            } else {
                s.iter().cloned().collect::<Vec<_>>().join("/")
            }
        }
        format!(
            "{} | grad {} | {} | {} | {} | {} | {} courses | colors: {} | hobbies: {} | languages: {}",
            self.id,
            opt(&self.graduation_year),
            opt(&self.region),
            opt(&self.primary_os),
            opt(&self.engineering_focus),
            opt(&self.study_time),
            opt(&self.course_load),
            set(&self.favorite_colors),
            set(&self.hobbies),
            set(&self.languages),
        )
    }
}

/// Fluent builder for [`Person`].
///
/// Starts with every attribute absent; `from_person` seeds all fields from
/// an existing record so edit flows only override what changed.
#[derive(Debug, Clone, Default)]
pub struct PersonBuilder {
    id: String,
    graduation_year: Option<i32>,
    region: Option<Region>,
    primary_os: Option<PrimaryOs>,
    engineering_focus: Option<EngineeringFocus>,
    study_time: Option<StudyTime>,
    course_load: Option<u32>,
    favorite_colors: BTreeSet<String>,
    hobbies: BTreeSet<String>,
    languages: BTreeSet<String>,
}

impl PersonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed every field from an existing person
    pub fn from_person(person: &Person) -> Self {
        Self {
            id: person.id.clone(),
            graduation_year: person.graduation_year,
            region: person.region,
            primary_os: person.primary_os,
            engineering_focus: person.engineering_focus,
            study_time: person.study_time,
            course_load: person.course_load,
            favorite_colors: person.favorite_colors.clone(),
            hobbies: person.hobbies.clone(),
            languages: person.languages.clone(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Non-positive years are treated as absent
    pub fn graduation_year(mut self, year: i32) -> Self {
        self.graduation_year = (year > 0).then_some(year);
        self
    }

    pub fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Parse leniently; unrecognized text leaves the field absent
    pub fn region_str(mut self, s: &str) -> Self {
        self.region = s.parse().ok();
        self
    }

    pub fn primary_os(mut self, os: PrimaryOs) -> Self {
        self.primary_os = Some(os);
        self
    }

    pub fn primary_os_str(mut self, s: &str) -> Self {
        self.primary_os = s.parse().ok();
        self
    }

    pub fn engineering_focus(mut self, focus: EngineeringFocus) -> Self {
        self.engineering_focus = Some(focus);
        self
    }

    pub fn engineering_focus_str(mut self, s: &str) -> Self {
        self.engineering_focus = s.parse().ok();
        self
    }

    pub fn study_time(mut self, time: StudyTime) -> Self {
        self.study_time = Some(time);
        self
    }

    pub fn study_time_str(mut self, s: &str) -> Self {
        self.study_time = s.parse().ok();
        self
    }

    /// Non-positive loads are treated as absent
    pub fn course_load(mut self, load: i32) -> Self {
        self.course_load = (load > 0).then_some(load as u32);
        self
    }

    pub fn favorite_colors(mut self, colors: BTreeSet<String>) -> Self {
        self.favorite_colors = colors;
        self
    }

    pub fn add_favorite_color(mut self, color: impl Into<String>) -> Self {
        let color = color.into();
        if !color.is_empty() {
            self.favorite_colors.insert(color);
        }
        self
    }

    /// Comma-separated input from interactive/flag entry
    pub fn colors_from_str(mut self, s: &str) -> Self {
        self.favorite_colors = parse_comma_separated(s);
        self
    }

    pub fn hobbies(mut self, hobbies: BTreeSet<String>) -> Self {
        self.hobbies = hobbies;
        self
    }

    pub fn add_hobby(mut self, hobby: impl Into<String>) -> Self {
        let hobby = hobby.into();
        if !hobby.is_empty() {
            self.hobbies.insert(hobby);
        }
        self
    }

    pub fn hobbies_from_str(mut self, s: &str) -> Self {
        self.hobbies = parse_comma_separated(s);
        self
    }

    pub fn languages(mut self, languages: BTreeSet<String>) -> Self {
        self.languages = languages;
        self
    }

    pub fn add_language(mut self, language: impl Into<String>) -> Self {
        let language = language.into();
        if !language.is_empty() {
            self.languages.insert(language);
        }
        self
    }

    pub fn languages_from_str(mut self, s: &str) -> Self {
        self.languages = parse_comma_separated(s);
        self
    }

    pub fn build(self) -> Person {
        Person {
            id: self.id,
            graduation_year: self.graduation_year,
            region: self.region,
            primary_os: self.primary_os,
            engineering_focus: self.engineering_focus,
            study_time: self.study_time,
            course_load: self.course_load,
            favorite_colors: self.favorite_colors,
            hobbies: self.hobbies,
            languages: self.languages,
        }
    }
}

/// Split comma-separated values, trimming whitespace and dropping empties
fn parse_comma_separated(s: &str) -> BTreeSet<String> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_round_trip() {
        for region in [
            Region::UsNortheast,
            Region::UsWest,
            Region::China,
            Region::Europe,
        ] {
            assert_eq!(region.as_str().parse::<Region>().unwrap(), region);
        }
        assert_eq!("US-Northeast".parse::<Region>().unwrap(), Region::UsNortheast);
        assert!("atlantis".parse::<Region>().is_err());
    }

    #[test]
    fn test_os_parse_aliases() {
        assert_eq!("windows".parse::<PrimaryOs>().unwrap(), PrimaryOs::Windows);
        assert_eq!("MacOS".parse::<PrimaryOs>().unwrap(), PrimaryOs::MacOs);
        assert_eq!("osx".parse::<PrimaryOs>().unwrap(), PrimaryOs::MacOs);
        assert_eq!(PrimaryOs::MacOs.to_string(), "MacOS");
    }

    #[test]
    fn test_study_time_describe() {
        assert_eq!(StudyTime::Night.describe(), "nights");
        assert_eq!(StudyTime::Morning.describe(), "mornings");
        assert_eq!("evening".parse::<StudyTime>().unwrap(), StudyTime::Night);
    }

    #[test]
    fn test_builder_defaults_absent() {
        let person = PersonBuilder::new().id("p1").build();
        assert_eq!(person.id, "p1");
        assert!(person.region.is_none());
        assert!(person.graduation_year.is_none());
        assert!(person.favorite_colors.is_empty());
    }

    #[test]
    fn test_builder_rejects_non_positive_numbers() {
        let person = PersonBuilder::new()
            .id("p1")
            .graduation_year(0)
            .course_load(-3)
            .build();
        assert!(person.graduation_year.is_none());
        assert!(person.course_load.is_none());
    }

    #[test]
    fn test_builder_from_person_overrides_named_fields() {
        let original = PersonBuilder::new()
            .id("p1")
            .graduation_year(2027)
            .primary_os(PrimaryOs::MacOs)
            .study_time(StudyTime::Night)
            .add_favorite_color("blue")
            .build();

        let edited = PersonBuilder::from_person(&original)
            .primary_os(PrimaryOs::Linux)
            .study_time(StudyTime::Morning)
            .build();

        assert_eq!(edited.id, "p1");
        assert_eq!(edited.graduation_year, Some(2027));
        assert_eq!(edited.primary_os, Some(PrimaryOs::Linux));
        assert_eq!(edited.study_time, Some(StudyTime::Morning));
        assert!(edited.favorite_colors.contains("blue"));
        // original untouched
        assert_eq!(original.primary_os, Some(PrimaryOs::MacOs));
    }

    #[test]
    fn test_lenient_string_setters() {
        let person = PersonBuilder::new()
            .id("p1")
            .region_str("not-a-region")
            .primary_os_str("Linux")
            .build();
        assert!(person.region.is_none());
        assert_eq!(person.primary_os, Some(PrimaryOs::Linux));
    }

    #[test]
    fn test_comma_separated_sets() {
        let person = PersonBuilder::new()
            .id("p1")
            .colors_from_str(" blue , green ,,red")
            .build();
        assert_eq!(person.favorite_colors.len(), 3);
        assert!(person.favorite_colors.contains("green"));
    }
}
