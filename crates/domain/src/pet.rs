//! Pet profile value types.

use crate::calendar::IntoCalendarDay;
use chrono::Datelike;
use pawtrip_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum pet name length in characters.
pub const MAX_PET_NAME_CHARS: usize = 50;

/// Validation failures for pet profile values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetProfileError {
    /// Name is empty after trimming.
    EmptyName {
        /// Length of the raw input before trimming.
        input_length: usize,
    },
    /// Name exceeds [`MAX_PET_NAME_CHARS`].
    NameTooLong {
        /// Character count after trimming.
        length: usize,
    },
    /// A field holds a value outside its option list.
    UnknownOption {
        /// Profile field name.
        field: &'static str,
        /// Offending value.
        value: String,
    },
}

impl PetProfileError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyName { .. } | Self::NameTooLong { .. } => {
                ErrorCode::new("domain", "invalid_pet_name")
            },
            Self::UnknownOption { .. } => ErrorCode::new("domain", "unknown_profile_option"),
        }
    }
}

impl fmt::Display for PetProfileError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName { .. } => formatter.write_str("pet name must be non-empty"),
            Self::NameTooLong { .. } => write!(
                formatter,
                "pet name must be at most {MAX_PET_NAME_CHARS} characters"
            ),
            Self::UnknownOption { field, value } => {
                write!(formatter, "`{value}` is not a valid {field}")
            },
        }
    }
}

impl std::error::Error for PetProfileError {}

impl From<PetProfileError> for ErrorEnvelope {
    fn from(error: PetProfileError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            PetProfileError::EmptyName { input_length } => {
                envelope.with_metadata("input_length", input_length.to_string())
            },
            PetProfileError::NameTooLong { length } => envelope
                .with_metadata("length", length.to_string())
                .with_metadata("max", MAX_PET_NAME_CHARS.to_string()),
            PetProfileError::UnknownOption { field, value } => envelope
                .with_metadata("field", field)
                .with_metadata("value", value),
        }
    }
}

/// Display name of a pet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PetName(Box<str>);

impl PetName {
    /// Parse a trimmed, non-empty name of at most [`MAX_PET_NAME_CHARS`] characters.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, PetProfileError> {
        let raw = input.as_ref();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PetProfileError::EmptyName {
                input_length: raw.len(),
            });
        }
        let length = trimmed.chars().count();
        if length > MAX_PET_NAME_CHARS {
            return Err(PetProfileError::NameTooLong { length });
        }
        Ok(Self(trimmed.into()))
    }

    /// Access the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PetName {
    type Error = PetProfileError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PetName> for String {
    fn from(value: PetName) -> Self {
        value.0.into()
    }
}

impl fmt::Display for PetName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Declares a closed option list with its wire names.
macro_rules! profile_option {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($(#[$variant_meta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($(#[$variant_meta])* $variant,)+
        }

        impl $name {
            /// Every option, in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire name.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = PetProfileError;

            fn from_str(input: &str) -> Result<Self, Self::Err> {
                let normalized = input.trim().to_ascii_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|option| option.as_str() == normalized)
                    .ok_or_else(|| PetProfileError::UnknownOption {
                        field: $field,
                        value: input.trim().to_owned(),
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str(self.as_str())
            }
        }
    };
}

profile_option! {
    /// Low/medium/high scale used for anxiety, flight comfort and exercise need.
    Level, "level" {
        /// Low.
        Low => "low",
        /// Medium.
        Medium => "medium",
        /// High.
        High => "high",
    }
}

profile_option! {
    /// Preferred surroundings.
    Environment, "environment" {
        /// City.
        Urban => "urban",
        /// Suburbs.
        Suburban => "suburban",
        /// Outdoors.
        Nature => "nature",
        /// No strong preference.
        Mixed => "mixed",
    }
}

profile_option! {
    /// Personality archetype.
    Personality, "personality" {
        /// Friendly.
        Friendly => "friendly",
        /// Anxious.
        Anxious => "anxious",
        /// Energetic.
        Energetic => "energetic",
        /// Calm.
        Calm => "calm",
        /// Protective.
        Protective => "protective",
        /// Playful.
        Playful => "playful",
        /// Independent.
        Independent => "independent",
    }
}

profile_option! {
    /// Tri-state answer.
    YesNoUnknown, "yes/no/unknown answer" {
        /// Yes.
        Yes => "yes",
        /// No.
        No => "no",
        /// Not known.
        Unknown => "unknown",
    }
}

profile_option! {
    /// Weight unit.
    WeightUnit, "weight unit" {
        /// Kilograms.
        Kg => "kg",
        /// Pounds.
        Lb => "lb",
    }
}

/// Raw image-analysis payload; every field is free-form text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DogAnalysis {
    /// Breed guess.
    pub breed: String,
    /// Age guess, e.g. `2 years`.
    pub age_estimate: String,
    /// Weight guess, number only.
    pub weight_estimate: String,
    /// `yes`, `no` or `unknown`.
    pub rabies_vaccinated: String,
    /// Level or `unknown`.
    pub separation_anxiety: String,
    /// Level or `unknown`.
    pub flight_comfort: String,
    /// Level or `unknown`.
    pub daily_exercise_need: String,
    /// Environment or `unknown`.
    pub environment_preference: String,
    /// Personality or `unknown`.
    pub personality_archetype: String,
    /// Present when the analysis failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Pet profile as edited by the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetProfile {
    /// Display name.
    pub name: PetName,
    /// Breed, if known.
    pub breed: Option<String>,
    /// Free-form age description.
    pub age: Option<String>,
    /// Free-form weight.
    pub weight: Option<String>,
    /// Unit for `weight`.
    pub weight_unit: WeightUnit,
    /// Rabies vaccination status.
    pub rabies_vaccinated: YesNoUnknown,
    /// Separation anxiety.
    pub separation_anxiety: Level,
    /// Comfort with flying.
    pub flight_comfort: Level,
    /// Daily exercise need.
    pub daily_exercise_need: Level,
    /// Preferred surroundings.
    pub environment_preference: Environment,
    /// Personality archetype.
    pub personality_archetype: Personality,
}

impl PetProfile {
    /// Profile with every option at its neutral default.
    #[must_use]
    pub const fn new(name: PetName) -> Self {
        Self {
            name,
            breed: None,
            age: None,
            weight: None,
            weight_unit: WeightUnit::Lb,
            rabies_vaccinated: YesNoUnknown::Unknown,
            separation_anxiety: Level::Medium,
            flight_comfort: Level::Medium,
            daily_exercise_need: Level::Medium,
            environment_preference: Environment::Mixed,
            personality_archetype: Personality::Friendly,
        }
    }

    /// Pre-fill a profile from an analysis; unrecognised values keep defaults.
    #[must_use]
    pub fn prefill_from_analysis(name: PetName, analysis: &DogAnalysis) -> Self {
        let defaults = Self::new(name);
        if analysis.error.is_some() {
            return defaults;
        }
        Self {
            breed: known_text(&analysis.breed),
            age: known_text(&analysis.age_estimate),
            weight: known_text(&analysis.weight_estimate),
            rabies_vaccinated: analysis
                .rabies_vaccinated
                .parse()
                .unwrap_or(defaults.rabies_vaccinated),
            separation_anxiety: analysis
                .separation_anxiety
                .parse()
                .unwrap_or(defaults.separation_anxiety),
            flight_comfort: analysis.flight_comfort.parse().unwrap_or(defaults.flight_comfort),
            daily_exercise_need: analysis
                .daily_exercise_need
                .parse()
                .unwrap_or(defaults.daily_exercise_need),
            environment_preference: analysis
                .environment_preference
                .parse()
                .unwrap_or(defaults.environment_preference),
            personality_archetype: analysis
                .personality_archetype
                .parse()
                .unwrap_or(defaults.personality_archetype),
            ..defaults
        }
    }
}

fn known_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("unknown") {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Age of a pet relative to a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum PetAge {
    /// Less than one month old, or born in the future.
    Newborn,
    /// Under a year old.
    Months(u32),
    /// One year or older.
    Years(u32),
}

impl fmt::Display for PetAge {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Newborn => formatter.write_str("puppy/kitten"),
            Self::Months(1) => formatter.write_str("1 month old"),
            Self::Months(months) => write!(formatter, "{months} months old"),
            Self::Years(1) => formatter.write_str("1 year old"),
            Self::Years(years) => write!(formatter, "{years} years old"),
        }
    }
}

/// Describe a pet's age from its date of birth.
///
/// Years count completed birthdays. Below one year the month count ignores
/// the day of month. A single month is singular (`1 month old`), like
/// `1 year old`.
pub fn describe_pet_age(date_of_birth: impl IntoCalendarDay, today: impl IntoCalendarDay) -> PetAge {
    let born = date_of_birth.calendar_day();
    let today = today.calendar_day();

    let mut years = i64::from(today.year()) - i64::from(born.year());
    if (today.month(), today.day()) < (born.month(), born.day()) {
        years -= 1;
    }
    if years >= 1 {
        return PetAge::Years(u32::try_from(years).unwrap_or(u32::MAX));
    }

    let months = (i64::from(today.year()) - i64::from(born.year())) * 12
        + i64::from(today.month())
        - i64::from(born.month());
    match u32::try_from(months) {
        Ok(months) if months >= 1 => PetAge::Months(months),
        _ => PetAge::Newborn,
    }
}
