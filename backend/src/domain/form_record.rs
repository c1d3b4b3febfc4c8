//! Form submission aggregate.
//!
//! A [`FormSubmission`] is what a client sends; a [`FormRecord`] is what the
//! store keeps. Both are built from validated parts so adapters never hand
//! the domain blank identity fields or unknown car models.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::record_key::{NormalizedKey, RecordKey};

/// Maximum length, in characters, of any free-text form field.
pub const MAX_FIELD_CHARS: usize = 200;

/// Form fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Given name.
    Name,
    /// Family name.
    Surname,
    /// Department of residence.
    Department,
    /// Favourite sport.
    FavoriteSport,
    /// Gender.
    Gender,
    /// Car model selection.
    CarModels,
}

impl FormField {
    /// Stable identifier for logs and error details.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Surname => "surname",
            Self::Department => "department",
            Self::FavoriteSport => "favoriteSport",
            Self::Gender => "gender",
            Self::CarModels => "carModels",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for form input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormValidationError {
    /// A required field is blank after trimming.
    #[error("{field} must not be empty")]
    Empty { field: FormField },
    /// A field exceeds [`MAX_FIELD_CHARS`].
    #[error("{field} must be at most {max} characters")]
    TooLong { field: FormField, max: usize },
    /// The car selection names a model the form does not offer.
    #[error("unknown car model: {value}")]
    UnknownCarModel { value: String },
}

impl FormValidationError {
    /// The field the failure refers to.
    pub const fn field(&self) -> FormField {
        match self {
            Self::Empty { field } | Self::TooLong { field, .. } => *field,
            Self::UnknownCarModel { .. } => FormField::CarModels,
        }
    }
}

fn check_length(field: FormField, value: &str) -> Result<(), FormValidationError> {
    if value.chars().count() > MAX_FIELD_CHARS {
        return Err(FormValidationError::TooLong {
            field,
            max: MAX_FIELD_CHARS,
        });
    }
    Ok(())
}

fn required_text(field: FormField, value: &str) -> Result<String, FormValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormValidationError::Empty { field });
    }
    check_length(field, trimmed)?;
    Ok(trimmed.to_owned())
}

fn optional_text(
    field: FormField,
    value: Option<&str>,
) -> Result<Option<String>, FormValidationError> {
    let Some(trimmed) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    check_length(field, trimmed)?;
    Ok(Some(trimmed.to_owned()))
}

/// Car models offered by the form, in export column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CarModel {
    /// Vado.
    Vado,
    /// Chrysler.
    Chrysler,
    /// Toyota.
    Toyota,
    /// Nissan.
    Nissan,
}

impl CarModel {
    /// Every model, in export column order.
    pub const ALL: [Self; 4] = [Self::Vado, Self::Chrysler, Self::Toyota, Self::Nissan];

    /// Wire key used by the form (`vado`, `chrysler`, ...).
    pub const fn key(self) -> &'static str {
        match self {
            Self::Vado => "vado",
            Self::Chrysler => "chrysler",
            Self::Toyota => "toyota",
            Self::Nissan => "nissan",
        }
    }
}

impl FromStr for CarModel {
    type Err = FormValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|model| model.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FormValidationError::UnknownCarModel {
                value: s.to_owned(),
            })
    }
}

/// Set of selected car models.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarSelection(BTreeSet<CarModel>);

impl CarSelection {
    /// Build a selection from `(model key, selected)` flags.
    ///
    /// Unknown keys are rejected even when their flag is `false`.
    ///
    /// # Examples
    /// ```
    /// use form_intake::domain::{CarModel, CarSelection};
    ///
    /// let cars = CarSelection::from_flags([("vado", true), ("toyota", false)]).unwrap();
    /// assert!(cars.contains(CarModel::Vado));
    /// assert!(!cars.contains(CarModel::Toyota));
    /// ```
    pub fn from_flags<I, K>(flags: I) -> Result<Self, FormValidationError>
    where
        I: IntoIterator<Item = (K, bool)>,
        K: AsRef<str>,
    {
        let mut selected = BTreeSet::new();
        for (key, enabled) in flags {
            let model = key.as_ref().parse::<CarModel>()?;
            if enabled {
                selected.insert(model);
            }
        }
        Ok(Self(selected))
    }

    /// Whether `model` is selected.
    pub fn contains(&self, model: CarModel) -> bool {
        self.0.contains(&model)
    }

    /// Selected models in column order.
    pub fn iter(&self) -> impl Iterator<Item = CarModel> + '_ {
        self.0.iter().copied()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<CarModel> for CarSelection {
    fn from_iter<T: IntoIterator<Item = CarModel>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Identity fields as the submitter typed them (trimmed, case preserved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormIdentity {
    name: String,
    surname: String,
    department: String,
}

impl FormIdentity {
    /// Validate and trim the identity triple.
    pub fn new(name: &str, surname: &str, department: &str) -> Result<Self, FormValidationError> {
        Ok(Self {
            name: required_text(FormField::Name, name)?,
            surname: required_text(FormField::Surname, surname)?,
            department: required_text(FormField::Department, department)?,
        })
    }

    /// Given name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Family name.
    pub fn surname(&self) -> &str {
        &self.surname
    }

    /// Department of residence.
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Matching key for deduplication.
    pub fn normalized(&self) -> NormalizedKey {
        NormalizedKey::from_raw(&self.name, &self.surname, &self.department)
    }

    /// Store key for deduplication.
    pub fn record_key(&self) -> RecordKey {
        self.normalized().record_key()
    }
}

/// Payload fields overwritten on every submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    favorite_sport: Option<String>,
    gender: Option<String>,
    over_21: bool,
    cars: CarSelection,
}

impl FormPayload {
    /// Validate payload fields; blank optional text becomes `None`.
    pub fn new(
        favorite_sport: Option<&str>,
        gender: Option<&str>,
        over_21: bool,
        cars: CarSelection,
    ) -> Result<Self, FormValidationError> {
        Ok(Self {
            favorite_sport: optional_text(FormField::FavoriteSport, favorite_sport)?,
            gender: optional_text(FormField::Gender, gender)?,
            over_21,
            cars,
        })
    }

    /// Favourite sport, if given.
    pub fn favorite_sport(&self) -> Option<&str> {
        self.favorite_sport.as_deref()
    }

    /// Gender, if given.
    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }

    /// Whether the submitter declared being 21 or older.
    pub const fn over_21(&self) -> bool {
        self.over_21
    }

    /// Selected car models.
    pub const fn cars(&self) -> &CarSelection {
        &self.cars
    }
}

/// A validated submission ready for the deduplicating upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    /// Identity triple.
    pub identity: FormIdentity,
    /// Overwritable payload.
    pub payload: FormPayload,
}

/// A stored form record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRecord {
    /// Store-assigned identifier; stable across updates.
    pub id: Uuid,
    /// Identity as last submitted. The normalised triple never changes.
    pub identity: FormIdentity,
    /// Payload from the most recent submission.
    pub payload: FormPayload,
    /// First write.
    pub created_at: DateTime<Utc>,
    /// Most recent write.
    pub updated_at: DateTime<Utc>,
}
