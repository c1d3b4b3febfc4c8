//! Normalised identity triple and the deterministic record key derived from it.
//!
//! Two submissions refer to the same record exactly when their normalised
//! triples are equal. The [`RecordKey`] is a fixed-width digest of that triple
//! so the store can enforce uniqueness with a plain unique index and the
//! upsert becomes a single conditional write.

use std::fmt;

use sha2::{Digest, Sha256};

/// Lowercased, trimmed `(name, surname, department)` triple.
///
/// Used only for equality matching; never rendered to users.
///
/// # Examples
/// ```
/// use form_intake::domain::NormalizedKey;
///
/// let a = NormalizedKey::from_raw("Ana ", " PÉREZ", "Lima");
/// let b = NormalizedKey::from_raw("ana", "pérez", " lima ");
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedKey {
    name: String,
    surname: String,
    department: String,
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

impl NormalizedKey {
    /// Normalise raw identity values.
    pub fn from_raw(name: &str, surname: &str, department: &str) -> Self {
        Self {
            name: normalize(name),
            surname: normalize(surname),
            department: normalize(department),
        }
    }

    /// Normalised name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalised surname.
    pub fn surname(&self) -> &str {
        &self.surname
    }

    /// Normalised department.
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Derive the store key for this triple.
    pub fn record_key(&self) -> RecordKey {
        RecordKey::derive(self)
    }
}

/// Hex-encoded SHA-256 digest of a [`NormalizedKey`].
///
/// Each component is length-prefixed before hashing so `("ab", "c")` and
/// `("a", "bc")` cannot collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey(String);

impl RecordKey {
    fn derive(key: &NormalizedKey) -> Self {
        let mut hasher = Sha256::new();
        for part in [key.name(), key.surname(), key.department()] {
            hasher.update(format!("{}:", part.len()));
            hasher.update(part);
        }
        Self(hex::encode(hasher.finalize()))
    }

    /// Borrow the hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecordKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(("Ana ", "Pérez", "Lima"), ("ana", "pérez", "lima"))]
    #[case(("  JOSÉ", "QUISPE  ", "\tCusco\n"), ("josé", "quispe", "cusco"))]
    #[case(("ana maría", "de la cruz", "la libertad"), ("ana maría", "de la cruz", "la libertad"))]
    fn normalises_case_and_outer_whitespace(
        #[case] raw: (&str, &str, &str),
        #[case] expected: (&str, &str, &str),
    ) {
        let key = NormalizedKey::from_raw(raw.0, raw.1, raw.2);
        assert_eq!((key.name(), key.surname(), key.department()), expected);
    }

    #[rstest]
    fn equal_triples_share_a_record_key() {
        let a = NormalizedKey::from_raw("Ana ", "Pérez", "LIMA").record_key();
        let b = NormalizedKey::from_raw("ana", " pérez", "lima").record_key();
        assert_eq!(a, b);
    }

    #[rstest]
    fn inner_whitespace_is_significant() {
        let a = NormalizedKey::from_raw("ana maria", "x", "y").record_key();
        let b = NormalizedKey::from_raw("anamaria", "x", "y").record_key();
        assert_ne!(a, b);
    }

    #[rstest]
    fn component_boundaries_do_not_collide() {
        let a = NormalizedKey::from_raw("ab", "c", "d").record_key();
        let b = NormalizedKey::from_raw("a", "bc", "d").record_key();
        assert_ne!(a, b);
    }

    #[rstest]
    fn record_key_is_lowercase_hex_sha256() {
        let key = NormalizedKey::from_raw("a", "b", "c").record_key();
        assert_eq!(key.as_str().len(), 64);
        assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
