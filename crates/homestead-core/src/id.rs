use core::fmt;
use core::str::FromStr;

use uuid::Uuid;

use crate::Error;

/// Opaque key assigned to a request when it is first saved.
///
/// Backed by a randomly generated 128-bit UUID (version 4). An id is
/// minted exactly once, at save time, and never reused; every later
/// lookup goes through the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Mints a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Filename under which the record for this id is stored.
    pub fn file_name(&self) -> String {
        format!("{self}.json")
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for RequestId {
    type Err = Error;

    /// Accepts only the full canonical hyphenated form.
    ///
    /// Anything else is rejected as [`Error::MalformedId`], including
    /// an otherwise valid id with trailing characters and the compact
    /// un-hyphenated UUID spelling. Callers can therefore parse first
    /// and only touch storage with ids that could actually exist.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The canonical hyphenated form is exactly 36 bytes. `Uuid`
        // parsing alone also admits the braced, simple, and URN forms.
        if s.len() != 36 {
            return Err(Error::MalformedId { input: s.to_owned() });
        }
        let uuid = Uuid::try_parse(s).map_err(|_| Error::MalformedId { input: s.to_owned() })?;
        Ok(Self(uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_display() {
        let id = RequestId::generate();
        let parsed: RequestId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn generate_mints_distinct_ids() {
        assert_ne!(RequestId::generate(), RequestId::generate());
    }

    #[test]
    fn rejects_non_canonical_shapes() {
        let id = RequestId::generate().to_string();
        let malformed = [
            String::new(),
            format!("{id}abc"),
            format!(" {id}"),
            id.replace('-', ""),
            format!("{{{id}}}"),
            "not-an-id".to_owned(),
        ];
        for input in malformed {
            assert!(
                matches!(
                    input.parse::<RequestId>(),
                    Err(Error::MalformedId { input: ref got }) if *got == input
                ),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn file_name_appends_json_extension() {
        let id = RequestId::generate();
        assert_eq!(id.file_name(), format!("{id}.json"));
    }
}
