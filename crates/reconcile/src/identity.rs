//! Name-based identity carry-forward
//!
//! Declared configuration does not carry server-assigned identifiers
//! across edits; the previous state does. Matching declared records to
//! previous ones by name keeps identifiers stable so the remote system
//! updates children in place instead of recreating them.

/// A child record with a name and an optional server-assigned id.
///
/// Implemented by rule and channel records. Names act as the natural
/// key: they should be unique within one parent (callers validate
/// this); when they are not, the first previous match wins.
pub trait Identified {
    /// The natural key used for matching. Case-sensitive.
    fn name(&self) -> &str;

    /// Server-assigned identifier, if one has been observed.
    fn id(&self) -> Option<i64>;

    /// Replace the identifier.
    fn set_id(&mut self, id: Option<i64>);
}

/// Copy identifiers from `previous` onto `declared`, matching by name.
///
/// For each declared record the first previous record with an exactly
/// equal name contributes its id. Declared records without a match are
/// left without an id, which signals "new record" downstream. Absence
/// of a match is a normal outcome, never an error.
pub fn carry_ids<T: Identified>(declared: &mut [T], previous: &[T]) {
    for record in declared {
        if let Some(prev) = previous.iter().find(|p| p.name() == record.name()) {
            record.set_id(prev.id());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Rec {
        name: String,
        id: Option<i64>,
    }

    impl Rec {
        fn new(name: &str, id: Option<i64>) -> Self {
            Self {
                name: name.to_string(),
                id,
            }
        }
    }

    impl Identified for Rec {
        fn name(&self) -> &str {
            &self.name
        }

        fn id(&self) -> Option<i64> {
            self.id
        }

        fn set_id(&mut self, id: Option<i64>) {
            self.id = id;
        }
    }

    #[test]
    fn test_carry_id_on_name_match() {
        let mut declared = vec![Rec::new("x", None)];
        let previous = vec![Rec::new("x", Some(7))];
        carry_ids(&mut declared, &previous);
        assert_eq!(declared[0].id, Some(7));
    }

    #[test]
    fn test_no_match_keeps_no_id() {
        let mut declared = vec![Rec::new("x", None)];
        let previous = vec![Rec::new("y", Some(7))];
        carry_ids(&mut declared, &previous);
        assert_eq!(declared[0].id, None);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let mut declared = vec![Rec::new("Alerts", None)];
        let previous = vec![Rec::new("alerts", Some(3))];
        carry_ids(&mut declared, &previous);
        assert_eq!(declared[0].id, None);
    }

    #[test]
    fn test_duplicate_previous_names_first_match_wins() {
        // Duplicate names are rejected by manifest validation, but when
        // they slip through the tie-break must stay deterministic.
        let mut declared = vec![Rec::new("x", None)];
        let previous = vec![Rec::new("x", Some(1)), Rec::new("x", Some(2))];
        carry_ids(&mut declared, &previous);
        assert_eq!(declared[0].id, Some(1));
    }

    #[test]
    fn test_mixed_lists() {
        let mut declared = vec![
            Rec::new("kept", None),
            Rec::new("new", None),
            Rec::new("renamed", None),
        ];
        let previous = vec![Rec::new("kept", Some(10)), Rec::new("old-name", Some(11))];
        carry_ids(&mut declared, &previous);
        assert_eq!(declared[0].id, Some(10));
        assert_eq!(declared[1].id, None);
        assert_eq!(declared[2].id, None);
    }

    #[test]
    fn test_empty_previous_is_noop() {
        let mut declared = vec![Rec::new("x", None)];
        carry_ids(&mut declared, &[]);
        assert_eq!(declared[0].id, None);
    }
}
