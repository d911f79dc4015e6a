use crate::matching::normalize::{fold_case, name_tokens};
use crate::model::Roster;
use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A roster entry that qualifies for matching: non-empty roster number and
/// at least two name tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub full_name: String,
    pub roster_number: String,
    pub name_tokens: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenOrder {
    Forward,
    Reverse,
}

/// Whitespace-tolerant, case-insensitive token-sequence matcher.
///
/// Operates on case-folded text (see [`fold_case`]).
#[derive(Debug, Clone)]
pub struct SearchPattern {
    order: TokenOrder,
    regex: Regex,
}

impl SearchPattern {
    fn build(tokens: &[String], order: TokenOrder) -> Result<Self, regex::Error> {
        let escaped: Vec<String> = tokens
            .iter()
            .map(|t| regex::escape(&fold_case(t)))
            .collect();
        let joined = match order {
            TokenOrder::Forward => escaped.join(r"\s*"),
            TokenOrder::Reverse => {
                let mut reversed = escaped;
                reversed.reverse();
                reversed.join(r"\s*")
            }
        };
        Ok(SearchPattern {
            order,
            regex: Regex::new(&joined)?,
        })
    }

    pub fn order(&self) -> TokenOrder {
        self.order
    }

    /// Regex source, for diagnostics.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Byte range of the leftmost match in already-folded text.
    pub fn find(&self, folded_text: &str) -> Option<Range<usize>> {
        self.regex.find(folded_text).map(|m| m.range())
    }
}

/// The forward/reverse pattern pair for one roster entry.
#[derive(Debug, Clone)]
pub struct PatternSet {
    pub entry: RosterEntry,
    pub forward: SearchPattern,
    pub reverse: SearchPattern,
}

impl PatternSet {
    /// Patterns in evaluation order: forward first, then reverse.
    pub fn patterns(&self) -> [&SearchPattern; 2] {
        [&self.forward, &self.reverse]
    }
}

/// Pattern sets for every qualifying roster entry, in roster order.
#[derive(Debug, Clone, Default)]
pub struct PatternTable {
    sets: Vec<PatternSet>,
}

impl PatternTable {
    pub fn iter(&self) -> impl Iterator<Item = &PatternSet> {
        self.sets.iter()
    }

    pub fn get(&self, full_name: &str) -> Option<&PatternSet> {
        self.sets.iter().find(|s| s.entry.full_name == full_name)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Full names of all entries, in roster order.
    pub fn full_names(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().map(|s| s.entry.full_name.as_str())
    }
}

/// Turn a roster record into a matchable entry, or `None` if it does not
/// qualify.
pub fn prepare_entry(full_name: &str, roster_number: &str) -> Option<RosterEntry> {
    let roster_number = roster_number.trim();
    let tokens = name_tokens(full_name);

    if roster_number.is_empty() || tokens.len() < 2 {
        return None;
    }

    Some(RosterEntry {
        full_name: full_name.to_string(),
        roster_number: roster_number.to_string(),
        name_tokens: tokens,
    })
}

/// Build the pattern table for a roster.
///
/// Entries without a roster number or with fewer than two name tokens are
/// dropped silently; they can never be matched and are never reported as
/// missing.
pub fn build_patterns(roster: &Roster) -> PatternTable {
    let mut sets = Vec::with_capacity(roster.len());

    for record in roster.iter() {
        let Some(entry) = prepare_entry(&record.full_name, &record.roster_number) else {
            debug!(
                "skipping '{}': needs a roster number and at least 2 name parts",
                record.full_name
            );
            continue;
        };

        let built = SearchPattern::build(&entry.name_tokens, TokenOrder::Forward).and_then(
            |forward| {
                SearchPattern::build(&entry.name_tokens, TokenOrder::Reverse)
                    .map(|reverse| (forward, reverse))
            },
        );

        match built {
            Ok((forward, reverse)) => sets.push(PatternSet {
                entry,
                forward,
                reverse,
            }),
            Err(e) => warn!("skipping '{}': cannot build pattern: {e}", entry.full_name),
        }
    }

    debug!(
        "built patterns for {} of {} roster entries",
        sets.len(),
        roster.len()
    );

    PatternTable { sets }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(pairs: &[(&str, &str)]) -> Roster {
        pairs.iter().copied().collect()
    }

    #[test]
    fn builds_two_patterns_per_entry() {
        let table = build_patterns(&roster(&[("Ali Veli", "5")]));
        assert_eq!(table.len(), 1);
        let set = table.get("Ali Veli").unwrap();
        assert_eq!(set.forward.order(), TokenOrder::Forward);
        assert_eq!(set.reverse.order(), TokenOrder::Reverse);
        assert_eq!(set.forward.as_str(), r"ALI\s*VELI");
        assert_eq!(set.reverse.as_str(), r"VELI\s*ALI");
    }

    #[test]
    fn drops_single_token_names() {
        let table = build_patterns(&roster(&[("Deniz", "7"), ("Ali Veli", "5")]));
        assert_eq!(table.len(), 1);
        assert!(table.get("Deniz").is_none());
    }

    #[test]
    fn drops_blank_roster_numbers() {
        let table = build_patterns(&roster(&[("Ali Veli", ""), ("Can Öz", "   ")]));
        assert!(table.is_empty());
    }

    #[test]
    fn every_entry_qualifies() {
        let table = build_patterns(&roster(&[
            ("Ali Veli", "5"),
            ("Deniz", "6"),
            ("  Ayşe   Nur Yılmaz ", "7"),
            ("Can Öz", ""),
        ]));
        for set in table.iter() {
            assert!(set.entry.name_tokens.len() >= 2);
            assert!(!set.entry.roster_number.is_empty());
        }
        let names: Vec<&str> = table.full_names().collect();
        assert_eq!(names, vec!["Ali Veli", "  Ayşe   Nur Yılmaz "]);
    }

    #[test]
    fn tokens_are_matched_literally() {
        let table = build_patterns(&roster(&[("A.B. Kaya", "1")]));
        let set = table.get("A.B. Kaya").unwrap();
        assert!(set.forward.find(&fold_case("a.b. kaya")).is_some());
        assert!(set.forward.find(&fold_case("axbx kaya")).is_none());
    }

    #[test]
    fn whitespace_between_tokens_is_optional() {
        let table = build_patterns(&roster(&[("Ali Veli", "5")]));
        let set = table.get("Ali Veli").unwrap();
        assert!(set.forward.find(&fold_case("aliveli")).is_some());
        assert!(set.forward.find(&fold_case("ali \n\t veli")).is_some());
        assert!(set.forward.find(&fold_case("ali x veli")).is_none());
    }
}
