pub mod engine;
pub mod normalize;
pub mod outcome;
pub mod pattern;

pub use engine::{match_page, match_page_text, match_pages, MatchOptions};
pub use outcome::{PageMatchResult, ParseOutcome, Report};
pub use pattern::{build_patterns, PatternTable, RosterEntry, SearchPattern};
