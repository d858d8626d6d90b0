// SPDX-License-Identifier: MPL-2.0
//! Parser for the `metadata.txt` sidecar that describes a submission.
//!
//! The format is deliberately loose: one `key: value` pair per line, no
//! schema, no escaping. Anything that does not look like a pair is skipped.
//!
//! ```
//! use iced_gallery::gallery::metadata;
//!
//! let meta = metadata::parse("title: Still Life\nartist: \"Jane Doe\"\n");
//! assert_eq!(meta.title(), Some("Still Life"));
//! assert_eq!(meta.artist(), Some("Jane Doe"));
//! assert_eq!(meta.get(metadata::EMAIL), Some("janedoe@example.com"));
//! ```

use std::collections::BTreeMap;

pub const TITLE: &str = "title";
pub const ARTIST: &str = "artist";
pub const MEDIUM: &str = "medium";
pub const DESCRIPTION: &str = "description";
pub const COPYRIGHT: &str = "copyright";
pub const LEARN: &str = "learn";
pub const WEBSITE: &str = "website";
pub const DIMENSIONS: &str = "dimensions";
pub const DATE_SUBMITTED: &str = "date_submitted";
pub const WRITING: &str = "writing";
/// Synthesized after parsing; never read from the file.
pub const EMAIL: &str = "email";

/// Domain used for the synthesized display address.
const EMAIL_DOMAIN: &str = "example.com";

/// Display name used when the artist is missing.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Display title used when the title is missing.
pub const UNTITLED: &str = "Untitled";

/// Raw key/value pairs of one metadata file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: BTreeMap<String, String>,
}

impl Metadata {
    /// Parses the raw pairs without synthesizing derived fields.
    #[must_use]
    pub fn parse_raw(text: &str) -> Self {
        let mut entries = BTreeMap::new();

        for line in text.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let Some(colon) = line.find(':') else {
                continue;
            };
            if colon == 0 {
                continue;
            }

            let key = line[..colon].trim();
            if key.is_empty() {
                continue;
            }
            let value = strip_quotes(line[colon + 1..].trim());
            entries.insert(key.to_string(), value.to_string());
        }

        Self { entries }
    }

    /// Returns the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the value under `key` only when it is not empty.
    #[must_use]
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.non_empty(TITLE)
    }

    #[must_use]
    pub fn artist(&self) -> Option<&str> {
        self.non_empty(ARTIST)
    }

    #[must_use]
    pub fn medium(&self) -> Option<&str> {
        self.non_empty(MEDIUM)
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.non_empty(DESCRIPTION)
    }

    #[must_use]
    pub fn copyright(&self) -> Option<&str> {
        self.non_empty(COPYRIGHT)
    }

    #[must_use]
    pub fn learn(&self) -> Option<&str> {
        self.non_empty(LEARN)
    }

    #[must_use]
    pub fn website(&self) -> Option<&str> {
        self.non_empty(WEBSITE)
    }

    #[must_use]
    pub fn dimensions(&self) -> Option<&str> {
        self.non_empty(DIMENSIONS)
    }

    #[must_use]
    pub fn date_submitted(&self) -> Option<&str> {
        self.non_empty(DATE_SUBMITTED)
    }

    #[must_use]
    pub fn writing(&self) -> Option<&str> {
        self.non_empty(WRITING)
    }

    /// The synthesized contact address; `None` for raw parses.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.non_empty(EMAIL)
    }
}

/// Parses metadata text and adds the synthesized `email` field.
#[must_use]
pub fn parse(text: &str) -> Metadata {
    let mut metadata = Metadata::parse_raw(text);
    let email = derive_email(metadata.artist().unwrap_or(UNKNOWN_ARTIST));
    metadata.insert(EMAIL, email);
    metadata
}

/// Builds the display-only address from an artist name.
#[must_use]
pub fn derive_email(artist: &str) -> String {
    let local: String = artist
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    format!("{local}@{EMAIL_DOMAIN}")
}

/// Removes one leading and one trailing quote character.
///
/// The two ends are handled independently, so an unbalanced quote is
/// dropped as well.
fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix(['"', '\'']).unwrap_or(value);
    value.strip_suffix(['"', '\'']).unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_simple_pairs() {
        let meta = Metadata::parse_raw("title: Still Life\nartist: Jane Doe\nmedium: image");
        assert_eq!(meta.get("title"), Some("Still Life"));
        assert_eq!(meta.get("artist"), Some("Jane Doe"));
        assert_eq!(meta.get("medium"), Some("image"));
        assert_eq!(meta.len(), 3);
    }

    #[test]
    fn value_keeps_everything_after_first_colon() {
        let meta = Metadata::parse_raw("learn: https://example.org/a:b");
        assert_eq!(meta.learn(), Some("https://example.org/a:b"));
    }

    #[test]
    fn ignores_lines_without_colon_or_leading_colon() {
        let meta = Metadata::parse_raw("just words\n: orphan value\n\ntitle: Ok");
        assert_eq!(meta.len(), 1);
        assert_eq!(meta.title(), Some("Ok"));
    }

    #[test]
    fn ignores_whitespace_only_keys() {
        let meta = Metadata::parse_raw("   : value");
        assert!(meta.is_empty());
    }

    #[test]
    fn strips_one_layer_of_quotes() {
        let meta = Metadata::parse_raw("title: \"Quoted\"\nartist: '\"Nested\"'");
        assert_eq!(meta.title(), Some("Quoted"));
        assert_eq!(meta.artist(), Some("\"Nested\""));
    }

    #[test]
    fn strips_unbalanced_quote() {
        let meta = Metadata::parse_raw("title: \"Open ended");
        assert_eq!(meta.title(), Some("Open ended"));
    }

    #[test]
    fn later_duplicate_keys_win() {
        let meta = Metadata::parse_raw("title: First\ntitle: Second");
        assert_eq!(meta.title(), Some("Second"));
    }

    #[test]
    fn handles_crlf_line_endings() {
        let meta = Metadata::parse_raw("title: Windows\r\nartist: Someone\r\n");
        assert_eq!(meta.title(), Some("Windows"));
        assert_eq!(meta.artist(), Some("Someone"));
    }

    #[test]
    fn unknown_keys_pass_through() {
        let meta = Metadata::parse_raw("palette: warm");
        assert_eq!(meta.get("palette"), Some("warm"));
    }

    #[test]
    fn empty_values_are_not_reported_by_accessors() {
        let meta = Metadata::parse_raw("title:\nartist:   ");
        assert_eq!(meta.get("title"), Some(""));
        assert_eq!(meta.title(), None);
        assert_eq!(meta.artist(), None);
    }

    #[test]
    fn parse_synthesizes_email_from_artist() {
        let meta = parse("artist: Jane  Van Doe");
        assert_eq!(meta.get(EMAIL), Some("janevandoe@example.com"));
    }

    #[test]
    fn parse_synthesizes_email_without_artist() {
        let meta = parse("title: Lonely");
        assert_eq!(meta.get(EMAIL), Some("unknownartist@example.com"));
    }

    #[test]
    fn email_in_file_is_overwritten() {
        let meta = parse("artist: Ana\nemail: real@person.org");
        assert_eq!(meta.get(EMAIL), Some("ana@example.com"));
    }

    proptest! {
        #[test]
        fn well_formed_line_round_trips(
            key in "[a-z_]{1,12}",
            value in "[A-Za-z0-9 .,!-]{0,40}",
        ) {
            let line = format!("  {key} :  \"{value}\"  ");
            let meta = Metadata::parse_raw(&line);
            prop_assert_eq!(meta.get(&key), Some(value.as_str()));
        }

        #[test]
        fn lines_without_colon_contribute_nothing(line in "[^:\n]{0,60}") {
            prop_assert!(Metadata::parse_raw(&line).is_empty());
        }

        #[test]
        fn leading_colon_contributes_nothing(rest in "[^\n]{0,60}") {
            let line = format!(":{rest}");
            prop_assert!(Metadata::parse_raw(&line).is_empty());
        }
    }
}
