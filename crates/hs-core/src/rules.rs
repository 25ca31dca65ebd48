//! Ordered keyword tables for interpreting free-text inputs.
//!
//! Users describe walls, airtightness, occupancy and orientation in their own
//! words. Each interpretation is an explicit table of `(keywords, value)` rows
//! evaluated against the lower-cased text, plus a terminal default. Keywords
//! are matched as substrings so that word roots ("герм", "insul") catch
//! inflected forms.
//!
//! Tables built with [`RuleTable::words`] anchor keywords to word starts
//! instead: a keyword must begin a word, and an ASCII keyword must also end
//! one, so "old" does not fire inside "cold" while the Cyrillic stem "стар"
//! still catches "старый".
//!
//! Two evaluation modes exist:
//! - [`RuleTable::first_match`]: rows are tried in declaration order, the first
//!   hit wins, otherwise the default.
//! - [`RuleTable::accumulate`]: the default is a base value and every matching
//!   row adds its value.

/// Trim and lower-case text before matching.
pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// One row of a keyword table.
#[derive(Debug, Clone, Copy)]
pub struct TextRule<T: 'static> {
    /// Lower-case substrings; any one of them selects the row.
    pub keywords: &'static [&'static str],
    pub value: T,
}

impl<T> TextRule<T> {
    /// `normalized` must already be lower-case.
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|k| normalized.contains(k))
    }

    /// Word-anchored variant of [`TextRule::matches`].
    pub fn matches_words(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|k| contains_word(normalized, k))
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// `keyword` starting at a word boundary of `text`; ASCII keywords must
/// also end at one.
pub fn contains_word(text: &str, keyword: &str) -> bool {
    if keyword.is_empty() {
        return false;
    }
    let whole = keyword.is_ascii();
    text.match_indices(keyword).any(|(start, _)| {
        let before_ok = !text[..start].chars().next_back().is_some_and(is_word_char);
        let after_ok =
            !whole || !text[start + keyword.len()..].chars().next().is_some_and(is_word_char);
        before_ok && after_ok
    })
}

/// Ordered rule rows with a terminal default.
#[derive(Debug, Clone, Copy)]
pub struct RuleTable<T: 'static> {
    pub rules: &'static [TextRule<T>],
    pub default: T,
    /// Keywords are anchored to word boundaries.
    pub words: bool,
}

impl<T: Copy> RuleTable<T> {
    pub const fn new(rules: &'static [TextRule<T>], default: T) -> Self {
        Self {
            rules,
            default,
            words: false,
        }
    }

    /// Table whose keywords match at word boundaries.
    pub const fn words(rules: &'static [TextRule<T>], default: T) -> Self {
        Self {
            rules,
            default,
            words: true,
        }
    }

    fn row_matches(&self, rule: &TextRule<T>, normalized: &str) -> bool {
        if self.words {
            rule.matches_words(normalized)
        } else {
            rule.matches(normalized)
        }
    }

    /// First matching row, if any.
    pub fn find(&self, text: &str) -> Option<&'static TextRule<T>> {
        let normalized = normalize_text(text);
        if normalized.is_empty() {
            return None;
        }
        self.rules.iter().find(|rule| self.row_matches(rule, &normalized))
    }

    /// Value of the first matching row, or the default.
    pub fn first_match(&self, text: &str) -> T {
        self.find(text).map(|rule| rule.value).unwrap_or(self.default)
    }

    /// Every matching row in declaration order.
    pub fn matching(&self, text: &str) -> impl Iterator<Item = &'static TextRule<T>> {
        let normalized = normalize_text(text);
        let table = *self;
        table
            .rules
            .iter()
            .filter(move |rule| !normalized.is_empty() && table.row_matches(rule, &normalized))
    }
}

impl RuleTable<f64> {
    /// Default plus the values of all matching rows.
    pub fn accumulate(&self, text: &str) -> f64 {
        self.default + self.matching(text).map(|rule| rule.value).sum::<f64>()
    }
}
