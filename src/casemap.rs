//! IRC case mapping.
//!
//! Nicknames and channel names are case-insensitive under a mapping that
//! treats a handful of non-alphabetic characters as the upper/lower pair of
//! `{`/`[`, `}`/`]`, `|`/`\` and, for the non-strict RFC1459 variant, `^`/`~`.
//! The mapping in effect is advertised by the server's `CASEMAPPING` token in
//! `RPL_ISUPPORT` (§4.6) and defaults to `rfc1459`.

/// One of the three case-mapping schemes advertised by `CASEMAPPING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CaseMapping {
    /// Only `A-Z`/`a-z` are folded; `[]{}\|^~` are left alone.
    Ascii,
    /// `A-Z` plus `[]\~` fold to `{}|^`.
    #[default]
    Rfc1459,
    /// `A-Z` plus `[]\` fold to `{}|`; `~`/`^` are *not* paired (stricter).
    Rfc1459Strict,
}

impl CaseMapping {
    /// Parse the `CASEMAPPING` token value, defaulting to `rfc1459` for
    /// anything unrecognised (matching the server's own fallback).
    pub fn parse(value: &str) -> CaseMapping {
        match value {
            "ascii" => CaseMapping::Ascii,
            "rfc1459-strict" => CaseMapping::Rfc1459Strict,
            _ => CaseMapping::Rfc1459,
        }
    }

    fn fold_char(self, c: char) -> char {
        match (self, c) {
            (CaseMapping::Ascii, 'A'..='Z') => c.to_ascii_lowercase(),
            (CaseMapping::Rfc1459, '[') => '{',
            (CaseMapping::Rfc1459, ']') => '}',
            (CaseMapping::Rfc1459, '\\') => '|',
            (CaseMapping::Rfc1459, '~') => '^',
            (CaseMapping::Rfc1459Strict, '[') => '{',
            (CaseMapping::Rfc1459Strict, ']') => '}',
            (CaseMapping::Rfc1459Strict, '\\') => '|',
            (_, 'A'..='Z') => c.to_ascii_lowercase(),
            _ => c,
        }
    }

    /// Fold a string to its lower-case representative under this mapping.
    pub fn to_lower(self, s: &str) -> String {
        s.chars().map(|c| self.fold_char(c)).collect()
    }

    /// Compare two strings for equality under this mapping, without
    /// allocating.
    pub fn eq(self, a: &str, b: &str) -> bool {
        if a.chars().count() != b.chars().count() {
            return false;
        }
        a.chars()
            .zip(b.chars())
            .all(|(ca, cb)| self.fold_char(ca) == self.fold_char(cb))
    }
}
