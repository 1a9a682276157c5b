use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashMap;

use crate::config::settings::ColumnSettings;

/// One imported row, keyed by column header.
pub type RawRow = HashMap<String, String>;

/// Lenient cell parsing for imported rows
pub struct CellParser {
    leading_int_regex: Regex,
}

impl CellParser {
    pub fn new() -> Result<Self> {
        let leading_int_regex = Self::compile_regex()?;
        Ok(Self { leading_int_regex })
    }

    /// Reads the integer at the start of a cell, ignoring whatever follows it,
    /// so "3." and "3 (Pool A)" both read as 3.
    pub fn leading_int(&self, value: &str) -> Option<i64> {
        self.leading_int_regex
            .captures(value)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    /// Normalizes a birth year for new roster entries.
    ///
    /// Four-digit years 1900..=2099 are kept, two-digit years 0..=30 map to
    /// 2000+ and 31..=99 to 1900+. Anything else is rejected.
    pub fn normalized_birth_year(&self, value: &str) -> Option<i32> {
        let year = self.leading_int(value)?;
        match year {
            1900..=2099 => Some(year as i32),
            0..=30 => Some(2000 + year as i32),
            31..=99 => Some(1900 + year as i32),
            _ => None,
        }
    }

    // --- Construction Helpers ---

    fn compile_regex() -> Result<Regex> {
        Regex::new(r"^\s*([+-]?\d+)").context("Failed to compile leading integer regex")
    }
}

/// Typed access to the configured columns of a row.
pub struct RowFields<'a> {
    row: &'a RawRow,
    columns: &'a ColumnSettings,
    parser: &'a CellParser,
}

impl<'a> RowFields<'a> {
    pub fn new(row: &'a RawRow, columns: &'a ColumnSettings, parser: &'a CellParser) -> Self {
        Self { row, columns, parser }
    }

    /// Raw placement cell, preferring the primary column over its synonym.
    pub fn placement(&self) -> Option<&'a str> {
        self.cell(&self.columns.placement)
            .or_else(|| self.cell(&self.columns.placement_alt))
    }

    pub fn placement_value(&self) -> Option<i64> {
        self.placement().and_then(|raw| self.parser.leading_int(raw))
    }

    /// First and last name, or `None` when no name token is present.
    pub fn name(&self) -> Option<(String, String)> {
        if let (Some(first), Some(last)) = (
            self.cell(&self.columns.first_name),
            self.cell(&self.columns.last_name),
        ) {
            return Some((first.to_string(), last.to_string()));
        }

        let combined = self.cell(&self.columns.full_name)?;
        let mut tokens = combined.split_whitespace();
        let head = tokens.next()?;
        let rest: Vec<&str> = tokens.collect();

        if rest.is_empty() {
            Some((String::new(), head.to_string()))
        } else {
            Some((head.to_string(), rest.join(" ")))
        }
    }

    /// Birth year as written, without range normalization.
    pub fn birth_year(&self) -> Option<i32> {
        self.cell(&self.columns.birth_year)
            .and_then(|raw| self.parser.leading_int(raw))
            .and_then(|year| i32::try_from(year).ok())
    }

    pub fn club(&self) -> Option<String> {
        self.cell(&self.columns.club).map(str::to_string)
    }

    pub fn gender(&self) -> Option<String> {
        self.cell(&self.columns.gender).map(str::to_string)
    }

    /// Trimmed cell value, `None` when missing or blank.
    fn cell(&self, column: &str) -> Option<&'a str> {
        self.row
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_leading_int() {
        let parser = CellParser::new().unwrap();
        assert_eq!(parser.leading_int("3"), Some(3));
        assert_eq!(parser.leading_int(" 5. Platz"), Some(5));
        assert_eq!(parser.leading_int("-2"), Some(-2));
        assert_eq!(parser.leading_int("Platz 3"), None);
        assert_eq!(parser.leading_int(""), None);
    }

    #[test]
    fn test_normalized_birth_year_expands_two_digits() {
        let parser = CellParser::new().unwrap();
        assert_eq!(parser.normalized_birth_year("2010"), Some(2010));
        assert_eq!(parser.normalized_birth_year("09"), Some(2009));
        assert_eq!(parser.normalized_birth_year("30"), Some(2030));
        assert_eq!(parser.normalized_birth_year("87"), Some(1987));
        assert_eq!(parser.normalized_birth_year("1850"), None);
        assert_eq!(parser.normalized_birth_year("abc"), None);
    }

    #[test]
    fn test_separate_name_fields_win() {
        let (columns, parser) = (ColumnSettings::default(), CellParser::new().unwrap());
        let row = row(&[("Vorname", " Anna "), ("Nachname", "Muster"), ("Name", "Ignored Name")]);
        let fields = RowFields::new(&row, &columns, &parser);
        assert_eq!(fields.name(), Some(("Anna".to_string(), "Muster".to_string())));
    }

    #[test]
    fn test_combined_name_splits_on_first_token() {
        let (columns, parser) = (ColumnSettings::default(), CellParser::new().unwrap());
        let row = row(&[("Name", "Anna  von   Berg")]);
        let fields = RowFields::new(&row, &columns, &parser);
        assert_eq!(fields.name(), Some(("Anna".to_string(), "von Berg".to_string())));
    }

    #[test]
    fn test_single_token_is_last_name() {
        let (columns, parser) = (ColumnSettings::default(), CellParser::new().unwrap());
        let row = row(&[("Vorname", "Anna"), ("Name", "Muster")]);
        let fields = RowFields::new(&row, &columns, &parser);
        assert_eq!(fields.name(), Some((String::new(), "Muster".to_string())));
    }

    #[test]
    fn test_blank_name_cells_yield_nothing() {
        let (columns, parser) = (ColumnSettings::default(), CellParser::new().unwrap());
        let row = row(&[("Vorname", "  "), ("Name", "   ")]);
        let fields = RowFields::new(&row, &columns, &parser);
        assert_eq!(fields.name(), None);
    }

    #[test]
    fn test_placement_falls_back_to_synonym() {
        let (columns, parser) = (ColumnSettings::default(), CellParser::new().unwrap());
        let row = row(&[("Platz", " "), ("Platzierung", "2.")]);
        let fields = RowFields::new(&row, &columns, &parser);
        assert_eq!(fields.placement(), Some("2."));
        assert_eq!(fields.placement_value(), Some(2));
    }

    #[test]
    fn test_birth_year_is_not_normalized_for_matching() {
        let (columns, parser) = (ColumnSettings::default(), CellParser::new().unwrap());
        let row = row(&[("Jahrgang", "10")]);
        let fields = RowFields::new(&row, &columns, &parser);
        assert_eq!(fields.birth_year(), Some(10));
    }
}
