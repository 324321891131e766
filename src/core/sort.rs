//! Ordering of quote records by a selectable column

use std::cmp::Ordering;
use std::fmt::Display;
use tracing::debug;

use super::quote::QuoteRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortField {
    #[default]
    Symbol,
    Latest,
    Open,
    Close,
    Change,
    ChangePct,
    AsOf,
    Volume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

type Comparator = fn(&QuoteRecord, &QuoteRecord) -> Ordering;

const SORT_ALIASES: &[(&str, SortField)] = &[
    ("symbol", SortField::Symbol),
    ("sym", SortField::Symbol),
    ("s", SortField::Symbol),
    ("latest", SortField::Latest),
    ("l", SortField::Latest),
    ("open", SortField::Open),
    ("o", SortField::Open),
    ("op", SortField::Open),
    ("close", SortField::Close),
    ("c", SortField::Close),
    ("cl", SortField::Close),
    ("change", SortField::Change),
    ("chg", SortField::Change),
    ("ch", SortField::Change),
    ("changepct", SortField::ChangePct),
    ("chp", SortField::ChangePct),
    ("chgp", SortField::ChangePct),
    ("chgpct", SortField::ChangePct),
    ("pct", SortField::ChangePct),
    ("pctchg", SortField::ChangePct),
    ("pchg", SortField::ChangePct),
    ("%", SortField::ChangePct),
    ("time", SortField::AsOf),
    ("t", SortField::AsOf),
    ("asof", SortField::AsOf),
    ("volume", SortField::Volume),
    ("vol", SortField::Volume),
    ("v", SortField::Volume),
];

impl SortField {
    /// Looks up a column alias, case-insensitively.
    pub fn from_alias(alias: &str) -> Option<Self> {
        let alias = alias.to_lowercase();
        SORT_ALIASES
            .iter()
            .find(|(name, _)| *name == alias)
            .map(|(_, field)| *field)
    }

    fn comparator(self) -> Comparator {
        match self {
            SortField::Symbol => |a, b| a.symbol.cmp(&b.symbol),
            SortField::Latest => |a, b| a.latest.total_cmp(&b.latest),
            SortField::Open => |a, b| a.open.total_cmp(&b.open),
            SortField::Close => |a, b| a.close.total_cmp(&b.close),
            SortField::Change => |a, b| a.change.total_cmp(&b.change),
            SortField::ChangePct => |a, b| a.change_pct.total_cmp(&b.change_pct),
            SortField::AsOf => |a, b| a.as_of.cmp(&b.as_of),
            SortField::Volume => |a, b| a.volume.cmp(&b.volume),
        }
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SortField::Symbol => "symbol",
                SortField::Latest => "latest",
                SortField::Open => "open",
                SortField::Close => "close",
                SortField::Change => "change",
                SortField::ChangePct => "changepct",
                SortField::AsOf => "time",
                SortField::Volume => "volume",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        SortSpec { field, direction }
    }

    /// Parses `+field`, `-field` or `field`. Anything unrecognised sorts by
    /// symbol ascending.
    pub fn parse(spec: &str) -> Self {
        let spec = spec.trim();
        let (direction, name) = if let Some(rest) = spec.strip_prefix('-') {
            (SortDirection::Descending, rest)
        } else if let Some(rest) = spec.strip_prefix('+') {
            (SortDirection::Ascending, rest)
        } else {
            (SortDirection::Ascending, spec)
        };

        match SortField::from_alias(name) {
            Some(field) => SortSpec::new(field, direction),
            None => {
                debug!("Unknown sort column '{}', sorting by symbol", spec);
                SortSpec::default()
            }
        }
    }
}

impl Display for SortSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = match self.direction {
            SortDirection::Ascending => '+',
            SortDirection::Descending => '-',
        };
        write!(f, "{sign}{}", self.field)
    }
}

/// Stable ascending sort on the chosen column; descending is the exact
/// reverse of that order.
pub fn sort_quotes(mut records: Vec<QuoteRecord>, spec: SortSpec) -> Vec<QuoteRecord> {
    records.sort_by(spec.field.comparator());
    if spec.direction == SortDirection::Descending {
        records.reverse();
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(symbol: &str, latest: f64, change_pct: f64, volume: u64) -> QuoteRecord {
        QuoteRecord {
            symbol: symbol.to_string(),
            open: latest - 1.0,
            close: latest + 1.0,
            latest,
            change: change_pct * latest,
            change_pct,
            as_of: 1_700_000_000_000 + volume as i64,
            volume,
        }
    }

    fn symbols(records: &[QuoteRecord]) -> Vec<&str> {
        records.iter().map(|r| r.symbol.as_str()).collect()
    }

    fn sample() -> Vec<QuoteRecord> {
        vec![
            quote("MSFT", 370.0, -0.01, 20_000_000),
            quote("AAPL", 190.0, 0.02, 50_000_000),
            quote("IBM", 150.0, 0.10, 3_000_000),
            quote("GOOG", 135.0, 0.0, 25_000_000),
        ]
    }

    const ALL_FIELDS: [SortField; 8] = [
        SortField::Symbol,
        SortField::Latest,
        SortField::Open,
        SortField::Close,
        SortField::Change,
        SortField::ChangePct,
        SortField::AsOf,
        SortField::Volume,
    ];

    #[test]
    fn test_parse_sort_spec() {
        assert_eq!(
            SortSpec::parse("-changepct"),
            SortSpec::new(SortField::ChangePct, SortDirection::Descending)
        );
        assert_eq!(
            SortSpec::parse("+vol"),
            SortSpec::new(SortField::Volume, SortDirection::Ascending)
        );
        assert_eq!(
            SortSpec::parse("chg"),
            SortSpec::new(SortField::Change, SortDirection::Ascending)
        );
        assert_eq!(
            SortSpec::parse("-%"),
            SortSpec::new(SortField::ChangePct, SortDirection::Descending)
        );
        assert_eq!(
            SortSpec::parse("-ChangePct"),
            SortSpec::new(SortField::ChangePct, SortDirection::Descending)
        );
    }

    #[test]
    fn test_malformed_spec_defaults_to_symbol_ascending() {
        for spec in ["", "+", "-", "-bogus", "price", "--latest"] {
            assert_eq!(SortSpec::parse(spec), SortSpec::default(), "spec {spec:?}");
        }
    }

    #[test]
    fn test_sort_spec_display() {
        assert_eq!(SortSpec::parse("-chp").to_string(), "-changepct");
        assert_eq!(SortSpec::default().to_string(), "+symbol");
    }

    #[test]
    fn test_sort_by_symbol_and_numeric_fields() {
        let by_symbol = sort_quotes(sample(), SortSpec::parse("+symbol"));
        assert_eq!(symbols(&by_symbol), vec!["AAPL", "GOOG", "IBM", "MSFT"]);

        let by_pct = sort_quotes(sample(), SortSpec::parse("-changepct"));
        assert_eq!(symbols(&by_pct), vec!["IBM", "AAPL", "GOOG", "MSFT"]);

        let by_volume = sort_quotes(sample(), SortSpec::parse("v"));
        assert_eq!(symbols(&by_volume), vec!["IBM", "MSFT", "GOOG", "AAPL"]);
    }

    #[test]
    fn test_descending_is_reverse_of_ascending() {
        for field in ALL_FIELDS {
            let asc = sort_quotes(sample(), SortSpec::new(field, SortDirection::Ascending));
            let mut desc = sort_quotes(sample(), SortSpec::new(field, SortDirection::Descending));
            desc.reverse();
            assert_eq!(asc, desc, "field {field}");
        }
    }

    #[test]
    fn test_sort_is_idempotent() {
        for field in ALL_FIELDS {
            for direction in [SortDirection::Ascending, SortDirection::Descending] {
                let spec = SortSpec::new(field, direction);
                let once = sort_quotes(sample(), spec);
                let twice = sort_quotes(once.clone(), spec);
                assert_eq!(once, twice, "spec {spec}");
            }
        }
    }

    #[test]
    fn test_ties_keep_input_order_then_reverse() {
        let records = vec![
            quote("AAA", 10.0, 0.01, 100),
            quote("BBB", 10.0, 0.02, 200),
            quote("CCC", 5.0, 0.03, 300),
        ];
        let asc = sort_quotes(records.clone(), SortSpec::parse("+latest"));
        assert_eq!(symbols(&asc), vec!["CCC", "AAA", "BBB"]);

        let desc = sort_quotes(records, SortSpec::parse("-latest"));
        assert_eq!(symbols(&desc), vec!["BBB", "AAA", "CCC"]);
    }

    #[test]
    fn test_sort_empty_input() {
        assert!(sort_quotes(Vec::new(), SortSpec::parse("-latest")).is_empty());
    }
}
