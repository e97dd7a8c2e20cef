use std::fmt;
use std::str::FromStr;

use buscacar_core::VehicleRecord;

use super::QueryError;

/// Result orderings offered by the search page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Keep the incoming order.
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    YearDesc,
    MileageAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Relevance,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::YearDesc,
        SortKey::MileageAsc,
    ];

    /// The name used in query strings, e.g. `price-asc`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::YearDesc => "year-desc",
            SortKey::MileageAsc => "mileage-asc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| QueryError::UnknownSortKey(s.to_owned()))
    }
}

/// Sorts in place. The sort is stable, so ties keep their incoming order.
pub fn sort(records: &mut [&VehicleRecord], key: SortKey) {
    match key {
        SortKey::Relevance => {}
        SortKey::PriceAsc => records.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDesc => records.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::YearDesc => records.sort_by(|a, b| b.year.cmp(&a.year)),
        SortKey::MileageAsc => records.sort_by_key(|r| r.mileage),
    }
}

#[cfg(test)]
mod tests {
    use crate::query::test_support::vehicle;

    use super::*;

    fn fixture() -> Vec<VehicleRecord> {
        let mut a = vehicle("a", "Fiat", "Uno", 2015, 30_000);
        a.mileage = 90_000;
        let mut b = vehicle("b", "Fiat", "Argo", 2020, 70_000);
        b.mileage = 20_000;
        let mut c = vehicle("c", "Fiat", "Mobi", 2020, 30_000);
        c.mileage = 20_000;
        vec![a, b, c]
    }

    fn sorted_ids(key: SortKey) -> Vec<String> {
        let records = fixture();
        let mut refs: Vec<&VehicleRecord> = records.iter().collect();
        sort(&mut refs, key);
        refs.iter().map(|v| v.id.clone()).collect()
    }

    #[test]
    fn relevance_keeps_order() {
        assert_eq!(sorted_ids(SortKey::Relevance), vec!["a", "b", "c"]);
    }

    #[test]
    fn price_ascending_is_stable() {
        assert_eq!(sorted_ids(SortKey::PriceAsc), vec!["a", "c", "b"]);
    }

    #[test]
    fn price_descending_is_stable() {
        assert_eq!(sorted_ids(SortKey::PriceDesc), vec!["b", "a", "c"]);
    }

    #[test]
    fn year_descending_is_stable() {
        assert_eq!(sorted_ids(SortKey::YearDesc), vec!["b", "c", "a"]);
    }

    #[test]
    fn mileage_ascending_is_stable() {
        assert_eq!(sorted_ids(SortKey::MileageAsc), vec!["b", "c", "a"]);
    }

    #[test]
    fn parses_wire_names() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().ok(), Some(key));
        }
        assert_eq!("Price-Desc".parse::<SortKey>().ok(), Some(SortKey::PriceDesc));
    }

    #[test]
    fn unknown_sort_key_is_an_error() {
        let err = "cheapest".parse::<SortKey>().unwrap_err();
        assert!(matches!(err, QueryError::UnknownSortKey(ref key) if key == "cheapest"));
    }
}
