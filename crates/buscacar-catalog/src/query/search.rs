use buscacar_core::VehicleRecord;

/// Free-text search over brand, model and year.
///
/// The query is lower-cased and split on whitespace; a record matches when its
/// `"{brand} {model} {year}"` text contains every word. An empty or
/// whitespace-only query matches every record.
#[must_use]
pub fn search<'a>(records: &'a [VehicleRecord], query: &str) -> Vec<&'a VehicleRecord> {
    let lowered = query.trim().to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    if words.is_empty() {
        return records.iter().collect();
    }

    records
        .iter()
        .filter(|record| {
            let haystack = record.search_text();
            words.iter().all(|word| haystack.contains(word))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::query::test_support::vehicle;

    use super::*;

    fn fixture() -> Vec<VehicleRecord> {
        vec![
            vehicle("1", "Toyota", "Corolla", 2023, 118_900),
            vehicle("2", "Toyota", "Hilux", 2021, 189_900),
            vehicle("3", "Fiat", "Strada", 2022, 98_000),
        ]
    }

    fn ids(found: &[&VehicleRecord]) -> Vec<String> {
        found.iter().map(|v| v.id.clone()).collect()
    }

    #[test]
    fn every_word_must_match() {
        let records = fixture();
        assert_eq!(ids(&search(&records, "toyota 2023")), vec!["1"]);
        assert!(search(&records, "toyota strada").is_empty());
    }

    #[test]
    fn matching_ignores_case_and_word_order() {
        let records = fixture();
        assert_eq!(ids(&search(&records, "COROLLA toyota")), vec!["1"]);
    }

    #[test]
    fn words_match_as_substrings() {
        let records = fixture();
        assert_eq!(ids(&search(&records, "toy")), vec!["1", "2"]);
        assert_eq!(ids(&search(&records, "202")), vec!["1", "2", "3"]);
    }

    #[test]
    fn empty_query_returns_everything() {
        let records = fixture();
        assert_eq!(search(&records, "").len(), 3);
        assert_eq!(search(&records, "   \t ").len(), 3);
    }

    #[test]
    fn result_is_a_subset_in_input_order() {
        let records = fixture();
        let found = search(&records, "a");
        assert_eq!(ids(&found), vec!["1", "2", "3"]);
    }
}
