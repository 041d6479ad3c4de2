use crate::api::models::Artwork;
use std::collections::HashSet;

/// Selected artworks, by identity, in the order they were selected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    records: Vec<Artwork>,
    ids: HashSet<u64>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from records; later duplicates of an id are dropped
    pub fn from_records(records: impl IntoIterator<Item = Artwork>) -> Self {
        let mut selection = Self::new();
        for record in records {
            selection.insert(record);
        }
        selection
    }

    /// Returns false when a record with the same id is already selected
    pub fn insert(&mut self, record: Artwork) -> bool {
        if !self.ids.insert(record.id) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn remove(&mut self, id: u64) -> bool {
        if !self.ids.remove(&id) {
            return false;
        }
        self.records.retain(|r| r.id != id);
        true
    }

    pub fn toggle(&mut self, record: &Artwork) {
        if !self.remove(record.id) {
            self.insert(record.clone());
        }
    }

    /// Header checkbox: unselect the whole page if it is fully selected,
    /// otherwise select what is missing.
    pub fn toggle_all(&mut self, page: &[Artwork]) {
        if !page.is_empty() && page.iter().all(|r| self.contains(r.id)) {
            for record in page {
                self.remove(record.id);
            }
        } else {
            for record in page {
                self.insert(record.clone());
            }
        }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.ids.clear();
    }

    pub fn records(&self) -> &[Artwork] {
        &self.records
    }

    pub fn ids(&self) -> Vec<u64> {
        self.records.iter().map(|r| r.id).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// How many records of `page` are selected
    pub fn count_on(&self, page: &[Artwork]) -> usize {
        page.iter().filter(|r| self.contains(r.id)).count()
    }
}

/// Parse the picker input leniently.
///
/// Leading whitespace and one sign are accepted, then the leading digits
/// form the number and anything after them is ignored. Returns `None`
/// when there are no leading digits or the value is not positive.
pub fn parse_count(input: &str) -> Option<usize> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let digits = &rest[..digits_len];
    if negative || digits.bytes().all(|b| b == b'0') {
        return None;
    }

    Some(digits.parse::<usize>().unwrap_or(usize::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::artwork;

    #[test]
    fn test_insert_is_by_identity() {
        let mut selection = Selection::new();
        assert!(selection.insert(artwork(1)));
        assert!(!selection.insert(artwork(1)));
        assert!(selection.insert(artwork(2)));
        assert_eq!(selection.ids(), vec![1, 2]);
    }

    #[test]
    fn test_from_records_keeps_first_occurrence_order() {
        let selection =
            Selection::from_records(vec![artwork(3), artwork(1), artwork(3), artwork(2)]);
        assert_eq!(selection.ids(), vec![3, 1, 2]);
    }

    #[test]
    fn test_toggle_row() {
        let mut selection = Selection::new();
        selection.toggle(&artwork(7));
        assert!(selection.contains(7));
        selection.toggle(&artwork(7));
        assert!(!selection.contains(7));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_all_selects_missing_then_clears_page() {
        let page: Vec<_> = (1..=4).map(artwork).collect();
        let mut selection = Selection::from_records(vec![artwork(2), artwork(99)]);

        selection.toggle_all(&page);
        assert_eq!(selection.ids(), vec![2, 99, 1, 3, 4]);
        assert_eq!(selection.count_on(&page), 4);

        selection.toggle_all(&page);
        assert_eq!(selection.ids(), vec![99]);
    }

    #[test]
    fn test_toggle_all_on_empty_page_is_noop() {
        let mut selection = Selection::from_records(vec![artwork(1)]);
        selection.toggle_all(&[]);
        assert_eq!(selection.ids(), vec![1]);
    }

    #[test]
    fn test_parse_count_accepts_leading_integer() {
        assert_eq!(parse_count("20"), Some(20));
        assert_eq!(parse_count("  7 "), Some(7));
        assert_eq!(parse_count("+5"), Some(5));
        assert_eq!(parse_count("20abc"), Some(20));
        assert_eq!(parse_count("3.7"), Some(3));
        assert_eq!(parse_count("007"), Some(7));
    }

    #[test]
    fn test_parse_count_rejects_invalid_input() {
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("abc"), None);
        assert_eq!(parse_count("0"), None);
        assert_eq!(parse_count("000"), None);
        assert_eq!(parse_count("-4"), None);
        assert_eq!(parse_count("- 4"), None);
        assert_eq!(parse_count(".5"), None);
    }

    #[test]
    fn test_parse_count_saturates() {
        assert_eq!(
            parse_count("99999999999999999999999999999"),
            Some(usize::MAX)
        );
    }
}
