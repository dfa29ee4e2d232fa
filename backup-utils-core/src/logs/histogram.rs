use std::collections::{BTreeMap, HashMap};

/// Counter that remembers the order in which keys first appeared.
#[derive(Clone, Debug, Default)]
pub struct Tally {
    counts: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.counts.len());
                self.counts.push((key.to_string(), 1));
            }
        }
    }

    pub fn get(&self, key: &str) -> u64 {
        self.index.get(key).map_or(0, |&i| self.counts[i].1)
    }

    /// Entries in first-appearance order.
    pub fn entries(&self) -> &[(String, u64)] {
        &self.counts
    }

    /// Entries by descending count; ties keep first-appearance order.
    pub fn ranked(&self) -> Vec<(String, u64)> {
        let mut out = self.counts.clone();
        out.sort_by(|a, b| b.1.cmp(&a.1));
        out
    }
}

/// Key with the highest count. Keys are visited in ascending order and the
/// first one reaching the maximum wins.
pub fn busiest<K, V, F>(buckets: &BTreeMap<K, V>, count: F) -> Option<K>
where
    K: Clone + Ord,
    F: Fn(&V) -> u64,
{
    let mut best: Option<(&K, u64)> = None;

    for (key, value) in buckets {
        let c = count(value);
        if best.is_none_or(|(_, top)| c > top) {
            best = Some((key, c));
        }
    }

    best.map(|(key, _)| key.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_ranks_by_count_then_first_appearance() {
        let mut tally = Tally::new();
        for key in ["b", "a", "c", "a", "c"] {
            tally.record(key);
        }

        assert_eq!(
            tally.ranked(),
            vec![
                ("a".to_string(), 2),
                ("c".to_string(), 2),
                ("b".to_string(), 1)
            ]
        );
        assert_eq!(tally.get("c"), 2);
        assert_eq!(tally.get("missing"), 0);
    }

    #[test]
    fn busiest_prefers_lowest_key_on_ties() {
        let mut hours = BTreeMap::new();
        hours.insert("09".to_string(), 3_u64);
        hours.insert("03".to_string(), 3);
        hours.insert("12".to_string(), 1);

        assert_eq!(busiest(&hours, |c| *c), Some("03".to_string()));
    }

    #[test]
    fn busiest_of_nothing_is_none() {
        let empty: BTreeMap<String, u64> = BTreeMap::new();
        assert_eq!(busiest(&empty, |c| *c), None);
    }
}
