// Artsey Chord Type
// An unordered set of keys (or grid coordinates) held together

use std::fmt;

use smallvec::SmallVec;

/// A set of keys that must be held together.
///
/// Members are kept sorted and deduplicated, so two chords built from the
/// same keys in any order compare and hash equal. The inline capacity covers
/// the full 8-key grid without heap allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Chord<T: Ord> {
    members: SmallVec<[T; 8]>,
}

impl<T: Ord> Chord<T> {
    /// Create an empty chord
    pub fn new() -> Self {
        Self {
            members: SmallVec::new(),
        }
    }

    /// Number of distinct members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the chord has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Check membership
    pub fn contains(&self, member: &T) -> bool {
        self.members.binary_search(member).is_ok()
    }

    /// Members in canonical (sorted) order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.members.iter()
    }

    /// Apply a fallible mapping to every member, producing a new chord.
    ///
    /// Members that map to the same value collapse into one.
    pub fn try_map<U, E, F>(&self, mut f: F) -> Result<Chord<U>, E>
    where
        U: Ord,
        F: FnMut(&T) -> Result<U, E>,
    {
        self.members.iter().map(&mut f).collect()
    }
}

impl<T: Ord> Default for Chord<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for Chord<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut members: SmallVec<[T; 8]> = iter.into_iter().collect();
        members.sort();
        members.dedup();
        Self { members }
    }
}

impl<'a, T: Ord> IntoIterator for &'a Chord<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<T: Ord + fmt::Display> fmt::Display for Chord<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.members.iter().map(|m| m.to_string()).collect();
        write!(f, "{{{}}}", parts.join("+"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chord_equality_order_independent() {
        let ab: Chord<char> = ['a', 'b'].into_iter().collect();
        let ba: Chord<char> = ['b', 'a'].into_iter().collect();
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_chord_dedups() {
        let chord: Chord<char> = ['a', 'a', 'b'].into_iter().collect();
        assert_eq!(chord.len(), 2);
        assert!(chord.contains(&'a'));
        assert!(!chord.contains(&'c'));
    }

    #[test]
    fn test_chord_subset_is_not_equal() {
        let ab: Chord<char> = ['a', 'b'].into_iter().collect();
        let abc: Chord<char> = ['a', 'b', 'c'].into_iter().collect();
        assert_ne!(ab, abc);
    }

    #[test]
    fn test_chord_hashable() {
        use std::collections::HashMap;
        let mut map: HashMap<Chord<char>, &str> = HashMap::new();
        map.insert(['x', 'y'].into_iter().collect(), "value");
        let lookup: Chord<char> = ['y', 'x'].into_iter().collect();
        assert_eq!(map.get(&lookup), Some(&"value"));
    }

    #[test]
    fn test_chord_try_map_collapses_duplicates() {
        let chord: Chord<u8> = [1, 2, 3].into_iter().collect();
        let mapped: Result<Chord<u8>, ()> = chord.try_map(|v| Ok(v / 2));
        let expected: Chord<u8> = [0, 1].into_iter().collect();
        assert_eq!(mapped.unwrap(), expected);

        let failed: Result<Chord<u8>, &str> =
            chord.try_map(|v| if *v == 3 { Err("three") } else { Ok(*v) });
        assert_eq!(failed, Err("three"));
    }

    #[test]
    fn test_chord_display() {
        let chord: Chord<char> = ['s', 'a'].into_iter().collect();
        assert_eq!(chord.to_string(), "{a+s}");
    }
}
