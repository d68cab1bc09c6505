use movieflix_models::MovieId;
use std::collections::HashSet;
use tracing::debug;

/// Keep the first occurrence of each movie id, preserving order
pub fn remove_duplicates_by_id<T, F>(items: Vec<T>, id_of: F) -> Vec<T>
where
    F: Fn(&T) -> MovieId,
{
    let before = items.len();
    let mut seen = HashSet::new();
    let unique: Vec<T> = items.into_iter().filter(|item| seen.insert(id_of(item))).collect();
    if unique.len() != before {
        debug!("Dropped {} duplicate stored entries", before - unique.len());
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_occurrence() {
        let items = vec![(1, "a"), (2, "b"), (1, "c"), (3, "d"), (2, "e")];
        let unique = remove_duplicates_by_id(items, |(id, _)| *id);
        assert_eq!(unique, vec![(1, "a"), (2, "b"), (3, "d")]);
    }
}
