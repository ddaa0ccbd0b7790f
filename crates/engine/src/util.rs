use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Fold `input` for substring search: NFKD, combining marks dropped,
/// lowercased. Spaces and punctuation are kept so a folded term is still a
/// substring of the folded name it came from.
pub(crate) fn fold_name(input: &str) -> String {
    input
        .nfkd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_case_and_accents() {
        assert_eq!(fold_name("Éclairs"), "eclairs");
        assert_eq!(fold_name("éclair"), "eclair");
        assert_eq!(fold_name("CRÈME brûlée"), "creme brulee");
    }

    #[test]
    fn keeps_spaces_and_wildcards() {
        assert_eq!(fold_name("Food 2"), "food 2");
        assert_eq!(fold_name("50%_off"), "50%_off");
    }
}
