use std::collections::BTreeSet;

use super::fuzzy::FuzzyMatcher;
use super::keywords::KeywordSet;

/// Keywords present in the résumé, either verbatim anywhere in the text or
/// as a line whose partial ratio is strictly above `threshold`.
pub fn find_skills_in_resume(
    resume_text: &str,
    keywords: &KeywordSet,
    fuzzy: &dyn FuzzyMatcher,
    threshold: u8,
) -> BTreeSet<String> {
    let resume_lower = resume_text.to_lowercase();

    keywords
        .iter()
        .filter(|key| {
            resume_lower.contains(key.as_str())
                || resume_lower
                    .split('\n')
                    .any(|line| fuzzy.partial_ratio(key, line) > threshold)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fuzzy::PartialRatio;

    fn keywords(items: &[&str]) -> KeywordSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Scores every pair the same; counts nothing else.
    struct Fixed(u8);

    impl FuzzyMatcher for Fixed {
        fn partial_ratio(&self, _a: &str, _b: &str) -> u8 {
            self.0
        }
    }

    #[test]
    fn test_python_by_substring_and_sql_by_fuzzy_line() {
        let found = find_skills_in_resume(
            "Python developer, worked with MySQL",
            &keywords(&["python", "sql"]),
            &PartialRatio,
            90,
        );
        assert_eq!(found, keywords(&["python", "sql"]));
    }

    #[test]
    fn test_fuzzy_line_match_catches_a_typo() {
        let found = find_skills_in_resume(
            "Summary\nBuilt distributed systemxs at scale\n",
            &keywords(&["distributed systemss"]),
            &PartialRatio,
            90,
        );
        assert!(found.contains("distributed systemss"));
    }

    #[test]
    fn test_threshold_is_strict() {
        let kws = keywords(&["rust"]);
        assert!(find_skills_in_resume("go developer", &kws, &Fixed(90), 90).is_empty());
        assert_eq!(
            find_skills_in_resume("go developer", &kws, &Fixed(91), 90),
            kws
        );
    }

    #[test]
    fn test_unmatched_keywords_are_dropped() {
        let found = find_skills_in_resume(
            "Accountant with ten years in audit",
            &keywords(&["kubernetes", "terraform"]),
            &PartialRatio,
            90,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_empty_resume_finds_nothing() {
        let found = find_skills_in_resume("", &keywords(&["python"]), &PartialRatio, 90);
        assert!(found.is_empty());
    }
}
