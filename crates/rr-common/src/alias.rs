use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use unicode_normalization::UnicodeNormalization;

/// Canonical term -> known synonym spellings. Read-only, built once per
/// process, used identically for skills and certifications.
pub type AliasMap = HashMap<&'static str, &'static [&'static str]>;

static SKILL_ALIASES: LazyLock<AliasMap> = LazyLock::new(|| {
    let aliases: &[(&str, &[&str])] = &[
        ("python", &["py", "python3", "python programming", "python language"]),
        ("java", &["core java", "java programming"]),
        ("c++", &["cpp", "c plus plus"]),
        ("c", &["c programming", "basic c"]),
        ("javascript", &["js", "ecmascript", "vanilla js"]),
        ("html", &["html5", "web markup"]),
        ("css", &["css3", "style sheet"]),
        ("sql", &["mysql", "postgresql", "structured query language"]),
        ("php", &["php scripting"]),
        ("react", &["react.js", "reactjs"]),
        ("node", &["node.js", "nodejs"]),
        ("machine learning", &["ml", "ml algorithms"]),
        ("deep learning", &["dl", "cnn", "rnn"]),
        ("nlp", &["natural language processing"]),
        ("pandas", &["dataframes"]),
        ("numpy", &["numerical python"]),
        ("git", &["github", "gitlab"]),
        ("linux", &["ubuntu"]),
        ("communication", &["verbal skills"]),
    ];

    aliases.iter().copied().collect()
});

static CERTIFICATION_ALIASES: LazyLock<AliasMap> = LazyLock::new(|| {
    let aliases: &[(&str, &[&str])] = &[
        ("nptel python", &["joy of computing using python"]),
        ("problem solving in c", &["nptel c programming"]),
        ("google data analytics", &["google analytics"]),
        ("aws cloud practitioner", &["aws certified"]),
    ];

    aliases.iter().copied().collect()
});

pub fn skill_aliases() -> &'static AliasMap {
    &SKILL_ALIASES
}

pub fn certification_aliases() -> &'static AliasMap {
    &CERTIFICATION_ALIASES
}

/// NFKC-normalize, trim, and lowercase a term before alias lookup so that
/// fullwidth or oddly cased input still hits the map.
pub fn normalize_term(term: &str) -> String {
    term.nfkc().collect::<String>().trim().to_lowercase()
}

/// Expand each term into itself plus its declared synonyms, normalized.
/// Unknown terms pass through as their own singleton, so expansion never
/// shrinks the evidence set.
pub fn expand_aliases<'a, I>(terms: I, map: &AliasMap) -> HashSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut expanded = HashSet::new();
    for term in terms {
        let normalized = normalize_term(term);
        if normalized.is_empty() {
            continue;
        }
        if let Some(synonyms) = map.get(normalized.as_str()) {
            expanded.extend(synonyms.iter().map(|s| s.to_string()));
        }
        expanded.insert(normalized);
    }
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_canonical_skill_to_synonyms() {
        let expanded = expand_aliases(["Python"], skill_aliases());

        assert!(expanded.contains("python"));
        assert!(expanded.contains("py"));
        assert!(expanded.contains("python3"));
    }

    #[test]
    fn unknown_terms_pass_through() {
        let expanded = expand_aliases(["Cobol"], skill_aliases());
        assert_eq!(expanded, HashSet::from(["cobol".to_string()]));
    }

    #[test]
    fn blank_terms_are_dropped() {
        let expanded = expand_aliases(["  ", ""], skill_aliases());
        assert!(expanded.is_empty());
    }

    #[test]
    fn certification_map_is_separate_from_skills() {
        let expanded = expand_aliases(["AWS Cloud Practitioner"], certification_aliases());

        assert!(expanded.contains("aws cloud practitioner"));
        assert!(expanded.contains("aws certified"));
        assert!(!expanded.contains("py"));
    }

    #[test]
    fn normalizes_fullwidth_input() {
        assert_eq!(normalize_term("ＰＹＴＨＯＮ"), "python");
        assert_eq!(normalize_term("  SQL  "), "sql");
    }
}
