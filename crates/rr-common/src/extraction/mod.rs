use std::collections::BTreeSet;
use std::sync::LazyLock;

use lazy_static::lazy_static;
use regex::Regex;
use strsim::normalized_damerau_levenshtein;

use crate::text::{title_case, tokenize_words};
use crate::StructuredResume;

/// Canonical skill vocabulary matched fuzzily against résumé tokens.
const SKILL_SET: &[&str] = &[
    "python", "java", "c", "c++", "c#", "html", "css", "javascript", "typescript",
    "react", "angular", "vue", "node.js", "express", "django", "flask",
    "sql", "mysql", "postgresql", "mongodb", "oracle", "firebase",
    "git", "github", "gitlab", "linux", "bash", "docker", "kubernetes",
    "aws", "azure", "gcp", "google cloud", "heroku",
    "tensorflow", "keras", "pytorch", "scikit-learn", "opencv", "nltk", "spacy",
    "pandas", "numpy", "matplotlib", "seaborn", "power bi", "tableau", "excel",
    "jira", "trello", "figma", "canva",
];

/// Project/tech domain vocabulary, whole-word presence test.
const TECH_DOMAINS: &[&str] = &[
    "machine learning", "artificial intelligence", "ai", "ml", "deep learning",
    "data science", "web development", "full stack", "frontend", "backend",
    "android development", "ios development", "cloud", "devops",
    "html", "css", "react", "node", "python", "java", "sql", "nlp", "cv",
];

const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor", "master", "btech", "mtech", "be", "b.e", "m.e", "phd",
    "msc", "bsc", "ba", "ma", "bca", "mca", "diploma", "graduate", "undergraduate",
];

const SOFT_SKILLS: &[&str] = &[
    "teamwork", "communication", "leadership", "critical thinking",
    "problem solving", "adaptability", "creativity", "collaboration",
    "time management", "decision making", "emotional intelligence",
    "negotiation", "public speaking", "self-motivation",
];

/// Section headings and boilerplate that disqualify a line as a person name.
const NAME_STOPWORDS: &[&str] = &[
    "resume", "curriculum", "vitae", "profile", "summary", "objective",
    "education", "experience", "skills", "projects", "certifications",
    "contact", "email", "phone", "address",
];

lazy_static! {
    // "<N> (+)? years/yrs ... experience"
    static ref EXPERIENCE_RE: Regex =
        Regex::new(r"(?i)(\d+)\s*\+?\s*(?:years|yrs)[\s\w]*experience").unwrap();
    // "Certified in <...>" / "<...> Certification|Certified"
    static ref CERTIFICATION_RE: Regex = Regex::new(
        r"(?i)(Certified in [A-Za-z0-9\s&]+|[A-Za-z0-9\s]+(?:Certification|Certified))"
    )
    .unwrap();
    static ref EMAIL_RE: Regex =
        Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+").unwrap();
}

static EDUCATION_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| whole_word_patterns(EDUCATION_KEYWORDS));

static DOMAIN_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| whole_word_patterns(TECH_DOMAINS));

fn whole_word_patterns(keywords: &[&'static str]) -> Vec<(&'static str, Regex)> {
    keywords
        .iter()
        .map(|kw| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(kw));
            (*kw, Regex::new(&pattern).unwrap())
        })
        .collect()
}

fn fuzzy_cutoff() -> f64 {
    std::env::var("RR_FUZZY_CUTOFF")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.8)
}

/// Fuzzy-match the canonical skill vocabulary against word tokens. A skill is
/// included (title-cased) when any single token is a near match, tolerating
/// minor spelling and formatting variation without full NLP.
pub fn extract_skills(text: &str) -> BTreeSet<String> {
    let tokens = tokenize_words(text);
    let cutoff = fuzzy_cutoff();
    let mut found = BTreeSet::new();

    for skill in SKILL_SET {
        let hit = tokens.iter().any(|token| {
            token.as_str() == *skill || normalized_damerau_levenshtein(skill, token) >= cutoff
        });
        if hit {
            found.insert(title_case(skill));
        }
    }
    found
}

/// Maximum N over all "<N> years ... experience" patterns, 0 when absent.
pub fn extract_experience_years(text: &str) -> u32 {
    EXPERIENCE_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}

/// Whole-word presence test against the education keyword list, title-cased.
pub fn extract_education(text: &str) -> BTreeSet<String> {
    EDUCATION_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(kw, _)| title_case(kw))
        .collect()
}

/// Phrases of the form "Certified in <...>" or "<...> Certification/Certified".
pub fn extract_certifications(text: &str) -> BTreeSet<String> {
    CERTIFICATION_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

/// Whole-word presence test against the tech domain vocabulary, title-cased.
pub fn extract_project_domains(text: &str) -> BTreeSet<String> {
    DOMAIN_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(kw, _)| title_case(kw))
        .collect()
}

/// Heuristic person-name pickup: a line of at most three capitalized tokens
/// near the top of the document that is not a section heading. Returns an
/// empty string when nothing plausible is found; never fatal.
pub fn extract_name(text: &str) -> String {
    for line in text.lines().take(10) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() || tokens.len() > 3 {
            continue;
        }

        let capitalized = tokens.iter().all(|t| {
            let mut chars = t.chars();
            matches!(chars.next(), Some(c) if c.is_uppercase())
                && chars.all(|c| c.is_alphabetic() || c == '.')
        });
        if !capitalized {
            continue;
        }

        let lowered = line.to_lowercase();
        if NAME_STOPWORDS.iter().any(|w| lowered.contains(w)) {
            continue;
        }

        return line.to_string();
    }
    String::new()
}

/// First email-shaped substring, empty string when absent.
pub fn extract_email(text: &str) -> String {
    EMAIL_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Substring presence of the fixed soft-skill phrases, title-cased.
pub fn extract_soft_skills(text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    SOFT_SKILLS
        .iter()
        .filter(|s| lowered.contains(*s))
        .map(|s| title_case(s))
        .collect()
}

/// Compose all field extractors over one résumé text.
///
/// Extraction never raises to the caller: a sub-extractor that finds nothing
/// degrades its field to empty/default, and the record is still returned.
/// Upstream PDF decode failures hand in empty text, which yields an all-default
/// record.
pub fn parse_resume(text: &str) -> StructuredResume {
    StructuredResume {
        name: extract_name(text),
        email: extract_email(text),
        skills: extract_skills(text),
        soft_skills: extract_soft_skills(text),
        education: extract_education(text),
        certifications: extract_certifications(text),
        project_domains: extract_project_domains(text),
        experience_years: extract_experience_years(text),
        raw_text: text.to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Priya Sharma
priya.sharma@example.com | +91 98765 43210

Btech in Computer Science, 3 years of professional experience.
Skills: Python, SQL, Dokcer, React
Certified in Data Analytics
Projects: machine learning pipeline, web development portal
Strong communication and problem solving.
";

    #[test]
    fn extracts_exact_and_fuzzy_skills() {
        let skills = extract_skills(SAMPLE);

        assert!(skills.contains("Python"));
        assert!(skills.contains("Sql"));
        assert!(skills.contains("React"));
        // "Dokcer" is one transposition away from "docker"
        assert!(skills.contains("Docker"));
        assert!(!skills.contains("Kubernetes"));
    }

    #[test]
    fn experience_takes_the_maximum_mention() {
        assert_eq!(extract_experience_years("5 years of experience"), 5);
        assert_eq!(
            extract_experience_years("2 yrs experience early on, later 7+ years of experience"),
            7
        );
        assert_eq!(extract_experience_years("no numbers here"), 0);
    }

    #[test]
    fn education_matches_whole_words_only() {
        let education = extract_education("Completed my BTech, not a phdcandidate");

        assert!(education.contains("Btech"));
        assert!(!education.contains("Phd"));
    }

    #[test]
    fn certifications_capture_both_phrase_forms() {
        let certs =
            extract_certifications("Certified in Data Analytics & ML\nAWS Cloud Certification");

        assert!(certs.iter().any(|c| c.starts_with("Certified in Data")));
        assert!(certs.iter().any(|c| c.contains("Certification")));
    }

    #[test]
    fn name_skips_headings_and_long_lines() {
        assert_eq!(extract_name(SAMPLE), "Priya Sharma");
        assert_eq!(extract_name("RESUME\nSkills\nExperience"), "");
        assert_eq!(
            extract_name("A Very Long Header Line With Many Words\n"),
            ""
        );
    }

    #[test]
    fn email_and_soft_skills_are_best_effort() {
        assert_eq!(extract_email(SAMPLE), "priya.sharma@example.com");
        assert_eq!(extract_email("no contact info"), "");

        let soft = extract_soft_skills(SAMPLE);
        assert!(soft.contains("Communication"));
        assert!(soft.contains("Problem Solving"));
    }

    #[test]
    fn parse_resume_always_returns_a_record() {
        let parsed = parse_resume("");

        assert_eq!(parsed, StructuredResume::default());
        assert!(!parsed.has_text());
    }

    #[test]
    fn parse_resume_lowercases_raw_text_but_not_fields() {
        let parsed = parse_resume(SAMPLE);

        assert!(parsed.raw_text.contains("priya sharma"));
        assert_eq!(parsed.name, "Priya Sharma");
        assert_eq!(parsed.experience_years, 3);
        assert!(parsed.project_domains.contains("Machine Learning"));
        assert!(parsed.project_domains.contains("Web Development"));
    }
}
