use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::alias::{certification_aliases, expand_aliases, skill_aliases};
use crate::text::token_counts;
use crate::{JobFilter, StructuredResume};

/// Ordinal education ranks; the maximum tier contribution is fixed at 5.
static EDUCATION_LEVELS: LazyLock<HashMap<&'static str, u32>> = LazyLock::new(|| {
    HashMap::from([
        ("phd", 5),
        ("mtech", 4),
        ("msc", 4),
        ("ma", 4),
        ("mca", 4),
        ("btech", 3),
        ("be", 3),
        ("bsc", 3),
        ("ba", 3),
        ("bca", 3),
        ("bachelor of technology", 3),
        ("bachelor", 3),
        ("diploma", 2),
        ("high school", 1),
    ])
});

fn education_rank(level: &str) -> u32 {
    EDUCATION_LEVELS
        .get(level.to_lowercase().as_str())
        .copied()
        .unwrap_or(0)
}

/// Deterministic rule-based score with its full reason trail.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleScore {
    /// 0..=100, normalized against the maximum attainable for this filter.
    pub score: f64,
    /// One line per tier evaluation, in fixed order: skills, certifications,
    /// project domains, education, experience.
    pub explanation: Vec<String>,
}

/// Score one structured résumé against a job's filter criteria.
///
/// Tiers run in fixed order and each appends a reason line regardless of
/// outcome, so the trail is auditable even for zero-match candidates. An empty
/// required list contributes 0 to both score and max score for its tier, which
/// makes the remaining tiers proportionally heavier (a known property of the
/// scoring shape, preserved on purpose).
pub fn rule_score(resume: &StructuredResume, filter: &JobFilter) -> RuleScore {
    let mut score: u32 = 0;
    let mut max_score: u32 = 0;
    let mut explanation = Vec::new();

    let counts = token_counts(&resume.raw_text);

    // Skills: tiered award on alias-expanded token frequency, 10 pts each.
    for skill in &filter.required_skills {
        let variants = expand_aliases([skill.as_str()], skill_aliases());
        let freq: usize = variants
            .iter()
            .map(|v| counts.get(v).copied().unwrap_or(0))
            .sum();

        let (points, line) = match freq {
            3.. => (10, format!("skill '{skill}' used frequently ({freq}x) [+10]")),
            2 => (6, format!("skill '{skill}' moderately mentioned ({freq}x) [+6]")),
            1 => (3, format!("skill '{skill}' mentioned once [+3]")),
            0 => (0, format!("skill '{skill}' not found [+0]")),
        };
        score += points;
        max_score += 10;
        explanation.push(line);
    }

    // Certifications: alias-expanded intersection, 5 pts per match.
    let required_certs = expand_aliases(
        filter.certifications.iter().map(String::as_str),
        certification_aliases(),
    );
    let found_certs: HashSet<String> = resume
        .certifications
        .iter()
        .map(|c| c.to_lowercase())
        .collect();
    let cert_matches = required_certs.intersection(&found_certs).count() as u32;
    score += cert_matches * 5;
    max_score += filter.certifications.len() as u32 * 5;
    explanation.push(format!(
        "certification matches: {cert_matches} [+{}]",
        cert_matches * 5
    ));

    // Project domains: direct case-folded intersection, 4 pts per match.
    let required_domains: HashSet<String> = filter
        .project_domains
        .iter()
        .map(|d| d.to_lowercase())
        .collect();
    let found_domains: HashSet<String> = resume
        .project_domains
        .iter()
        .map(|d| d.to_lowercase())
        .collect();
    let domain_matches = required_domains.intersection(&found_domains).count() as u32;
    score += domain_matches * 4;
    max_score += required_domains.len() as u32 * 4;
    explanation.push(format!(
        "project domain matches: {domain_matches} [+{}]",
        domain_matches * 4
    ));

    // Education: award the candidate's best rank only when it meets the
    // required rank; max contribution fixed at 5 regardless of requirement.
    let required_rank = education_rank(&filter.education_level);
    let best_rank = resume
        .education
        .iter()
        .map(|e| education_rank(e))
        .max()
        .unwrap_or(0);
    if best_rank >= required_rank {
        score += best_rank;
    }
    max_score += 5;
    explanation.push(format!("education match score: {best_rank}/5"));

    // Experience: binary threshold, 5 pts.
    let years = resume.experience_years;
    explanation.push(format!("candidate has {years} year(s) experience"));
    if years >= filter.min_experience_years {
        score += 5;
        explanation.push("experience meets/exceeds required minimum [+5]".to_string());
    } else {
        explanation.push("experience below required minimum [+0]".to_string());
    }
    max_score += 5;

    // Division guard: a filter with no attainable points scores 0.
    let normalized = if max_score == 0 {
        0.0
    } else {
        f64::from(score) / f64::from(max_score) * 100.0
    };

    RuleScore {
        score: normalized,
        explanation,
    }
}
