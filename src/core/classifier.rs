use crate::models::{Category, ClassificationResult, Domain};

/// Keyword table for domain classification, in tie-break order
const DOMAIN_KEYWORDS: [(Domain, &[&str]); 9] = [
    (
        Domain::ArtificialIntelligence,
        &["ai", "machine learning", "deep learning", "neural network", "nlp", "computer vision"],
    ),
    (Domain::Law, &["law", "legal", "justice", "court", "attorney", "legislation"]),
    (Domain::Engineering, &["engineering", "mechanical", "civil", "electrical", "design"]),
    (
        Domain::Biomedical,
        &["biomedical", "medicine", "biology", "health", "clinical", "medical"],
    ),
    (Domain::Economics, &["economics", "finance", "business", "market", "trade"]),
    (
        Domain::ComputerScience,
        &["programming", "software", "coding", "algorithm", "data structure"],
    ),
    (Domain::Physics, &["physics", "quantum", "mechanics", "thermodynamics"]),
    (Domain::Chemistry, &["chemistry", "chemical", "molecular", "organic"]),
    (Domain::Mathematics, &["mathematics", "calculus", "statistics", "algebra"]),
];

/// Category rules; the first rule with any matching keyword wins
const CATEGORY_RULES: [(Category, &[&str]); 5] = [
    (Category::Workshop, &["workshop", "seminar", "training"]),
    (Category::Hackathon, &["hackathon", "hack", "coding competition"]),
    (Category::Research, &["research", "internship", "lab"]),
    (Category::Scholarship, &["scholarship", "grant", "funding"]),
    (Category::Conference, &["conference", "symposium", "summit"]),
];

/// Lower-cased `"{title} {description}"`
fn normalized_text(title: &str, description: &str) -> String {
    format!("{} {}", title, description).to_lowercase()
}

/// Number of keywords occurring anywhere in `text` (plain substring match)
#[inline]
fn keyword_hits(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| text.contains(*k)).count()
}

/// Classify an opportunity into a domain
///
/// The domain with the strictly highest keyword count wins. On a tie the
/// label declared first in the table wins. No hits at all means `Other`.
pub fn classify_domain(title: &str, description: &str) -> Domain {
    let text = normalized_text(title, description);

    let mut best = Domain::Other;
    let mut best_hits = 0;
    for (domain, keywords) in DOMAIN_KEYWORDS.iter() {
        let hits = keyword_hits(&text, keywords);
        if hits > best_hits {
            best = *domain;
            best_hits = hits;
        }
    }

    best
}

/// Classify an opportunity into a category
///
/// Rules are checked in priority order Workshop, Hackathon, Research,
/// Scholarship, Conference; nothing matching means `Other`.
pub fn classify_category(title: &str, description: &str) -> Category {
    let text = normalized_text(title, description);

    CATEGORY_RULES
        .iter()
        .find(|(_, keywords)| keyword_hits(&text, keywords) > 0)
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

/// Classify both domain and category
pub fn classify(title: &str, description: &str) -> ClassificationResult {
    ClassificationResult {
        domain: classify_domain(title, description),
        category: classify_category(title, description),
    }
}
