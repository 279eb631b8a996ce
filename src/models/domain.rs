use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Achievement counters that drive the InCoScore
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AchievementProfile {
    #[serde(default)]
    pub hackathons: i32,
    #[serde(default)]
    pub internships: i32,
    #[serde(rename = "researchPapers", default)]
    pub research_papers: i32,
    #[serde(rename = "codingScore", default)]
    pub coding_score: f64,
    #[serde(rename = "competitionWins", default)]
    pub competition_wins: i32,
}

/// InCoScore weights
///
/// Owned by [`crate::core::Scorer`]; the default is the only production table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub hackathons: f64,
    pub internships: f64,
    pub research_papers: f64,
    pub coding_score: f64,
    pub competition_wins: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            hackathons: 10.0,
            internships: 15.0,
            research_papers: 20.0,
            coding_score: 0.5,
            competition_wins: 12.0,
        }
    }
}

/// Student account with its achievement profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    pub domain: Option<String>,
    pub skills: Option<String>,
    pub interests: Option<String>,
    #[serde(rename = "academicBackground")]
    pub academic_background: Option<String>,
    pub achievements: AchievementProfile,
    pub incoscore: f64,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Student {
    /// Display name, falling back to the username
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.username)
    }
}

/// Profile fields to change on a student; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub full_name: Option<String>,
    pub domain: Option<String>,
    pub skills: Option<String>,
    pub interests: Option<String>,
    pub academic_background: Option<String>,
}

/// One row of the ranked leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    #[serde(rename = "studentId")]
    pub student_id: i64,
    pub name: String,
    pub username: String,
    pub domain: Option<String>,
    pub incoscore: f64,
    pub hackathons: i32,
    pub internships: i32,
    #[serde(rename = "researchPapers")]
    pub research_papers: i32,
}

/// Subject area of an opportunity or student
///
/// Declaration order matters: it is the tie-break order for keyword
/// classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Domain {
    #[serde(rename = "Artificial Intelligence")]
    ArtificialIntelligence,
    Law,
    Engineering,
    Biomedical,
    Economics,
    #[serde(rename = "Computer Science")]
    ComputerScience,
    Physics,
    Chemistry,
    Mathematics,
    Other,
}

impl Domain {
    pub const ALL: [Domain; 10] = [
        Domain::ArtificialIntelligence,
        Domain::Law,
        Domain::Engineering,
        Domain::Biomedical,
        Domain::Economics,
        Domain::ComputerScience,
        Domain::Physics,
        Domain::Chemistry,
        Domain::Mathematics,
        Domain::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::ArtificialIntelligence => "Artificial Intelligence",
            Domain::Law => "Law",
            Domain::Engineering => "Engineering",
            Domain::Biomedical => "Biomedical",
            Domain::Economics => "Economics",
            Domain::ComputerScience => "Computer Science",
            Domain::Physics => "Physics",
            Domain::Chemistry => "Chemistry",
            Domain::Mathematics => "Mathematics",
            Domain::Other => "Other",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Domain::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// Kind of opportunity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Workshop,
    Hackathon,
    Research,
    Scholarship,
    Conference,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Workshop,
        Category::Hackathon,
        Category::Research,
        Category::Scholarship,
        Category::Conference,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Workshop => "Workshop",
            Category::Hackathon => "Hackathon",
            Category::Research => "Research",
            Category::Scholarship => "Scholarship",
            Category::Conference => "Conference",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// Returned when a string is not one of the fixed labels
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown label: {0}")]
pub struct UnknownLabel(pub String);

/// Domain and category assigned to an opportunity at creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub domain: Domain,
    pub category: Category,
}

/// An institution page the extractor visits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    pub url: String,
}

impl Source {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Candidate opportunity pulled off an institution page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedRecord {
    pub title: String,
    pub description: String,
    pub university: String,
    pub url: String,
    #[serde(rename = "extractedAt")]
    pub extracted_at: chrono::DateTime<chrono::Utc>,
}

/// Persisted opportunity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub university: Option<String>,
    pub domain: Option<String>,
    pub category: Option<String>,
    pub deadline: Option<chrono::NaiveDate>,
    pub url: Option<String>,
    pub requirements: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    #[serde(rename = "createdBy")]
    pub created_by: Option<i64>,
    #[serde(rename = "extractedAt")]
    pub extracted_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Fields written when an opportunity is created or edited
#[derive(Debug, Clone, Default)]
pub struct NewOpportunity {
    pub title: String,
    pub description: String,
    pub university: Option<String>,
    pub domain: Option<String>,
    pub category: Option<String>,
    pub deadline: Option<chrono::NaiveDate>,
    pub url: Option<String>,
    pub requirements: Option<String>,
    pub location: Option<String>,
    pub created_by: Option<i64>,
}

impl NewOpportunity {
    /// Build an opportunity from a scraped record and its classification
    pub fn from_scraped(record: &ScrapedRecord, classification: ClassificationResult) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            university: Some(record.university.clone()),
            domain: Some(classification.domain.to_string()),
            category: Some(classification.category.to_string()),
            url: Some(record.url.clone()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Submitted,
    Accepted,
    Rejected,
}

/// A student's application to an opportunity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    #[serde(rename = "studentId")]
    pub student_id: i64,
    #[serde(rename = "opportunityId")]
    pub opportunity_id: i64,
    #[serde(rename = "opportunityTitle")]
    pub opportunity_title: String,
    pub status: ApplicationStatus,
    #[serde(rename = "submittedAt")]
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

/// Community feed post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub domain: Option<String>,
    #[serde(rename = "likesCount")]
    pub likes_count: i32,
    #[serde(rename = "commentsCount")]
    pub comments_count: i32,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    #[serde(rename = "postId")]
    pub post_id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub content: String,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Domain-specific discussion group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub domain: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_labels_round_trip() {
        for domain in Domain::ALL {
            assert_eq!(domain.as_str().parse::<Domain>(), Ok(domain));
        }
        assert!("artificial intelligence".parse::<Domain>().is_err());
    }

    #[test]
    fn test_domain_serializes_as_label() {
        let json = serde_json::to_string(&Domain::ComputerScience).unwrap();
        assert_eq!(json, "\"Computer Science\"");
    }

    #[test]
    fn test_category_labels_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let now = chrono::Utc::now();
        let mut student = Student {
            id: 1,
            username: "ada".to_string(),
            email: "ada@example.edu".to_string(),
            full_name: None,
            domain: None,
            skills: None,
            interests: None,
            academic_background: None,
            achievements: AchievementProfile::default(),
            incoscore: 0.0,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(student.display_name(), "ada");

        student.full_name = Some("Ada Lovelace".to_string());
        assert_eq!(student.display_name(), "Ada Lovelace");
    }
}
