use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{AchievementProfile, NewOpportunity, ProfileChanges};

/// Request to register a student profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[validate(length(min = 1, max = 80))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 100))]
    #[serde(alias = "full_name", rename = "fullName", default)]
    pub full_name: Option<String>,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub interests: Option<String>,
    #[serde(alias = "academic_background", rename = "academicBackground", default)]
    pub academic_background: Option<String>,
}

/// Request to update a student's profile and replace its achievement counters
///
/// Omitted profile fields keep their stored values; counters default to zero.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 100))]
    #[serde(alias = "full_name", rename = "fullName", default)]
    pub full_name: Option<String>,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub interests: Option<String>,
    #[serde(alias = "academic_background", rename = "academicBackground", default)]
    pub academic_background: Option<String>,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub hackathons: i32,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub internships: i32,
    #[validate(range(min = 0))]
    #[serde(alias = "research_papers", rename = "researchPapers", default)]
    pub research_papers: i32,
    #[validate(range(min = 0.0))]
    #[serde(alias = "coding_score", rename = "codingScore", default)]
    pub coding_score: f64,
    #[validate(range(min = 0))]
    #[serde(alias = "competition_wins", rename = "competitionWins", default)]
    pub competition_wins: i32,
}

impl UpdateProfileRequest {
    /// Profile fields to write; blank values count as omitted
    pub fn profile_changes(&self) -> ProfileChanges {
        ProfileChanges {
            full_name: trimmed(&self.full_name),
            domain: trimmed(&self.domain),
            skills: trimmed(&self.skills),
            interests: trimmed(&self.interests),
            academic_background: trimmed(&self.academic_background),
        }
    }
}

impl From<&UpdateProfileRequest> for AchievementProfile {
    fn from(req: &UpdateProfileRequest) -> Self {
        Self {
            hackathons: req.hackathons,
            internships: req.internships,
            research_papers: req.research_papers,
            coding_score: req.coding_score,
            competition_wins: req.competition_wins,
        }
    }
}

/// Leaderboard query string
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaderboardQuery {
    pub domain: Option<String>,
    pub limit: Option<usize>,
}

/// Limit-only query string
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

/// Optional domain filter for listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainFilter {
    pub domain: Option<String>,
}

/// Identifies the acting student on creator-only operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorQuery {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: i64,
}

/// Request to create an opportunity
///
/// `domain` and `category` are classified from the text when omitted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOpportunityRequest {
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<i64>,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub university: Option<String>,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub domain: Option<String>,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub category: Option<String>,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub url: Option<String>,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub deadline: Option<String>,
}

/// Request to edit an opportunity; only its creator may do so
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateOpportunityRequest {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub university: Option<String>,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub domain: Option<String>,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub category: Option<String>,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub url: Option<String>,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
}

impl UpdateOpportunityRequest {
    pub fn to_new_opportunity(&self) -> Result<NewOpportunity, chrono::ParseError> {
        Ok(NewOpportunity {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            university: trimmed(&self.university),
            domain: trimmed(&self.domain),
            category: trimmed(&self.category),
            deadline: parse_deadline(self.deadline.as_deref())?,
            url: trimmed(&self.url),
            requirements: trimmed(&self.requirements),
            location: trimmed(&self.location),
            created_by: Some(self.user_id),
        })
    }
}

/// Free text to run through the classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Request to apply to an opportunity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyRequest {
    #[serde(alias = "user_id", alias = "studentId", rename = "userId")]
    pub user_id: i64,
}

/// Request to publish a community post
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: i64,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub domain: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: i64,
    #[validate(length(min = 1))]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeRequest {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: i64,
}

/// Parse an optional `YYYY-MM-DD` deadline; blank means no deadline
pub fn parse_deadline(raw: Option<&str>) -> Result<Option<chrono::NaiveDate>, chrono::ParseError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Some),
    }
}

/// Trim an optional field, mapping blank to `None`
pub fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_deadline() {
        assert_eq!(parse_deadline(None).unwrap(), None);
        assert_eq!(parse_deadline(Some("  ")).unwrap(), None);
        assert_eq!(
            parse_deadline(Some("2025-03-01")).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2025, 3, 1)
        );
        assert!(parse_deadline(Some("03/01/2025")).is_err());
    }

    #[test]
    fn test_achievements_request_validation() {
        let req: UpdateProfileRequest = serde_json::from_str(
            r#"{"hackathons": 2, "internships": 1, "codingScore": 80.0, "competitionWins": 1}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.research_papers, 0);

        let negative = UpdateProfileRequest {
            hackathons: -1,
            ..req
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_profile_changes_keep_omitted_fields() {
        let req: UpdateProfileRequest = serde_json::from_str(
            r#"{"domain": " Physics ", "skills": "   ", "fullName": "Ada Lovelace", "hackathons": 3}"#,
        )
        .unwrap();

        let changes = req.profile_changes();
        assert_eq!(changes.domain.as_deref(), Some("Physics"));
        assert_eq!(changes.full_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(changes.skills, None);
        assert_eq!(changes.interests, None);
        assert_eq!(changes.academic_background, None);

        let profile = AchievementProfile::from(&req);
        assert_eq!(profile.hackathons, 3);
        assert_eq!(profile.coding_score, 0.0);
    }

    #[test]
    fn test_counters_only_body_changes_no_profile_field() {
        let req: UpdateProfileRequest =
            serde_json::from_str(r#"{"internships": 2, "researchPapers": 1}"#).unwrap();
        assert_eq!(req.profile_changes(), ProfileChanges::default());
    }

    #[test]
    fn test_create_student_rejects_bad_email() {
        let req = CreateStudentRequest {
            username: "ada".to_string(),
            email: "not-an-email".to_string(),
            full_name: None,
            domain: None,
            skills: None,
            interests: None,
            academic_background: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_trimmed_drops_blank_values() {
        assert_eq!(trimmed(&Some("  MIT ".to_string())), Some("MIT".to_string()));
        assert_eq!(trimmed(&Some("   ".to_string())), None);
        assert_eq!(trimmed(&None), None);
    }
}
