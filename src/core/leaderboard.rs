use crate::models::{LeaderboardEntry, Student};

/// Result of ranking a set of students
#[derive(Debug)]
pub struct RankResult {
    pub entries: Vec<LeaderboardEntry>,
    pub total_candidates: usize,
}

/// Leaderboard ranking
///
/// # Pipeline Stages
/// 1. Exact-match domain filter (optional)
/// 2. Stable sort by InCoScore, highest first
/// 3. Truncate to the limit and assign 1-based ranks
///
/// Students with equal scores keep their input order, so callers that load
/// students by ascending id get the earlier registration ranked first.
pub fn rank_students(students: Vec<Student>, domain: Option<&str>, limit: usize) -> RankResult {
    let total_candidates = students.len();

    let mut ranked: Vec<Student> = students
        .into_iter()
        .filter(|s| match domain {
            Some(d) => s.domain.as_deref() == Some(d),
            None => true,
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.incoscore.total_cmp(&a.incoscore));
    ranked.truncate(limit);

    let entries = ranked
        .into_iter()
        .enumerate()
        .map(|(i, s)| LeaderboardEntry {
            rank: i + 1,
            student_id: s.id,
            name: s.display_name().to_string(),
            username: s.username,
            domain: s.domain,
            incoscore: s.incoscore,
            hackathons: s.achievements.hackathons,
            internships: s.achievements.internships,
            research_papers: s.achievements.research_papers,
        })
        .collect();

    RankResult {
        entries,
        total_candidates,
    }
}

/// Top students in exactly `domain`, best first
pub fn recommend_students(students: Vec<Student>, domain: &str, limit: usize) -> Vec<Student> {
    let mut matching: Vec<Student> = students
        .into_iter()
        .filter(|s| s.domain.as_deref() == Some(domain))
        .collect();

    matching.sort_by(|a, b| b.incoscore.total_cmp(&a.incoscore));
    matching.truncate(limit);
    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AchievementProfile;
    use chrono::Utc;

    fn create_student(id: i64, domain: Option<&str>, incoscore: f64) -> Student {
        Student {
            id,
            username: format!("student{}", id),
            email: format!("student{}@example.edu", id),
            full_name: Some(format!("Student {}", id)),
            domain: domain.map(str::to_string),
            skills: None,
            interests: None,
            academic_background: None,
            achievements: AchievementProfile::default(),
            incoscore,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_rank_descending() {
        let students = vec![
            create_student(1, Some("Law"), 40.0),
            create_student(2, Some("AI"), 90.0),
            create_student(3, Some("AI"), 65.5),
        ];

        let result = rank_students(students, None, 10);

        let ids: Vec<i64> = result.entries.iter().map(|e| e.student_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(result.entries[0].rank, 1);
        assert_eq!(result.entries[2].rank, 3);
        assert_eq!(result.total_candidates, 3);
    }

    #[test]
    fn test_rank_respects_limit() {
        let students: Vec<Student> = (0..20)
            .map(|i| create_student(i, None, i as f64))
            .collect();

        let result = rank_students(students, None, 5);

        assert_eq!(result.entries.len(), 5);
        assert_eq!(result.entries[0].incoscore, 19.0);
        assert_eq!(result.entries[4].incoscore, 15.0);
    }

    #[test]
    fn test_domain_filter_is_exact() {
        let students = vec![
            create_student(1, Some("AI"), 10.0),
            create_student(2, Some("ai"), 50.0),
            create_student(3, None, 70.0),
            create_student(4, Some("AI"), 30.0),
        ];

        let result = rank_students(students, Some("AI"), 10);

        let ids: Vec<i64> = result.entries.iter().map(|e| e.student_id).collect();
        assert_eq!(ids, vec![4, 1]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let students = vec![
            create_student(7, None, 50.0),
            create_student(3, None, 50.0),
            create_student(9, None, 80.0),
            create_student(1, None, 50.0),
        ];

        let result = rank_students(students, None, 10);

        let ids: Vec<i64> = result.entries.iter().map(|e| e.student_id).collect();
        assert_eq!(ids, vec![9, 7, 3, 1]);
    }

    #[test]
    fn test_zero_limit() {
        let students = vec![create_student(1, None, 1.0)];
        assert!(rank_students(students, None, 0).entries.is_empty());
    }

    #[test]
    fn test_recommend_students() {
        let students = vec![
            create_student(1, Some("Physics"), 10.0),
            create_student(2, Some("Physics"), 30.0),
            create_student(3, Some("Law"), 99.0),
            create_student(4, Some("Physics"), 20.0),
        ];

        let picked = recommend_students(students, "Physics", 2);

        let ids: Vec<i64> = picked.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 4]);
    }
}
