use crate::core::Scorer;
use crate::models::{
    AchievementProfile, Application, ApplicationStatus, Comment, CreateStudentRequest, Group,
    NewOpportunity, Opportunity, Post, ProfileChanges, Student,
};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

/// Map a unique-constraint violation to `Conflict`, anything else passes through
fn conflict_on_unique(err: sqlx::Error, what: &str) -> PostgresError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            PostgresError::Conflict(what.to_string())
        }
        _ => PostgresError::SqlxError(err),
    }
}

const STUDENT_COLUMNS: &str = r#"
    id, username, email, full_name, domain, skills, interests, academic_background,
    hackathons_count, internships_count, research_papers_count, coding_score,
    competition_wins, incoscore, created_at, updated_at
"#;

const OPPORTUNITY_COLUMNS: &str = r#"
    id, title, description, university, domain, category, deadline, url, requirements,
    location, is_active, created_by, extracted_at, updated_at
"#;

const POST_COLUMNS: &str =
    "id, user_id, title, content, domain, likes_count, comments_count, created_at";

fn student_from_row(row: &PgRow) -> Result<Student, sqlx::Error> {
    Ok(Student {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        full_name: row.try_get("full_name")?,
        domain: row.try_get("domain")?,
        skills: row.try_get("skills")?,
        interests: row.try_get("interests")?,
        academic_background: row.try_get("academic_background")?,
        achievements: AchievementProfile {
            hackathons: row.try_get("hackathons_count")?,
            internships: row.try_get("internships_count")?,
            research_papers: row.try_get("research_papers_count")?,
            coding_score: row.try_get("coding_score")?,
            competition_wins: row.try_get("competition_wins")?,
        },
        incoscore: row.try_get("incoscore")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn opportunity_from_row(row: &PgRow) -> Result<Opportunity, sqlx::Error> {
    Ok(Opportunity {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        university: row.try_get("university")?,
        domain: row.try_get("domain")?,
        category: row.try_get("category")?,
        deadline: row.try_get("deadline")?,
        url: row.try_get("url")?,
        requirements: row.try_get("requirements")?,
        location: row.try_get("location")?,
        is_active: row.try_get("is_active")?,
        created_by: row.try_get("created_by")?,
        extracted_at: row.try_get("extracted_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn post_from_row(row: &PgRow) -> Result<Post, sqlx::Error> {
    Ok(Post {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        domain: row.try_get("domain")?,
        likes_count: row.try_get("likes_count")?,
        comments_count: row.try_get("comments_count")?,
        created_at: row.try_get("created_at")?,
    })
}

fn comment_from_row(row: &PgRow) -> Result<Comment, sqlx::Error> {
    Ok(Comment {
        id: row.try_get("id")?,
        post_id: row.try_get("post_id")?,
        user_id: row.try_get("user_id")?,
        content: row.try_get("content")?,
        created_at: row.try_get("created_at")?,
    })
}

fn application_from_row(row: &PgRow) -> Result<Application, sqlx::Error> {
    Ok(Application {
        id: row.try_get("id")?,
        student_id: row.try_get("student_id")?,
        opportunity_id: row.try_get("opportunity_id")?,
        opportunity_title: row.try_get("opportunity_title")?,
        status: row.try_get("status")?,
        submitted_at: row.try_get("submitted_at")?,
    })
}

/// PostgreSQL client for students, opportunities, applications and the
/// community feed
///
/// Each logical mutation runs as a single statement or a single transaction.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Client over a pool that connects on first use, without running migrations
    #[cfg(test)]
    pub(crate) fn connect_lazy(database_url: &str) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new().max_connections(1).connect_lazy(database_url)?;
        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    // ---------------------------------------------------------------- students

    /// Register a student; usernames and e-mails are unique
    pub async fn create_student(&self, req: &CreateStudentRequest) -> Result<Student, PostgresError> {
        let query = format!(
            r#"
            INSERT INTO students (username, email, full_name, domain, skills, interests, academic_background)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {STUDENT_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(req.username.trim())
            .bind(req.email.trim())
            .bind(&req.full_name)
            .bind(&req.domain)
            .bind(&req.skills)
            .bind(&req.interests)
            .bind(&req.academic_background)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| conflict_on_unique(e, "username or email already registered"))?;

        let student = student_from_row(&row)?;
        tracing::info!("Registered student {} ({})", student.id, student.username);
        Ok(student)
    }

    pub async fn get_student(&self, id: i64) -> Result<Student, PostgresError> {
        let query = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("Student {}", id)))?;

        Ok(student_from_row(&row)?)
    }

    /// Apply profile changes and new achievement counters with the recomputed
    /// score in one statement
    ///
    /// Profile fields left as `None` keep their stored values.
    pub async fn update_profile(
        &self,
        id: i64,
        changes: &ProfileChanges,
        profile: &AchievementProfile,
        scorer: &Scorer,
    ) -> Result<Student, PostgresError> {
        let score = scorer.compute_score(profile);

        let query = format!(
            r#"
            UPDATE students SET
                full_name = COALESCE($2, full_name),
                domain = COALESCE($3, domain),
                skills = COALESCE($4, skills),
                interests = COALESCE($5, interests),
                academic_background = COALESCE($6, academic_background),
                hackathons_count = $7,
                internships_count = $8,
                research_papers_count = $9,
                coding_score = $10,
                competition_wins = $11,
                incoscore = $12,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {STUDENT_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(id)
            .bind(&changes.full_name)
            .bind(&changes.domain)
            .bind(&changes.skills)
            .bind(&changes.interests)
            .bind(&changes.academic_background)
            .bind(profile.hackathons)
            .bind(profile.internships)
            .bind(profile.research_papers)
            .bind(profile.coding_score)
            .bind(profile.competition_wins)
            .bind(score)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("Student {}", id)))?;

        tracing::debug!("Student {} InCoScore is now {}", id, score);

        Ok(student_from_row(&row)?)
    }

    /// All students, optionally restricted to one domain, in registration order
    pub async fn list_students(&self, domain: Option<&str>) -> Result<Vec<Student>, PostgresError> {
        let query = format!(
            r#"
            SELECT {STUDENT_COLUMNS}
            FROM students
            WHERE ($1::TEXT IS NULL OR domain = $1)
            ORDER BY id ASC
            "#
        );

        let rows = sqlx::query(&query).bind(domain).fetch_all(&self.pool).await?;

        let students = rows
            .iter()
            .map(student_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(students)
    }

    /// Non-empty student domains, sorted
    pub async fn distinct_domains(&self) -> Result<Vec<String>, PostgresError> {
        let query = r#"
            SELECT DISTINCT domain
            FROM students
            WHERE domain IS NOT NULL AND domain <> ''
            ORDER BY domain
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let domains = rows
            .iter()
            .map(|row| row.try_get("domain"))
            .collect::<Result<Vec<String>, _>>()?;

        Ok(domains)
    }

    /// Recompute every student's score in one transaction
    pub async fn recalculate_all_scores(&self, scorer: &Scorer) -> Result<usize, PostgresError> {
        let mut tx = self.pool.begin().await?;

        let query = format!("SELECT {STUDENT_COLUMNS} FROM students ORDER BY id FOR UPDATE");
        let rows = sqlx::query(&query).fetch_all(&mut *tx).await?;

        for row in &rows {
            let student = student_from_row(row)?;
            let score = scorer.compute_score(&student.achievements);

            sqlx::query("UPDATE students SET incoscore = $2, updated_at = NOW() WHERE id = $1")
                .bind(student.id)
                .bind(score)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!("Recalculated scores for {} students", rows.len());
        Ok(rows.len())
    }

    // ----------------------------------------------------------- opportunities

    /// Titles of every stored opportunity
    pub async fn existing_titles(&self) -> Result<HashSet<String>, PostgresError> {
        let rows = sqlx::query("SELECT title FROM opportunities")
            .fetch_all(&self.pool)
            .await?;

        let titles = rows
            .iter()
            .map(|row| row.try_get("title"))
            .collect::<Result<HashSet<String>, _>>()?;

        Ok(titles)
    }

    async fn insert_opportunity<'e, E>(executor: E, opp: &NewOpportunity) -> Result<Opportunity, PostgresError>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        let query = format!(
            r#"
            INSERT INTO opportunities
                (title, description, university, domain, category, deadline, url,
                 requirements, location, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {OPPORTUNITY_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(&opp.title)
            .bind(&opp.description)
            .bind(&opp.university)
            .bind(&opp.domain)
            .bind(&opp.category)
            .bind(opp.deadline)
            .bind(&opp.url)
            .bind(&opp.requirements)
            .bind(&opp.location)
            .bind(opp.created_by)
            .fetch_one(executor)
            .await?;

        Ok(opportunity_from_row(&row)?)
    }

    pub async fn create_opportunity(&self, opp: &NewOpportunity) -> Result<Opportunity, PostgresError> {
        let created = Self::insert_opportunity(&self.pool, opp).await?;
        tracing::info!("Created opportunity {} \"{}\"", created.id, created.title);
        Ok(created)
    }

    /// Insert a batch of opportunities in one transaction
    pub async fn import_opportunities(&self, batch: &[NewOpportunity]) -> Result<usize, PostgresError> {
        let mut tx = self.pool.begin().await?;

        for opp in batch {
            Self::insert_opportunity(&mut *tx, opp).await?;
        }

        tx.commit().await?;
        Ok(batch.len())
    }

    pub async fn get_opportunity(&self, id: i64) -> Result<Opportunity, PostgresError> {
        let query = format!("SELECT {OPPORTUNITY_COLUMNS} FROM opportunities WHERE id = $1");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("Opportunity {}", id)))?;

        Ok(opportunity_from_row(&row)?)
    }

    /// Active opportunities, newest first, optionally in one domain
    pub async fn list_active_opportunities(
        &self,
        domain: Option<&str>,
    ) -> Result<Vec<Opportunity>, PostgresError> {
        let query = format!(
            r#"
            SELECT {OPPORTUNITY_COLUMNS}
            FROM opportunities
            WHERE is_active AND ($1::TEXT IS NULL OR domain = $1)
            ORDER BY extracted_at DESC, id DESC
            "#
        );

        let rows = sqlx::query(&query).bind(domain).fetch_all(&self.pool).await?;

        Ok(rows
            .iter()
            .map(opportunity_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    /// Opportunities a student created, newest first
    pub async fn list_created_by(&self, student_id: i64) -> Result<Vec<Opportunity>, PostgresError> {
        let query = format!(
            r#"
            SELECT {OPPORTUNITY_COLUMNS}
            FROM opportunities
            WHERE created_by = $1
            ORDER BY extracted_at DESC, id DESC
            "#
        );

        let rows = sqlx::query(&query).bind(student_id).fetch_all(&self.pool).await?;

        Ok(rows
            .iter()
            .map(opportunity_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    /// Lock an opportunity row and check that `actor` created it
    async fn ensure_creator(
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
        actor: i64,
    ) -> Result<(), PostgresError> {
        let row = sqlx::query("SELECT created_by FROM opportunities WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("Opportunity {}", id)))?;

        let created_by: Option<i64> = row.try_get("created_by")?;
        if created_by != Some(actor) {
            return Err(PostgresError::Forbidden(
                "only the creator may modify this opportunity".to_string(),
            ));
        }

        Ok(())
    }

    /// Replace an opportunity's editable fields; creator only
    pub async fn update_opportunity(
        &self,
        id: i64,
        actor: i64,
        opp: &NewOpportunity,
    ) -> Result<Opportunity, PostgresError> {
        let mut tx = self.pool.begin().await?;
        Self::ensure_creator(&mut tx, id, actor).await?;

        let query = format!(
            r#"
            UPDATE opportunities SET
                title = $2,
                description = $3,
                university = $4,
                domain = $5,
                category = $6,
                deadline = COALESCE($7, deadline),
                url = $8,
                requirements = $9,
                location = $10,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {OPPORTUNITY_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(id)
            .bind(&opp.title)
            .bind(&opp.description)
            .bind(&opp.university)
            .bind(&opp.domain)
            .bind(&opp.category)
            .bind(opp.deadline)
            .bind(&opp.url)
            .bind(&opp.requirements)
            .bind(&opp.location)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(opportunity_from_row(&row)?)
    }

    /// Delete an opportunity and its applications; creator only
    pub async fn delete_opportunity(&self, id: i64, actor: i64) -> Result<(), PostgresError> {
        let mut tx = self.pool.begin().await?;
        Self::ensure_creator(&mut tx, id, actor).await?;

        sqlx::query("DELETE FROM opportunities WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!("Deleted opportunity {}", id);
        Ok(())
    }

    /// Flip an opportunity between active and inactive; creator only
    pub async fn toggle_opportunity_status(&self, id: i64, actor: i64) -> Result<Opportunity, PostgresError> {
        let mut tx = self.pool.begin().await?;
        Self::ensure_creator(&mut tx, id, actor).await?;

        let query = format!(
            r#"
            UPDATE opportunities SET is_active = NOT is_active, updated_at = NOW()
            WHERE id = $1
            RETURNING {OPPORTUNITY_COLUMNS}
            "#
        );

        let row = sqlx::query(&query).bind(id).fetch_one(&mut *tx).await?;

        tx.commit().await?;
        Ok(opportunity_from_row(&row)?)
    }

    // ------------------------------------------------------------ applications

    /// Submit an application; a student applies to an opportunity at most once
    pub async fn apply(&self, student_id: i64, opportunity_id: i64) -> Result<Application, PostgresError> {
        let opportunity = self.get_opportunity(opportunity_id).await?;

        let query = r#"
            INSERT INTO applications (student_id, opportunity_id, status)
            VALUES ($1, $2, $3)
            RETURNING id, student_id, opportunity_id, status, submitted_at
        "#;

        let row = sqlx::query(query)
            .bind(student_id)
            .bind(opportunity_id)
            .bind(ApplicationStatus::Submitted)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| conflict_on_unique(e, "already applied to this opportunity"))?;

        Ok(Application {
            id: row.try_get("id")?,
            student_id: row.try_get("student_id")?,
            opportunity_id: row.try_get("opportunity_id")?,
            opportunity_title: opportunity.title,
            status: row.try_get("status")?,
            submitted_at: row.try_get("submitted_at")?,
        })
    }

    /// A student's applications, newest first
    pub async fn list_applications(&self, student_id: i64) -> Result<Vec<Application>, PostgresError> {
        let query = r#"
            SELECT a.id, a.student_id, a.opportunity_id, o.title AS opportunity_title,
                   a.status, a.submitted_at
            FROM applications a
            JOIN opportunities o ON o.id = a.opportunity_id
            WHERE a.student_id = $1
            ORDER BY a.submitted_at DESC, a.id DESC
        "#;

        let rows = sqlx::query(query).bind(student_id).fetch_all(&self.pool).await?;

        Ok(rows
            .iter()
            .map(application_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    // --------------------------------------------------------------- community

    /// Feed posts, newest first, optionally in one domain
    pub async fn list_posts(&self, domain: Option<&str>) -> Result<Vec<Post>, PostgresError> {
        let query = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts
            WHERE ($1::TEXT IS NULL OR domain = $1)
            ORDER BY created_at DESC, id DESC
            "#
        );

        let rows = sqlx::query(&query).bind(domain).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(post_from_row).collect::<Result<Vec<_>, _>>()?)
    }

    pub async fn create_post(
        &self,
        user_id: i64,
        title: &str,
        content: &str,
        domain: Option<&str>,
    ) -> Result<Post, PostgresError> {
        let query = format!(
            r#"
            INSERT INTO posts (user_id, title, content, domain)
            VALUES ($1, $2, $3, $4)
            RETURNING {POST_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(user_id)
            .bind(title)
            .bind(content)
            .bind(domain)
            .fetch_one(&self.pool)
            .await?;

        Ok(post_from_row(&row)?)
    }

    pub async fn get_post(&self, id: i64) -> Result<Post, PostgresError> {
        let query = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("Post {}", id)))?;

        Ok(post_from_row(&row)?)
    }

    /// Comments on a post, oldest first
    pub async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, PostgresError> {
        let query = r#"
            SELECT id, post_id, user_id, content, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at ASC, id ASC
        "#;

        let rows = sqlx::query(query).bind(post_id).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(comment_from_row).collect::<Result<Vec<_>, _>>()?)
    }

    /// Add a comment and bump the post's comment count in one transaction
    pub async fn add_comment(&self, post_id: i64, user_id: i64, content: &str) -> Result<Comment, PostgresError> {
        let mut tx = self.pool.begin().await?;

        let bumped = sqlx::query("UPDATE posts SET comments_count = comments_count + 1 WHERE id = $1")
            .bind(post_id)
            .execute(&mut *tx)
            .await?;

        if bumped.rows_affected() == 0 {
            return Err(PostgresError::NotFound(format!("Post {}", post_id)));
        }

        let row = sqlx::query(
            r#"
            INSERT INTO comments (post_id, user_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, user_id, content, created_at
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(comment_from_row(&row)?)
    }

    /// Like or unlike a post
    ///
    /// Returns whether the post is now liked by the user and the new like count.
    pub async fn toggle_like(&self, post_id: i64, user_id: i64) -> Result<(bool, i32), PostgresError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT id FROM posts WHERE id = $1 FOR UPDATE")
            .bind(post_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("Post {}", post_id)))?;

        let removed = sqlx::query("DELETE FROM likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let (liked, delta) = if removed.rows_affected() > 0 {
            (false, -1)
        } else {
            sqlx::query("INSERT INTO likes (post_id, user_id) VALUES ($1, $2)")
                .bind(post_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
            (true, 1)
        };

        let row = sqlx::query(
            "UPDATE posts SET likes_count = GREATEST(likes_count + $2, 0) WHERE id = $1 RETURNING likes_count",
        )
        .bind(post_id)
        .bind(delta)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        let likes_count: i32 = row.try_get("likes_count")?;
        tracing::debug!("Post {} like toggled by {} (liked: {})", post_id, user_id, liked);

        Ok((liked, likes_count))
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>, PostgresError> {
        let rows = sqlx::query("SELECT id, name, domain, description FROM groups ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        let groups = rows
            .iter()
            .map(|row| {
                Ok(Group {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    domain: row.try_get("domain")?,
                    description: row.try_get("description")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok(groups)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
