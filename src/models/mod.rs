// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AchievementProfile, Application, ApplicationStatus, Category, ClassificationResult, Comment,
    Domain, Group, LeaderboardEntry, NewOpportunity, Opportunity, Post, ProfileChanges, ScoreWeights,
    ScrapedRecord, Source, Student, UnknownLabel,
};
pub use requests::{
    ActorQuery, ApplyRequest, ClassifyRequest, CreateCommentRequest, CreateOpportunityRequest,
    CreatePostRequest, CreateStudentRequest, DomainFilter, LeaderboardQuery, LikeRequest,
    LimitQuery, UpdateProfileRequest, UpdateOpportunityRequest,
};
pub use responses::{
    ErrorResponse, HealthResponse, LeaderboardResponse, LikeResponse, MessageResponse,
    PostDetailResponse, ScrapeResponse,
};
