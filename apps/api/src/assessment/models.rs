use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Survey answers
// ────────────────────────────────────────────────────────────────────────────

/// What kind of role the candidate is going after next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleTarget {
    SameRole,
    SlightStepUp,
    BigStepUp,
    CareerSwitch,
    NotSure,
}

impl RoleTarget {
    pub const ALL: [RoleTarget; 5] = [
        RoleTarget::SameRole,
        RoleTarget::SlightStepUp,
        RoleTarget::BigStepUp,
        RoleTarget::CareerSwitch,
        RoleTarget::NotSure,
    ];
}

/// How long ago the candidate last held a relevant job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LastWorkTiming {
    #[serde(rename = "less-than-6-months")]
    LessThanSixMonths,
    #[serde(rename = "6-12-months")]
    SixToTwelveMonths,
    #[serde(rename = "12-24-months")]
    TwelveToTwentyFourMonths,
    #[serde(rename = "more-than-2-years")]
    MoreThanTwoYears,
    #[serde(rename = "never")]
    Never,
}

impl LastWorkTiming {
    pub const ALL: [LastWorkTiming; 5] = [
        LastWorkTiming::LessThanSixMonths,
        LastWorkTiming::SixToTwelveMonths,
        LastWorkTiming::TwelveToTwentyFourMonths,
        LastWorkTiming::MoreThanTwoYears,
        LastWorkTiming::Never,
    ];

    /// More than two years out, or never employed in the field.
    pub fn is_stale(self) -> bool {
        matches!(self, LastWorkTiming::MoreThanTwoYears | LastWorkTiming::Never)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Urgency {
    Immediate,
    Soon,
    Flexible,
    Exploring,
}

impl Urgency {
    pub const ALL: [Urgency; 4] = [
        Urgency::Immediate,
        Urgency::Soon,
        Urgency::Flexible,
        Urgency::Exploring,
    ];
}

/// Best evidence of work the candidate can show an employer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkExamples {
    RealProduction,
    SomeOutdated,
    PersonalOnly,
    None,
}

impl WorkExamples {
    pub const ALL: [WorkExamples; 4] = [
        WorkExamples::RealProduction,
        WorkExamples::SomeOutdated,
        WorkExamples::PersonalOnly,
        WorkExamples::None,
    ];

    /// Nothing an employer would count as shipped work.
    pub fn is_weak(self) -> bool {
        matches!(self, WorkExamples::None | WorkExamples::PersonalOnly)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MainBlocker {
    NotGettingInterviews,
    FailingInterviews,
    UnclearDirection,
    SkillsGap,
    ConfidenceBurnout,
}

impl MainBlocker {
    pub const ALL: [MainBlocker; 5] = [
        MainBlocker::NotGettingInterviews,
        MainBlocker::FailingInterviews,
        MainBlocker::UnclearDirection,
        MainBlocker::SkillsGap,
        MainBlocker::ConfidenceBurnout,
    ];
}

/// The five survey answers. Immutable once submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Answers {
    pub role_target: RoleTarget,
    pub last_work_timing: LastWorkTiming,
    pub urgency: Urgency,
    pub work_examples: WorkExamples,
    pub main_blocker: MainBlocker,
}

impl Answers {
    /// Every combination of the survey domain (5 × 5 × 4 × 4 × 5).
    pub fn all_combinations() -> impl Iterator<Item = Answers> {
        RoleTarget::ALL.into_iter().flat_map(|role_target| {
            LastWorkTiming::ALL.into_iter().flat_map(move |last_work_timing| {
                Urgency::ALL.into_iter().flat_map(move |urgency| {
                    WorkExamples::ALL.into_iter().flat_map(move |work_examples| {
                        MainBlocker::ALL.into_iter().map(move |main_blocker| Answers {
                            role_target,
                            last_work_timing,
                            urgency,
                            work_examples,
                            main_blocker,
                        })
                    })
                })
            })
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Derived results
// ────────────────────────────────────────────────────────────────────────────

/// Readiness status. Declared in ascending severity so `Red` is the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Green,
    Yellow,
    Red,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Green => "green",
            Status::Yellow => "yellow",
            Status::Red => "red",
        }
    }
}

/// Dedup key for blockers: at most one blocker per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockerCategory {
    ExperienceGap,
    ProofOfWork,
    Positioning,
    CvStory,
    Interviewing,
    Direction,
    Skills,
    Energy,
    Differentiation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blocker {
    pub category: BlockerCategory,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekPlan {
    pub week: u8,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvRewrite {
    pub original: String,
    pub improved: String,
}

/// What the free tier exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeResult {
    pub status: Status,
    pub status_explanation: String,
    pub blockers: Vec<Blocker>,
    pub teaser_action: String,
}

/// Paid tier: the free result plus the full action plan.
/// The free fields are flattened so the JSON is a strict superset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaidResult {
    #[serde(flatten)]
    pub free: FreeResult,
    pub weekly_plan: Vec<WeekPlan>,
    pub cv_rewrite_bullets: Vec<CvRewrite>,
    pub roles_to_avoid: Vec<String>,
    pub pivot_suggestion: Option<String>,
}

/// Both tiers, always computed together from one answers snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResults {
    pub free: FreeResult,
    pub paid: PaidResult,
    pub generated_at: DateTime<Utc>,
}
