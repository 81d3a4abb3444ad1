//! Blocker generator.
//!
//! Walks an ordered rule table (timing → work examples → role target → main
//! blocker), keeps at most one blocker per `BlockerCategory`, stops at
//! `MAX_BLOCKERS`, then pads with generic fillers whose category is still free.

use crate::assessment::models::{
    Answers, Blocker, BlockerCategory, LastWorkTiming, MainBlocker, RoleTarget, Status,
    WorkExamples,
};

pub const MAX_BLOCKERS: usize = 3;

struct BlockerRule {
    category: BlockerCategory,
    applies: fn(&Answers) -> bool,
    title: &'static str,
    description: &'static str,
}

const BLOCKER_RULES: &[BlockerRule] = &[
    // Timing
    BlockerRule {
        category: BlockerCategory::ExperienceGap,
        applies: |a| a.last_work_timing.is_stale(),
        title: "Your experience reads as out of date",
        description: "With more than two years since relevant work (or none yet), screeners \
                      assume your skills have drifted before they look at anything else.",
    },
    BlockerRule {
        category: BlockerCategory::ExperienceGap,
        applies: |a| a.last_work_timing == LastWorkTiming::TwelveToTwentyFourMonths,
        title: "Unexplained gap on your CV",
        description: "A 12-24 month gap raises questions. Without a short, confident \
                      explanation and something recent to show, it becomes the first \
                      objection.",
    },
    // Work examples
    BlockerRule {
        category: BlockerCategory::ProofOfWork,
        applies: |a| a.work_examples.is_weak(),
        title: "No proof of real-world work",
        description: "Personal or missing examples don't show employers you can deliver \
                      under real constraints like deadlines, users and teammates.",
    },
    BlockerRule {
        category: BlockerCategory::ProofOfWork,
        applies: |a| a.work_examples == WorkExamples::SomeOutdated,
        title: "Your best examples are getting old",
        description: "Outdated work samples suggest you haven't kept up with current tools \
                      and practices, even if you have.",
    },
    // Role target
    BlockerRule {
        category: BlockerCategory::Positioning,
        applies: |a| a.role_target == RoleTarget::CareerSwitch,
        title: "Career switch without a bridge",
        description: "Employers struggle to see how your previous roles translate. You need \
                      a clear narrative and evidence in the new field.",
    },
    BlockerRule {
        category: BlockerCategory::Positioning,
        applies: |a| a.role_target == RoleTarget::BigStepUp,
        title: "Aiming above your proven level",
        description: "A big step up means competing with people who already hold that title. \
                      Your CV has to show you've done the work, not just the job.",
    },
    // Main blocker
    BlockerRule {
        category: BlockerCategory::CvStory,
        applies: |a| a.main_blocker == MainBlocker::NotGettingInterviews,
        title: "CV isn't converting to interviews",
        description: "Your CV is being filtered out before a human engages with it, usually \
                      because it lists duties instead of results.",
    },
    BlockerRule {
        category: BlockerCategory::Interviewing,
        applies: |a| a.main_blocker == MainBlocker::FailingInterviews,
        title: "Interviews aren't turning into offers",
        description: "You're getting the chance but losing it in the room. That usually means \
                      unclear stories or weak examples of impact.",
    },
    BlockerRule {
        category: BlockerCategory::Direction,
        applies: |a| a.main_blocker == MainBlocker::UnclearDirection,
        title: "No clear target role",
        description: "Applying to a wide spread of roles dilutes your CV and makes every \
                      application weaker.",
    },
    BlockerRule {
        category: BlockerCategory::Skills,
        applies: |a| a.main_blocker == MainBlocker::SkillsGap,
        title: "Skills gap against target roles",
        description: "The roles you want list requirements you can't yet evidence, so you're \
                      screened out on keywords.",
    },
    BlockerRule {
        category: BlockerCategory::Energy,
        applies: |a| a.main_blocker == MainBlocker::ConfidenceBurnout,
        title: "Low energy is limiting your search",
        description: "Burnout shows up as fewer, less tailored applications and flatter \
                      interviews. Pace matters as much as volume.",
    },
];

const FILLER_BLOCKERS: &[(BlockerCategory, &str, &str)] = &[
    (
        BlockerCategory::CvStory,
        "CV doesn't tell a clear story",
        "Your CV reads as a list of jobs rather than a case for the role you want next.",
    ),
    (
        BlockerCategory::Differentiation,
        "Applications blend into the pile",
        "Nothing in your application makes a recruiter stop and look twice compared to \
         other candidates.",
    ),
];

/// Up to three blockers, no two sharing a category.
pub fn blockers(answers: &Answers, _status: Status) -> Vec<Blocker> {
    let mut out: Vec<Blocker> = Vec::with_capacity(MAX_BLOCKERS);

    for rule in BLOCKER_RULES {
        if out.len() >= MAX_BLOCKERS {
            break;
        }
        if (rule.applies)(answers) && !has_category(&out, rule.category) {
            out.push(Blocker {
                category: rule.category,
                title: rule.title.to_string(),
                description: rule.description.to_string(),
            });
        }
    }

    for (category, title, description) in FILLER_BLOCKERS {
        if out.len() >= MAX_BLOCKERS {
            break;
        }
        if !has_category(&out, *category) {
            out.push(Blocker {
                category: *category,
                title: title.to_string(),
                description: description.to_string(),
            });
        }
    }

    out
}

fn has_category(blockers: &[Blocker], category: BlockerCategory) -> bool {
    blockers.iter().any(|b| b.category == category)
}
