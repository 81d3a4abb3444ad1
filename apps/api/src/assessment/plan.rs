//! Paid-tier plan content: weekly plan, CV rewrite examples, roles to avoid,
//! pivot suggestion.

use crate::assessment::models::{
    Answers, CvRewrite, MainBlocker, RoleTarget, Status, Urgency, WeekPlan,
};

pub const PLAN_WEEKS: usize = 4;
pub const MAX_ROLES_TO_AVOID: usize = 4;

const RED_PLAN: [(&str, &str); PLAN_WEEKS] = [
    (
        "Stop the bleed",
        "Pause untargeted applications. List the roles you can credibly win today and the \
         evidence each one needs.",
    ),
    (
        "Build one piece of proof",
        "Ship a small, real project or contribution in your target area and document the \
         problem, approach and result.",
    ),
    (
        "Rebuild your CV around the proof",
        "Lead with the new work, reframe older roles around transferable results and address \
         any gap in one confident line.",
    ),
    (
        "Relaunch with ten targeted applications",
        "Apply only to roles that match your evidence, each with a tailored summary and a \
         direct message to the hiring team.",
    ),
];

const YELLOW_PLAN: [(&str, &str); PLAN_WEEKS] = [
    (
        "Pick your lane",
        "Choose one target role family and collect five live job ads to calibrate your \
         keywords and examples against.",
    ),
    (
        "Refresh your evidence",
        "Update your two strongest examples with current tools, numbers and links so they \
         read as recent.",
    ),
    (
        "Rewrite for results",
        "Convert every CV bullet into action plus measurable outcome and cut anything that \
         doesn't support your target role.",
    ),
    (
        "Apply and practice in parallel",
        "Send fifteen tailored applications and run two mock interviews on the stories your \
         CV now promises.",
    ),
];

const GREEN_PLAN: [(&str, &str); PLAN_WEEKS] = [
    (
        "Sharpen the headline",
        "Rewrite your CV summary and LinkedIn headline around the role you want and your \
         single strongest result.",
    ),
    (
        "Tailor for your top targets",
        "Build three role-specific CV variants and reorder bullets so the most relevant \
         outcomes come first.",
    ),
    (
        "Go direct",
        "Reach out to hiring managers and former colleagues at ten target companies instead \
         of relying on job boards alone.",
    ),
    (
        "Convert interviews to offers",
        "Prepare five impact stories, research each company's current problems and follow \
         up within a day of every interview.",
    ),
];

/// Exactly `PLAN_WEEKS` entries, numbered from 1, selected by status only.
pub fn weekly_plan(_answers: &Answers, status: Status) -> Vec<WeekPlan> {
    let plan = match status {
        Status::Red => &RED_PLAN,
        Status::Yellow => &YELLOW_PLAN,
        Status::Green => &GREEN_PLAN,
    };
    plan.iter()
        .zip(1u8..)
        .map(|((title, description), week)| WeekPlan {
            week,
            title: title.to_string(),
            description: description.to_string(),
        })
        .collect()
}

const CV_REWRITES: &[(&str, &str)] = &[
    (
        "Responsible for managing the team's deployment process.",
        "Cut deployment time from 2 hours to 15 minutes by automating the release pipeline \
         for a team of 8.",
    ),
    (
        "Worked on the customer dashboard.",
        "Rebuilt the customer dashboard's reporting view, reducing support tickets about \
         billing by 30%.",
    ),
    (
        "Helped improve system performance.",
        "Profiled and fixed the three slowest API endpoints, lowering p95 latency from 900ms \
         to 250ms.",
    ),
    (
        "Participated in code reviews and team meetings.",
        "Reviewed ~40 pull requests a month and introduced a checklist that halved \
         post-release defects.",
    ),
    (
        "Various duties related to data analysis.",
        "Built a weekly churn report used by leadership to prioritise retention work, \
         informing a $200k budget decision.",
    ),
];

/// Static before/after catalog; independent of the answers.
pub fn cv_rewrite_bullets() -> Vec<CvRewrite> {
    CV_REWRITES
        .iter()
        .map(|(original, improved)| CvRewrite {
            original: original.to_string(),
            improved: improved.to_string(),
        })
        .collect()
}

struct RoleRule {
    applies: fn(&Answers) -> bool,
    role: &'static str,
}

const ROLE_RULES: &[RoleRule] = &[
    RoleRule {
        applies: |a| a.role_target == RoleTarget::BigStepUp,
        role: "Lead or head-of roles more than one level above your last title",
    },
    RoleRule {
        applies: |a| a.role_target == RoleTarget::CareerSwitch && a.work_examples.is_weak(),
        role: "Mid-level roles in your new field that require shipped production work",
    },
    RoleRule {
        applies: |a| a.last_work_timing.is_stale(),
        role: "Fast-paced startup roles expecting full productivity from day one",
    },
    RoleRule {
        applies: |a| a.main_blocker == MainBlocker::FailingInterviews,
        role: "Roles with long multi-stage technical loops until you've practised",
    },
    RoleRule {
        applies: |a| a.urgency == Urgency::Immediate,
        role: "Large companies with three-month hiring processes while you need income soon",
    },
    RoleRule {
        applies: |a| a.main_blocker == MainBlocker::SkillsGap,
        role: "Roles listing your gap skills as hard requirements",
    },
    RoleRule {
        applies: |a| a.main_blocker == MainBlocker::UnclearDirection,
        role: "Generalist \"wear many hats\" roles that deepen the direction problem",
    },
];

const FALLBACK_ROLES_TO_AVOID: [&str; 2] = [
    "Roles where you meet less than half of the listed requirements",
    "Roles you'd apply to only because they're available",
];

/// Specific roles first (at most four); the two generic entries only when
/// nothing specific matched.
pub fn roles_to_avoid(answers: &Answers) -> Vec<String> {
    let roles: Vec<String> = ROLE_RULES
        .iter()
        .filter(|rule| (rule.applies)(answers))
        .take(MAX_ROLES_TO_AVOID)
        .map(|rule| rule.role.to_string())
        .collect();

    if roles.is_empty() {
        FALLBACK_ROLES_TO_AVOID
            .iter()
            .map(|r| r.to_string())
            .collect()
    } else {
        roles
    }
}

pub fn pivot_suggestion(answers: &Answers) -> Option<String> {
    let text = match (answers.role_target, answers.main_blocker) {
        (RoleTarget::CareerSwitch, _) => {
            "Consider an adjacent role first: one that uses what you already know in the new \
             field's environment. It's a shorter bridge than a straight jump."
        }
        (RoleTarget::NotSure, _) => {
            "Start by listing the tasks from past roles you'd happily do again. Roles built \
             around those tasks are your most credible next step."
        }
        (_, MainBlocker::SkillsGap) => {
            "Look at roles that need most of what you have and teach the rest on the job. \
             Closing one key gap in a paying role beats closing all of them before applying."
        }
        _ => return None,
    };
    Some(text.to_string())
}
