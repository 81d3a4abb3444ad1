//! Assessment pipeline: classify → explain → blockers → teaser → paid plan.
//! Both tiers come out of one call so they can never disagree.

use chrono::Utc;
use tracing::info;

use crate::assessment::blockers::blockers;
use crate::assessment::classifier::classify;
use crate::assessment::explanation::{explain, teaser_action};
use crate::assessment::models::{Answers, AssessmentResults, FreeResult, PaidResult, Status};
use crate::assessment::plan::{cv_rewrite_bullets, pivot_suggestion, roles_to_avoid, weekly_plan};

pub fn generate_free_result(answers: &Answers) -> FreeResult {
    free_result_for(classify(answers), answers)
}

/// Builds the free tier for an already classified status.
pub fn free_result_for(status: Status, answers: &Answers) -> FreeResult {
    FreeResult {
        status,
        status_explanation: explain(status, answers),
        blockers: blockers(answers, status),
        teaser_action: teaser_action(status, answers),
    }
}

pub fn generate_results(answers: &Answers) -> AssessmentResults {
    let free = generate_free_result(answers);
    let status = free.status;

    let paid = PaidResult {
        free: free.clone(),
        weekly_plan: weekly_plan(answers, status),
        cv_rewrite_bullets: cv_rewrite_bullets(),
        roles_to_avoid: roles_to_avoid(answers),
        pivot_suggestion: pivot_suggestion(answers),
    };

    info!(
        status = status.as_str(),
        blockers = free.blockers.len(),
        roles_to_avoid = paid.roles_to_avoid.len(),
        has_pivot = paid.pivot_suggestion.is_some(),
        "Assessment generated"
    );

    AssessmentResults {
        free,
        paid,
        generated_at: Utc::now(),
    }
}
