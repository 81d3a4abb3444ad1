//! Status classifier — ordered rule table, first match wins.
//!
//! Order matters: the red rules overlap with the green-leaning ones and must
//! dominate them. Anything no rule claims is `Yellow`.

use tracing::debug;

use crate::assessment::models::{
    Answers, LastWorkTiming, MainBlocker, RoleTarget, Status, Urgency, WorkExamples,
};

/// A single classification rule.
#[derive(Debug, Clone, Copy)]
pub struct StatusRule {
    pub id: &'static str,
    pub status: Status,
    pub matches: fn(&Answers) -> bool,
}

/// Evaluated top to bottom.
pub const STATUS_RULES: &[StatusRule] = &[
    StatusRule {
        id: "stale-experience",
        status: Status::Red,
        matches: stale_experience,
    },
    StatusRule {
        id: "unproven-switch",
        status: Status::Red,
        matches: unproven_switch,
    },
    StatusRule {
        id: "urgent-weak-signal",
        status: Status::Red,
        matches: urgent_weak_signal,
    },
    StatusRule {
        id: "ready-same-track",
        status: Status::Green,
        matches: ready_same_track,
    },
    StatusRule {
        id: "ready-cv-only",
        status: Status::Green,
        matches: ready_cv_only,
    },
];

pub const DEFAULT_STATUS: Status = Status::Yellow;

fn stale_experience(a: &Answers) -> bool {
    a.last_work_timing.is_stale()
}

fn unproven_switch(a: &Answers) -> bool {
    a.role_target == RoleTarget::CareerSwitch && a.work_examples.is_weak()
}

fn urgent_weak_signal(a: &Answers) -> bool {
    a.urgency == Urgency::Immediate
        && (a.work_examples.is_weak() || a.last_work_timing == LastWorkTiming::Never)
}

fn ready_same_track(a: &Answers) -> bool {
    a.last_work_timing == LastWorkTiming::LessThanSixMonths
        && matches!(
            a.role_target,
            RoleTarget::SameRole | RoleTarget::SlightStepUp
        )
        && a.work_examples == WorkExamples::RealProduction
}

fn ready_cv_only(a: &Answers) -> bool {
    a.last_work_timing == LastWorkTiming::LessThanSixMonths
        && a.work_examples == WorkExamples::RealProduction
        && a.main_blocker == MainBlocker::NotGettingInterviews
}

/// Returns the status and the id of the rule that produced it (`None` = default).
pub fn classify_with_rule(answers: &Answers) -> (Status, Option<&'static str>) {
    match STATUS_RULES.iter().find(|rule| (rule.matches)(answers)) {
        Some(rule) => {
            debug!(rule = rule.id, status = rule.status.as_str(), "status rule matched");
            (rule.status, Some(rule.id))
        }
        None => {
            debug!(status = DEFAULT_STATUS.as_str(), "no status rule matched, using default");
            (DEFAULT_STATUS, None)
        }
    }
}

pub fn classify(answers: &Answers) -> Status {
    classify_with_rule(answers).0
}
