//! Human-readable status explanation and the free-tier teaser action.

use crate::assessment::models::{
    Answers, LastWorkTiming, MainBlocker, RoleTarget, Status, Urgency, WorkExamples,
};

/// Picks the most specific explanation for the status. Every branch falls back
/// to a generic message for that status.
pub fn explain(status: Status, answers: &Answers) -> String {
    let text = match status {
        Status::Red => {
            if answers.last_work_timing == LastWorkTiming::Never {
                "You haven't held a role in this field yet, so employers have nothing recent to \
                 judge you on. Applying widely right now will mostly produce silence. Build a \
                 small body of proof first, then apply with it front and centre."
            } else if answers.last_work_timing.is_stale() {
                "Your most recent relevant experience is more than two years old. Screeners read \
                 that as a skills-currency risk before they read anything else. Close the gap \
                 with fresh, visible work before sending more applications."
            } else if answers.role_target == RoleTarget::CareerSwitch
                && answers.work_examples.is_weak()
            {
                "You're switching careers without production work in the new field. Hiring \
                 managers can't map your past roles to their needs on their own, so the switch \
                 has to be proven with concrete examples before it will land."
            } else if answers.urgency == Urgency::Immediate {
                "You need a job quickly, but your current evidence is thin. That combination \
                 pushes people into mass-applying, which rarely works. A short, focused sprint on \
                 proof of work will get you to offers faster than volume."
            } else {
                "Right now your applications are unlikely to convert. There are fundamental gaps \
                 to address before applying will be productive."
            }
        }
        Status::Yellow => {
            if answers.last_work_timing == LastWorkTiming::TwelveToTwentyFourMonths {
                "You have relevant experience, but there's a noticeable gap since your last \
                 role. You're employable; the gap just needs to be explained and bridged with \
                 something recent."
            } else if answers.work_examples == WorkExamples::SomeOutdated {
                "Your background is solid, but your strongest examples are getting old. \
                 Refreshing one or two of them will change how current you look on paper."
            } else if answers.role_target == RoleTarget::BigStepUp {
                "You're aiming a level or two above your last role. It's achievable, but your \
                 CV needs to show you already operate at that level, not just that you want to."
            } else if answers.role_target == RoleTarget::CareerSwitch {
                "Your switch is credible because you have real work to point to, but the \
                 connection between your past roles and the new field isn't obvious yet. Make it \
                 explicit."
            } else if answers.main_blocker == MainBlocker::FailingInterviews {
                "You're getting in front of employers, which means your CV works. The drop-off \
                 happens in interviews, and that's a fixable, practice-driven problem."
            } else {
                "You're in the middle ground: employable, but not standing out. A few targeted \
                 changes will move you from maybe to yes."
            }
        }
        Status::Green => {
            if answers.main_blocker == MainBlocker::NotGettingInterviews {
                "Your experience is current and relevant, so the problem isn't your background. \
                 It's how your CV presents it. Reframing your bullets around outcomes and \
                 tailoring them per role should turn applications into interviews."
            } else if answers.main_blocker == MainBlocker::FailingInterviews {
                "You're ready on paper and already getting interviews. Sharpen how you tell your \
                 stories in the room and the offers should follow."
            } else if answers.main_blocker == MainBlocker::ConfidenceBurnout {
                "On paper you're in a strong position. The main risk is energy, not experience, \
                 so pace your search and lead with the recent wins you already have."
            } else {
                "You're in a strong position with recent, relevant experience. Minor tuning of \
                 your positioning and targeting is all that's needed."
            }
        }
    };
    text.to_string()
}

/// One free-tier action item, chosen by status and refined by the main blocker.
pub fn teaser_action(status: Status, answers: &Answers) -> String {
    let text = match (status, answers.main_blocker) {
        (Status::Red, _) if answers.work_examples.is_weak() => {
            "This week: pick one small, real problem in your target field and ship a working \
             solution you can link from your CV."
        }
        (Status::Red, _) => {
            "This week: pause mass applications and write down the three most recent things \
             you've built or delivered, with one number each."
        }
        (Status::Yellow, MainBlocker::FailingInterviews) => {
            "This week: record yourself answering \"tell me about a project you're proud of\" \
             and cut it down to a two-minute story with a clear result."
        }
        (Status::Yellow, MainBlocker::UnclearDirection) => {
            "This week: shortlist five job ads you'd genuinely accept and note the three \
             requirements they all share."
        }
        (Status::Yellow, _) => {
            "This week: rewrite the top three bullets of your most recent role so each one ends \
             with a measurable result."
        }
        (Status::Green, MainBlocker::NotGettingInterviews) => {
            "This week: rewrite your CV summary so the first line states the role you want and \
             the strongest result you've delivered."
        }
        (Status::Green, _) => {
            "This week: tailor your CV to your top three target roles and send those \
             applications before anything else."
        }
    };
    text.to_string()
}
