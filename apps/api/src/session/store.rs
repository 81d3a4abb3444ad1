//! Session store — one user's answers, CV metadata, paid flag and derived results.
//!
//! State lives in a `watch` channel of `Arc<SessionSnapshot>`. Every mutation
//! clones the current snapshot, edits the clone and swaps it in under the
//! channel's write lock, so observers only ever see complete snapshots.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::assessment::generator::generate_results;
use crate::assessment::models::{Answers, AssessmentResults, FreeResult, PaidResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CvUpload {
    pub filename: String,
    pub text: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Immutable view of a session at one revision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// Bumped on every published change, including `reset`.
    pub revision: u64,
    pub cv: Option<CvUpload>,
    pub answers: Option<Answers>,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    /// Free and paid results, present together or not at all.
    pub results: Option<AssessmentResults>,
}

impl SessionSnapshot {
    pub fn free_result(&self) -> Option<&FreeResult> {
        self.results.as_ref().map(|r| &r.free)
    }

    pub fn paid_result(&self) -> Option<&PaidResult> {
        self.results.as_ref().map(|r| &r.paid)
    }
}

pub struct SessionStore {
    id: Uuid,
    created_at: DateTime<Utc>,
    /// Last time the session was looked up; drives idle eviction.
    last_seen: Mutex<Instant>,
    tx: watch::Sender<Arc<SessionSnapshot>>,
}

impl SessionStore {
    pub fn new(id: Uuid) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(SessionSnapshot::default()));
        Self {
            id,
            created_at: Utc::now(),
            last_seen: Mutex::new(Instant::now()),
            tx,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn touch(&self) {
        *self.last_seen.lock() = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last_seen.lock().elapsed()
    }

    pub fn snapshot(&self) -> Arc<SessionSnapshot> {
        Arc::clone(&self.tx.borrow())
    }

    /// Receives every published snapshot from now on.
    pub fn subscribe(&self) -> watch::Receiver<Arc<SessionSnapshot>> {
        self.tx.subscribe()
    }

    /// Stores CV metadata. Results are not recomputed.
    pub fn set_cv_data(
        &self,
        filename: impl Into<String>,
        text: impl Into<String>,
    ) -> Arc<SessionSnapshot> {
        let cv = CvUpload {
            filename: filename.into(),
            text: text.into(),
            uploaded_at: Utc::now(),
        };
        info!(session_id = %self.id, filename = %cv.filename, chars = cv.text.chars().count(), "CV stored");
        self.update(move |current| {
            Some(SessionSnapshot {
                cv: Some(cv),
                ..current.clone()
            })
        })
    }

    /// Stores the answers and regenerates both result tiers in one change.
    pub fn set_answers(&self, answers: Answers) -> Arc<SessionSnapshot> {
        let results = generate_results(&answers);
        info!(
            session_id = %self.id,
            status = results.free.status.as_str(),
            "Answers submitted"
        );
        self.update(move |current| {
            Some(SessionSnapshot {
                answers: Some(answers),
                results: Some(results),
                ..current.clone()
            })
        })
    }

    /// Opens the paid gate. Already-paid sessions are left untouched and
    /// observers are not notified.
    pub fn mark_as_paid(&self) -> Arc<SessionSnapshot> {
        let session_id = self.id;
        self.update(move |current| {
            if current.is_paid {
                debug!(%session_id, "Session already paid");
                return None;
            }
            info!(%session_id, "Session marked as paid");
            Some(SessionSnapshot {
                is_paid: true,
                paid_at: Some(Utc::now()),
                ..current.clone()
            })
        })
    }

    /// Back to the empty initial state. The revision keeps counting.
    pub fn reset(&self) -> Arc<SessionSnapshot> {
        info!(session_id = %self.id, "Session reset");
        self.update(|_| Some(SessionSnapshot::default()))
    }

    /// Applies `change` to the current snapshot. `None` means nothing changed.
    fn update<F>(&self, change: F) -> Arc<SessionSnapshot>
    where
        F: FnOnce(&SessionSnapshot) -> Option<SessionSnapshot>,
    {
        let mut latest: Option<Arc<SessionSnapshot>> = None;
        self.tx.send_if_modified(|current| match change(&**current) {
            Some(mut next) => {
                next.revision = current.revision + 1;
                let next = Arc::new(next);
                latest = Some(Arc::clone(&next));
                *current = next;
                true
            }
            None => {
                latest = Some(Arc::clone(current));
                false
            }
        });
        latest.unwrap_or_else(|| self.snapshot())
    }
}
