//! Stateless assessment preview.

use axum::Json;
use serde::Serialize;

use crate::assessment::classifier::classify_with_rule;
use crate::assessment::generator::free_result_for;
use crate::assessment::models::{Answers, FreeResult};
use crate::extract::AppJson;

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    #[serde(flatten)]
    pub result: FreeResult,
    /// Id of the status rule that fired; `None` when the default applied.
    pub matched_rule: Option<&'static str>,
}

/// POST /api/v1/assessment/preview
///
/// Classifies answers without creating a session. Free tier only.
pub async fn handle_preview(AppJson(answers): AppJson<Answers>) -> Json<PreviewResponse> {
    let (status, matched_rule) = classify_with_rule(&answers);
    Json(PreviewResponse {
        result: free_result_for(status, &answers),
        matched_rule,
    })
}
