//! Deployment event → chat message.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::types::InboundEvent;
use crate::error::RelayError;

/// Chat webhook body (Discord-compatible).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub content: String,
}

/// GitHub URL of a single commit.
pub fn commit_url(org: &str, repo: &str, sha: &str) -> String {
    format!("https://github.com/{}/{}/commit/{}", org, repo, sha)
}

/// Build the notification for a deployment event.
///
/// With org, repo and sha present the message links the commit and the site.
/// Otherwise it links the deployment URL. An event with neither is malformed.
pub fn build_message(event: &InboundEvent, site_url: &str) -> Result<OutboundMessage, RelayError> {
    let meta = &event.payload.deployment.meta;
    let commit_message = meta.commit_message.as_str();

    let coordinates = match (
        non_empty(meta.org.as_deref()),
        non_empty(meta.repo.as_deref()),
        non_empty(meta.commit_sha.as_deref()),
    ) {
        (Some(org), Some(repo), Some(sha)) => Some((org, repo, sha)),
        _ => None,
    };

    let content = if let Some((org, repo, sha)) = coordinates {
        info!(org = org, repo = repo, sha = sha, "message_format_commit_link");
        format!(
            "Deployment succeeded! Commit message: `{}`. See the commit [here]({}) and the site [here]({}).",
            commit_message,
            commit_url(org, repo, sha),
            site_url
        )
    } else if let Some(host) = event.deployment_host() {
        info!(host = host, "message_format_deployment_link");
        format!(
            "Deployment succeeded! Commit message: `{}`. Check it out [here](https://{}/).",
            commit_message, host
        )
    } else {
        return Err(RelayError::MalformedPayload(
            "event has neither repository coordinates nor a deployment url".to_string(),
        ));
    };

    Ok(OutboundMessage { content })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
