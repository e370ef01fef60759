//! Vercel deployment webhook payload.
//!
//! Only the commit message, the repository coordinates and the deployment URL
//! are typed. Identifiers kept for logging are raw JSON values, and every other
//! provider field is ignored, whatever its shape.

use serde::Deserialize;
use serde_json::Value;

use crate::error::RelayError;

/// Top-level webhook envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundEvent {
    /// Logged only, so any JSON shape is accepted
    #[serde(default)]
    pub id: Option<Value>,
    /// Event type, e.g. `deployment.succeeded`
    #[serde(default, rename = "type")]
    pub event_type: Option<Value>,
    pub payload: EventPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventPayload {
    pub deployment: Deployment,
    /// Deployment hostname without scheme, e.g. `my-app-abc.vercel.app`
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Deployment {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub url: Option<String>,
    pub meta: DeploymentMeta,
}

/// Git metadata Vercel attaches to deployments built from GitHub.
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentMeta {
    #[serde(rename = "githubCommitMessage")]
    pub commit_message: String,
    #[serde(default, rename = "githubCommitSha")]
    pub commit_sha: Option<String>,
    #[serde(default, rename = "githubOrg")]
    pub org: Option<String>,
    #[serde(default, rename = "githubRepo")]
    pub repo: Option<String>,
}

impl InboundEvent {
    /// Parse the raw request body.
    pub fn parse(raw_body: &[u8]) -> Result<Self, RelayError> {
        serde_json::from_slice(raw_body).map_err(|e| RelayError::MalformedPayload(e.to_string()))
    }

    /// Hostname of the deployment, preferring the top-level payload URL.
    pub fn deployment_host(&self) -> Option<&str> {
        self.payload
            .url
            .as_deref()
            .or(self.payload.deployment.url.as_deref())
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_EVENT: &str = r#"{
        "id": "uev_123",
        "type": "deployment.succeeded",
        "createdAt": 1718000000000,
        "payload": {
            "user": {"id": "usr_1"},
            "team": {"id": "team_1"},
            "project": {"id": "prj_1"},
            "deployment": {
                "id": "dpl_1",
                "customEnvironmentId": null,
                "meta": {
                    "githubCommitAuthorName": "Ada",
                    "githubCommitMessage": "fix bug",
                    "githubCommitSha": "abc123",
                    "githubOrg": "acme",
                    "githubRepo": "widgets",
                    "githubRepoVisibility": "private",
                    "someFutureField": true
                },
                "name": "widgets",
                "url": "widgets-abc.vercel.app",
                "inspectorUrl": "https://vercel.com/acme/widgets/dpl_1"
            },
            "links": {"deployment": "https://vercel.com/d", "project": "https://vercel.com/p"},
            "name": "widgets",
            "plan": "hobby",
            "regions": ["iad1"],
            "target": "production",
            "type": "LAMBDAS",
            "url": "widgets-abc.vercel.app"
        }
    }"#;

    #[test]
    fn test_parse_full_event() {
        let event = InboundEvent::parse(FULL_EVENT.as_bytes()).unwrap();
        assert_eq!(
            event.event_type.as_ref().and_then(Value::as_str),
            Some("deployment.succeeded")
        );
        assert_eq!(
            event.payload.deployment.id.as_ref().and_then(Value::as_str),
            Some("dpl_1")
        );
        let meta = &event.payload.deployment.meta;
        assert_eq!(meta.commit_message, "fix bug");
        assert_eq!(meta.org.as_deref(), Some("acme"));
        assert_eq!(meta.repo.as_deref(), Some("widgets"));
        assert_eq!(meta.commit_sha.as_deref(), Some("abc123"));
        assert_eq!(event.deployment_host(), Some("widgets-abc.vercel.app"));
    }

    #[test]
    fn test_parse_minimal_event() {
        let body = br#"{"payload":{"deployment":{"meta":{"githubCommitMessage":"fix bug"}},"url":"x.vercel.app"}}"#;
        let event = InboundEvent::parse(body).unwrap();
        assert!(event.id.is_none());
        assert_eq!(event.payload.deployment.meta.commit_message, "fix bug");
        assert_eq!(event.deployment_host(), Some("x.vercel.app"));
    }

    #[test]
    fn test_parse_tolerates_unexpected_types_in_unused_fields() {
        let bodies = [
            r#"{"payload":{"regions":null,"deployment":{"meta":{"githubCommitMessage":"m"}},"url":"x.vercel.app"}}"#,
            r#"{"id":42,"payload":{"deployment":{"meta":{"githubCommitMessage":"m"}},"url":"x.vercel.app"}}"#,
            r#"{"createdAt":1718000000000.5,"payload":{"deployment":{"meta":{"githubCommitMessage":"m"}},"url":"x.vercel.app"}}"#,
            r#"{"createdAt":"yesterday","type":null,"payload":{"deployment":{"id":7,"meta":{"githubCommitMessage":"m","githubRepoVisibility":1}},"url":"x.vercel.app"}}"#,
            r#"{"payload":{"user":"usr_1","team":[],"links":null,"plan":3,"deployment":{"inspectorUrl":false,"meta":{"githubCommitMessage":"m"}},"url":"x.vercel.app"}}"#,
        ];

        for body in bodies {
            let event = InboundEvent::parse(body.as_bytes())
                .unwrap_or_else(|e| panic!("{body}: {e}"));
            assert_eq!(event.payload.deployment.meta.commit_message, "m");
            assert_eq!(event.deployment_host(), Some("x.vercel.app"));
        }

        let event = InboundEvent::parse(bodies[1].as_bytes()).unwrap();
        assert_eq!(event.id, Some(Value::from(42)));
    }

    #[test]
    fn test_deployment_host_falls_back_to_deployment_url() {
        let body = br#"{"payload":{"deployment":{"url":"dep.vercel.app","meta":{"githubCommitMessage":"m"}}}}"#;
        let event = InboundEvent::parse(body).unwrap();
        assert_eq!(event.deployment_host(), Some("dep.vercel.app"));
    }

    #[test]
    fn test_parse_missing_commit_message() {
        let body = br#"{"payload":{"deployment":{"meta":{}},"url":"x.vercel.app"}}"#;
        assert!(matches!(
            InboundEvent::parse(body),
            Err(RelayError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_parse_not_json() {
        assert!(matches!(
            InboundEvent::parse(b"githubCommitMessage=fix"),
            Err(RelayError::MalformedPayload(_))
        ));
    }
}
