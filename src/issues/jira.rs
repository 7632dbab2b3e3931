use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use super::{CreatedIssue, IssueKey, IssueTracker, IssueType, NewIssue, Project};
use crate::config::TrackerCredentials;
use crate::errors::{ConnectError, TrackerError};

const API_PREFIX: &str = "/rest/api/2";

/// Jira Cloud REST client authenticated with e-mail + API token.
pub struct JiraClient {
    client: reqwest::Client,
    site: String,
    api_base: String,
    username: String,
    token: String,
    cloud_suffix: String,
}

#[derive(Debug, Deserialize)]
struct Myself {
    #[serde(rename = "displayName")]
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct ProjectDetails {
    #[serde(rename = "issueTypes", default)]
    issue_types: Vec<IssueType>,
}

#[derive(Debug, Deserialize)]
struct CreatedIssueResponse {
    key: String,
}

impl JiraClient {
    pub fn new(credentials: &TrackerCredentials, cloud_suffix: &str) -> Self {
        let site = credentials.url.trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            api_base: site.clone(),
            site,
            username: credentials.username.clone(),
            token: credentials.token.clone(),
            cloud_suffix: cloud_suffix.to_string(),
        }
    }

    /// Send REST calls to `api_base` instead of the site URL.
    ///
    /// Browse links still point at the site.
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn browse_link(&self, key: &IssueKey) -> String {
        format!("{}/browse/{}", self.site, key)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.api_base, API_PREFIX, path)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(self.url(path))
            .basic_auth(&self.username, Some(&self.token))
            .header("Accept", "application/json")
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, TrackerError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TrackerError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.json::<T>().await?)
    }

    fn classify(&self, status: StatusCode, body: String) -> ConnectError {
        match status {
            StatusCode::NOT_FOUND => ConnectError::SiteNotFound(self.site.clone()),
            StatusCode::UNAUTHORIZED => ConnectError::AuthenticationFailed {
                username: self.username.clone(),
            },
            other => ConnectError::Connection(format!("HTTP {}: {}", other.as_u16(), body)),
        }
    }
}

/// Body of `POST /issue`; the parent link is only present for subtasks.
fn issue_payload(issue: &NewIssue) -> serde_json::Value {
    let mut fields = json!({
        "project": { "key": issue.project_key },
        "summary": issue.summary,
        "description": issue.description,
        "issuetype": { "name": issue.issue_type },
    });
    if let Some(parent) = &issue.parent {
        fields["parent"] = json!({ "key": parent.as_str() });
    }
    json!({ "fields": fields })
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn authenticate(&self) -> Result<String, ConnectError> {
        if !self.site.ends_with(&self.cloud_suffix) {
            return Err(ConnectError::InvalidUrl {
                url: self.site.clone(),
                suffix: self.cloud_suffix.clone(),
            });
        }

        tracing::info!(site = %self.site, username = %self.username, "connecting to Jira Cloud");

        let resp = self
            .get("/myself")
            .send()
            .await
            .map_err(|e| ConnectError::Connection(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let err = self.classify(status, body);
            tracing::warn!(error = %err, "Jira authentication failed");
            return Err(err);
        }

        let me: Myself = resp
            .json()
            .await
            .map_err(|e| ConnectError::Connection(e.to_string()))?;
        tracing::info!(display_name = %me.display_name, "connected to Jira");
        Ok(me.display_name)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, TrackerError> {
        let resp = self.get("/project").send().await?;
        let projects: Vec<Project> = Self::read_json(resp).await?;
        tracing::debug!(count = projects.len(), "retrieved projects");
        Ok(projects)
    }

    async fn list_issue_types(&self, project_key: &str) -> Result<Vec<IssueType>, TrackerError> {
        let resp = self.get(&format!("/project/{}", project_key)).send().await?;
        let details: ProjectDetails = Self::read_json(resp).await?;
        Ok(details.issue_types)
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue, TrackerError> {
        tracing::debug!(
            project = %issue.project_key,
            issue_type = %issue.issue_type,
            parent = ?issue.parent.as_ref().map(IssueKey::as_str),
            "creating issue"
        );

        let resp = self
            .client
            .post(self.url("/issue"))
            .basic_auth(&self.username, Some(&self.token))
            .header("Accept", "application/json")
            .json(&issue_payload(issue))
            .send()
            .await?;
        let created: CreatedIssueResponse = Self::read_json(resp).await?;
        let key = IssueKey::parse(&created.key)?;

        Ok(CreatedIssue {
            link: self.browse_link(&key),
            key,
        })
    }
}
