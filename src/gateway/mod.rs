//! The REST boundary between the canvas and the remote workflow service.
//!
//! Two layers live here. [`WorkflowClient`] is a thin async wrapper over the
//! service's HTTP endpoints, one method per endpoint, with no knowledge of
//! any particular canvas. [`WorkflowGateway`] sits on top and binds one open
//! canvas to one stored workflow: it remembers the workflow id across saves
//! and picks the create or update path accordingly.
//!
//! Persistence is all-or-nothing. A save either lands on the service or
//! surfaces a single [`GatewayError`]; there is no retry, no queue, and no
//! partial write, and a failed call never touches the [`CanvasModel`].

pub mod types;

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::GatewayError;
use crate::model::CanvasModel;

use types::{
    CreateWorkflowRequest, ExecuteRequest, InstantiateTemplateRequest, UpdateWorkflowRequest,
    WorkflowDefinition, WorkflowExecution,
};

/// Name given to a workflow created from a never-saved canvas.
pub const DEFAULT_WORKFLOW_NAME: &str = "Untitled workflow";
/// Category given to a workflow created from a never-saved canvas.
pub const DEFAULT_WORKFLOW_CATEGORY: &str = "custom";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Async client for the workflow service's REST endpoints.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct WorkflowClient {
    http: Client,
    /// Base URL with any trailing slash trimmed, so endpoint paths can be
    /// appended verbatim.
    base: String,
}

impl WorkflowClient {
    /// Build a client for the service at `base_url`, scheme and authority
    /// plus an optional path prefix. Fails on an unparseable URL or when
    /// the underlying HTTP client cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Same as [`new`](Self::new) with an explicit per-request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let parsed = Url::parse(base_url).map_err(|e| GatewayError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        let http = Client::builder().timeout(timeout).build()?;
        let mut base = parsed.to_string();
        while base.ends_with('/') {
            base.pop();
        }
        Ok(Self { http, base })
    }

    /// The configured base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// `GET /workflows/`: every stored workflow, full definitions included.
    pub async fn list_workflows(&self) -> Result<Vec<WorkflowDefinition>, GatewayError> {
        let url = format!("{}/workflows/", self.base);
        self.request_json(self.http.get(&url), "list workflows").await
    }

    /// `POST /workflows/`: store a new workflow, returning it with its
    /// server-assigned id and timestamps.
    pub async fn create_workflow(
        &self,
        request: &CreateWorkflowRequest,
    ) -> Result<WorkflowDefinition, GatewayError> {
        let url = format!("{}/workflows/", self.base);
        self.request_json(self.http.post(&url).json(request), "create workflow")
            .await
    }

    /// `PUT /workflows/{id}`: replace a stored workflow's graph.
    pub async fn update_workflow(
        &self,
        id: &str,
        request: &UpdateWorkflowRequest,
    ) -> Result<WorkflowDefinition, GatewayError> {
        let url = format!("{}/workflows/{id}", self.base);
        self.request_json(self.http.put(&url).json(request), "update workflow")
            .await
    }

    /// `POST /workflows/{id}/execute`: start an asynchronous run. The
    /// returned record is the run's initial state, not its result.
    pub async fn execute_workflow(
        &self,
        id: &str,
        inputs: HashMap<String, serde_json::Value>,
    ) -> Result<WorkflowExecution, GatewayError> {
        let url = format!("{}/workflows/{id}/execute", self.base);
        let body = ExecuteRequest {
            inputs,
            async_execution: true,
        };
        self.request_json(self.http.post(&url).json(&body), "execute workflow")
            .await
    }

    /// `GET /workflows/executions`: execution records across all workflows.
    pub async fn list_executions(&self) -> Result<Vec<WorkflowExecution>, GatewayError> {
        let url = format!("{}/workflows/executions", self.base);
        self.request_json(self.http.get(&url), "list executions")
            .await
    }

    /// `GET /workflows/templates/`: the template catalog.
    pub async fn list_templates(&self) -> Result<Vec<WorkflowDefinition>, GatewayError> {
        let url = format!("{}/workflows/templates/", self.base);
        self.request_json(self.http.get(&url), "list templates")
            .await
    }

    /// `POST /workflows/templates/{id}/create`: instantiate a template as a
    /// fresh stored workflow.
    pub async fn create_from_template(
        &self,
        template_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<WorkflowDefinition, GatewayError> {
        let url = format!("{}/workflows/templates/{template_id}/create", self.base);
        let body = InstantiateTemplateRequest {
            template_id: template_id.to_string(),
            name: name.to_string(),
            description: description.map(str::to_owned),
        };
        self.request_json(self.http.post(&url).json(&body), "instantiate template")
            .await
    }

    /// Send a request and decode a JSON success body, funneling transport
    /// failures, non-success statuses, and decode failures into
    /// [`GatewayError`].
    async fn request_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &'static str,
    ) -> Result<T, GatewayError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = failure_message(response).await;
            warn!(
                status = status.as_u16(),
                what,
                reason = %message,
                "workflow service rejected request"
            );
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        let body = response.text().await?;
        let decoded = serde_json::from_str(&body)?;
        debug!(what, "workflow service call succeeded");
        Ok(decoded)
    }
}

/// Best single-line message for a failed response.
///
/// Prefers the `detail` or `message` field of a JSON error body, then the
/// raw body, then the status's canonical reason.
async fn failure_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if let Some(detail) = extract_detail(&body) {
        return detail;
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .or_else(|| value.get("message"))?
        .as_str()
        .map(str::to_owned)
}

/// Binds one open canvas to one stored workflow.
///
/// The gateway tracks which workflow the canvas belongs to. A canvas that
/// has never been saved has no id; the first save creates the workflow and
/// adopts the server-assigned id, and every later save updates in place.
///
/// Saving takes `&mut self`, which serializes saves issued through one
/// gateway. It does not serialize anything else: two gateways pointed at
/// the same workflow, or another client entirely, race last-writer-wins on
/// the service side. There is no in-flight tracking or conflict detection.
#[derive(Debug, Clone)]
pub struct WorkflowGateway {
    client: WorkflowClient,
    workflow_id: Option<String>,
}

impl WorkflowGateway {
    /// A gateway for a canvas that has never been saved.
    pub fn new(client: WorkflowClient) -> Self {
        Self {
            client,
            workflow_id: None,
        }
    }

    /// A gateway already bound to a stored workflow.
    pub fn attached(client: WorkflowClient, workflow_id: impl Into<String>) -> Self {
        Self {
            client,
            workflow_id: Some(workflow_id.into()),
        }
    }

    pub fn client(&self) -> &WorkflowClient {
        &self.client
    }

    /// Id of the bound workflow, once saved or loaded.
    pub fn workflow_id(&self) -> Option<&str> {
        self.workflow_id.as_deref()
    }

    /// Populate the model from a fetched definition and bind to its id.
    ///
    /// The definition's arrays become the model's graph as-is. Callers fetch
    /// definitions through [`WorkflowClient::list_workflows`] or receive
    /// them from saves and template instantiation.
    pub fn load(&mut self, model: &mut CanvasModel, definition: &WorkflowDefinition) {
        model.hydrate(definition.nodes.clone(), definition.connections.clone());
        self.workflow_id = Some(definition.id.clone());
        debug!(
            workflow_id = %definition.id,
            nodes = definition.nodes.len(),
            connections = definition.connections.len(),
            "loaded workflow into canvas"
        );
    }

    /// Persist the canvas.
    ///
    /// With no bound workflow this creates one, with default name and
    /// category, and binds to the id the service assigns. Otherwise it
    /// updates the bound workflow's graph in place. Either way the model is
    /// only read, so a failed save loses nothing and can simply be retried.
    pub async fn save(&mut self, model: &CanvasModel) -> Result<WorkflowDefinition, GatewayError> {
        let nodes = model.nodes().to_vec();
        let connections = model.connections().to_vec();
        match &self.workflow_id {
            Some(id) => {
                debug!(workflow_id = %id, nodes = nodes.len(), "saving canvas as update");
                let request = UpdateWorkflowRequest { nodes, connections };
                self.client.update_workflow(id, &request).await
            }
            None => {
                debug!(nodes = nodes.len(), "saving canvas as new workflow");
                let request = CreateWorkflowRequest {
                    name: DEFAULT_WORKFLOW_NAME.to_string(),
                    description: None,
                    category: DEFAULT_WORKFLOW_CATEGORY.to_string(),
                    tags: Vec::new(),
                    nodes,
                    connections,
                    variables: HashMap::new(),
                };
                let definition = self.client.create_workflow(&request).await?;
                self.workflow_id = Some(definition.id.clone());
                Ok(definition)
            }
        }
    }

    /// Start an asynchronous run of the bound workflow.
    ///
    /// Fails with [`GatewayError::NoWorkflow`] if the canvas was never saved
    /// or loaded; the service can only execute stored workflows.
    pub async fn execute(
        &self,
        inputs: HashMap<String, serde_json::Value>,
    ) -> Result<WorkflowExecution, GatewayError> {
        let id = self
            .workflow_id
            .as_deref()
            .ok_or(GatewayError::NoWorkflow)?;
        self.client.execute_workflow(id, inputs).await
    }
}
