use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::{
    AuthClient, Error,
    request::RequestDescriptor,
    retry::OperationKind,
};

use super::{NewTask, Priority, PriorityChoice, Task, TaskPatch, TaskQuery, parse_priority_choices};

pub const TASKS_PATH: &str = "api/tasks/";

/// Typed calls against the tasks endpoint.
///
/// A 401 that survives the client's refresh becomes `Error::Unauthorized`;
/// any other non-2xx becomes `Error::Server`.
#[derive(Clone)]
pub struct TasksApi {
    client: AuthClient,
    tasks_url: String,
}

impl TasksApi {
    pub fn new(client: AuthClient, base_url: &str) -> Self {
        Self {
            client,
            tasks_url: format!("{}/{}", base_url.trim_end_matches('/'), TASKS_PATH),
        }
    }

    pub fn tasks_url(&self) -> &str {
        &self.tasks_url
    }

    fn task_url(&self, id: u64) -> String {
        format!("{}{}/", self.tasks_url, id)
    }

    pub async fn list(&self) -> Result<Vec<Task>, Error> {
        self.list_with(&TaskQuery::default()).await
    }

    pub async fn list_with(&self, query: &TaskQuery) -> Result<Vec<Task>, Error> {
        let url = format!("{}{}", self.tasks_url, query.query_string());
        let resp = self
            .client
            .send_as(OperationKind::ListTasks, RequestDescriptor::get(url))
            .await?;
        let tasks: Vec<Task> = read_json(OperationKind::ListTasks, resp).await?;
        info!("tasks listed: count={}", tasks.len());
        Ok(tasks)
    }

    pub async fn create(&self, task: &NewTask) -> Result<Task, Error> {
        let req = RequestDescriptor::post(self.tasks_url.clone()).json(task)?;
        let resp = self.client.send_as(OperationKind::CreateTask, req).await?;
        let created: Task = read_json(OperationKind::CreateTask, resp).await?;
        info!("task created: id={} title='{}'", created.id, created.title);
        Ok(created)
    }

    pub async fn set_completed(&self, id: u64, completed: bool) -> Result<Task, Error> {
        let req = RequestDescriptor::patch(self.task_url(id)).json(&TaskPatch { completed })?;
        let resp = self.client.send_as(OperationKind::UpdateTask, req).await?;
        let updated: Task = read_json(OperationKind::UpdateTask, resp).await?;
        info!("task updated: id={} completed={}", updated.id, updated.completed);
        Ok(updated)
    }

    pub async fn delete(&self, id: u64) -> Result<(), Error> {
        let resp = self
            .client
            .send_as(OperationKind::DeleteTask, RequestDescriptor::delete(self.task_url(id)))
            .await?;
        check_status(OperationKind::DeleteTask, resp).await?;
        info!("task deleted: id={}", id);
        Ok(())
    }

    /// Priority choices advertised by the endpoint's OPTIONS metadata, or the
    /// built-in L/M/H set when it advertises none, answers with a non-2xx, or
    /// sends a body that is not JSON. A 401 that survives refresh still fails.
    pub async fn priority_choices(&self) -> Result<Vec<PriorityChoice>, Error> {
        let resp = self
            .client
            .send_as(
                OperationKind::TaskOptions,
                RequestDescriptor::options(self.tasks_url.clone()),
            )
            .await?;
        let meta = match read_json::<serde_json::Value>(OperationKind::TaskOptions, resp).await {
            Ok(meta) => Some(meta),
            Err(Error::Server { status, .. }) => {
                warn!("priority choices unavailable: status={}; using defaults", status);
                None
            }
            Err(Error::Json(e)) => {
                warn!("priority choices unreadable: {}; using defaults", e);
                None
            }
            Err(e) => return Err(e),
        };
        Ok(meta
            .as_ref()
            .and_then(parse_priority_choices)
            .unwrap_or_else(|| {
                Priority::ALL
                    .iter()
                    .map(|p| PriorityChoice {
                        value: p.code().to_string(),
                        label: p.label().to_string(),
                    })
                    .collect()
            }))
    }
}

async fn check_status(operation: OperationKind, resp: Response) -> Result<String, Error> {
    let status = resp.status();
    let body = resp.text().await?;
    if status == StatusCode::UNAUTHORIZED {
        warn!("{} unauthorized: status={} body='{}'", operation, status, body);
        return Err(Error::Unauthorized { body });
    }
    if !status.is_success() {
        warn!("{} failed: status={} body='{}'", operation, status, body);
        return Err(Error::Server { status, body });
    }
    Ok(body)
}

async fn read_json<T: DeserializeOwned>(operation: OperationKind, resp: Response) -> Result<T, Error> {
    let body = check_status(operation, resp).await?;
    Ok(serde_json::from_str(&body)?)
}
