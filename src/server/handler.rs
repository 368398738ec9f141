//! Decision-function seam for the protocol server

use std::{any::Any, future::Future, sync::Arc};

use anyhow::anyhow;
use async_trait::async_trait;
use futures::future::BoxFuture;
use tokio::task::JoinError;

use crate::protocol::{Task, TaskStatus};

/// Decision function bound behind a protocol server
///
/// Every decision function is modeled as asynchronous; synchronous
/// implementations are wrapped by [`blocking_skill_fn`] so they run on the
/// runtime's bounded blocking pool instead of the request loop. Failures are
/// opaque to the protocol layer: the server converts any error into a
/// `failed` task result and never lets it surface as a transport error.
#[async_trait]
pub trait SkillHandler: Send + Sync + 'static {
    /// Execute one task and produce its result
    async fn handle(&self, task: Task) -> anyhow::Result<TaskStatus>;
}

/// Adapter turning an async closure into a [`SkillHandler`]
pub struct SkillFn {
    f: Box<dyn Fn(Task) -> BoxFuture<'static, anyhow::Result<TaskStatus>> + Send + Sync>,
}

/// Wrap an async function as a skill handler
///
/// # Example
///
/// ```
/// use a2a_greenlight::server::skill_fn;
/// use a2a_greenlight::protocol::TaskStatus;
///
/// let handler = skill_fn(|task| async move {
///     Ok(TaskStatus::failed(format!("skill '{}' is not implemented", task.skill)))
/// });
/// # let _ = handler;
/// ```
pub fn skill_fn<F, Fut>(f: F) -> SkillFn
where
    F: Fn(Task) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<TaskStatus>> + Send + 'static,
{
    SkillFn {
        f: Box::new(move |task| Box::pin(f(task))),
    }
}

#[async_trait]
impl SkillHandler for SkillFn {
    async fn handle(&self, task: Task) -> anyhow::Result<TaskStatus> {
        (self.f)(task).await
    }
}

/// Adapter running a synchronous decision function on the blocking pool
pub struct BlockingSkill<F> {
    f: Arc<F>,
}

/// Wrap a synchronous function as a skill handler
///
/// The function runs on `tokio`'s blocking pool, so a slow decision function
/// never stalls connection accept. A panic inside the function is caught at
/// the join boundary and reported as an ordinary handler error.
pub fn blocking_skill_fn<F>(f: F) -> BlockingSkill<F>
where
    F: Fn(Task) -> anyhow::Result<TaskStatus> + Send + Sync + 'static,
{
    BlockingSkill { f: Arc::new(f) }
}

#[async_trait]
impl<F> SkillHandler for BlockingSkill<F>
where
    F: Fn(Task) -> anyhow::Result<TaskStatus> + Send + Sync + 'static,
{
    async fn handle(&self, task: Task) -> anyhow::Result<TaskStatus> {
        let f = Arc::clone(&self.f);
        match tokio::task::spawn_blocking(move || f(task)).await {
            Ok(result) => result,
            Err(err) if err.is_panic() => {
                Err(anyhow!("skill handler panicked: {}", panic_message(err)))
            }
            Err(err) => Err(anyhow!("skill handler was cancelled: {}", err)),
        }
    }
}

fn panic_message(err: JoinError) -> String {
    match err.try_into_panic() {
        Ok(payload) => panic_payload_text(payload),
        Err(err) => err.to_string(),
    }
}

/// Render a caught panic payload as text
pub(super) fn panic_payload_text(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "opaque panic payload".to_string()
    }
}
