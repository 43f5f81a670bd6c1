//! Queue-backed executor with a background worker.
//!
//! `execute` only admits the task onto a bounded channel. A worker drains
//! the channel, runs each task through a [`TaskRunner`] with bounded
//! concurrency, and publishes `running` and the terminal status to the task
//! repository. Once the queue closes, the worker waits for every run it
//! started before finishing.

use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error, info, warn};

use crate::task::{
    domain::{Task, TaskStatus},
    ports::{Executor, ExecutorError, ExecutorResult, TaskRepository, TaskRunner},
};

/// Sizing of the admission queue and worker pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueSettings {
    /// Number of admitted tasks that may wait for a worker slot.
    pub queue_capacity: usize,
    /// Number of tasks run at the same time.
    pub max_concurrency: usize,
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self {
            queue_capacity: 64,
            max_concurrency: 4,
        }
    }
}

/// Executor admitting tasks onto a bounded queue.
#[derive(Debug, Clone)]
pub struct QueuedExecutor {
    sender: mpsc::Sender<Task>,
}

impl QueuedExecutor {
    /// Starts the background worker and returns the executor handle with the
    /// worker's join handle.
    ///
    /// The worker stops once every executor clone has been dropped, the
    /// queue is drained, and every started run has published its terminal
    /// status. Must be called within a Tokio runtime.
    pub fn spawn<T, R, C>(
        runner: Arc<T>,
        repository: Arc<R>,
        clock: Arc<C>,
        settings: QueueSettings,
    ) -> (Self, JoinHandle<()>)
    where
        T: TaskRunner + 'static,
        R: TaskRepository + 'static,
        C: Clock + Send + Sync + 'static,
    {
        let (sender, receiver) = mpsc::channel(settings.queue_capacity.max(1));
        let slots = Arc::new(Semaphore::new(settings.max_concurrency.max(1)));
        let worker = Worker {
            runner,
            repository,
            clock,
        };
        let handle = tokio::spawn(worker.drain(receiver, slots));
        (Self { sender }, handle)
    }
}

#[async_trait]
impl Executor for QueuedExecutor {
    async fn execute(&self, task: &Task) -> ExecutorResult<()> {
        if task.project().is_none() {
            return Err(ExecutorError::ProjectNotBound(task.id().clone()));
        }
        self.sender.try_send(task.clone()).map_err(|err| match err {
            mpsc::error::TrySendError::Full(rejected) => {
                ExecutorError::QueueFull(rejected.id().clone())
            }
            mpsc::error::TrySendError::Closed(_) => ExecutorError::Closed,
        })?;
        debug!(task_id = %task.id(), command = %task.command(), "task admitted");
        Ok(())
    }
}

struct Worker<T, R, C> {
    runner: Arc<T>,
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<T, R, C> Clone for Worker<T, R, C> {
    fn clone(&self) -> Self {
        Self {
            runner: Arc::clone(&self.runner),
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T, R, C> Worker<T, R, C>
where
    T: TaskRunner + 'static,
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    async fn drain(self, mut receiver: mpsc::Receiver<Task>, slots: Arc<Semaphore>) {
        let mut runs = JoinSet::new();
        while let Some(task) = receiver.recv().await {
            let Ok(permit) = Arc::clone(&slots).acquire_owned().await else {
                error!("executor worker slots closed");
                break;
            };
            while let Some(finished) = runs.try_join_next() {
                report_join(finished);
            }
            let worker = self.clone();
            runs.spawn(async move {
                worker.run(task).await;
                drop(permit);
            });
        }
        debug!(in_flight = runs.len(), "executor queue closed");
        while let Some(finished) = runs.join_next().await {
            report_join(finished);
        }
        debug!("executor drained");
    }

    async fn run(&self, mut task: Task) {
        if !self.publish(&mut task, TaskStatus::Running).await {
            return;
        }
        info!(task_id = %task.id(), command = %task.command(), "task started");

        match self.runner.run(&task).await {
            Ok(()) => {
                if self.publish(&mut task, TaskStatus::Succeeded).await {
                    info!(task_id = %task.id(), "task succeeded");
                }
            }
            Err(err) => {
                error!(task_id = %task.id(), error = %err, "task failed");
                if let Err(transition) = task.fail(err.to_string(), &*self.clock) {
                    warn!(task_id = %task.id(), error = %transition, "failed status rejected");
                    return;
                }
                self.save(&task).await;
            }
        }
    }

    async fn publish(&self, task: &mut Task, status: TaskStatus) -> bool {
        if let Err(err) = task.transition_to(status, &*self.clock) {
            warn!(task_id = %task.id(), error = %err, "status transition rejected");
            return false;
        }
        self.save(task).await
    }

    async fn save(&self, task: &Task) -> bool {
        match self.repository.update(task).await {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    task_id = %task.id(),
                    status = %task.status(),
                    error = %err,
                    "failed to publish task status"
                );
                false
            }
        }
    }
}

fn report_join(finished: Result<(), tokio::task::JoinError>) {
    if let Err(err) = finished {
        error!(error = %err, "task run aborted");
    }
}
