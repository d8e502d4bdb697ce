//! Runtime - Scheduled tasks with cancellation handles
//!
//! Timers (liveness monitor, post-connect refresh, error auto-clear) are
//! spawned tokio tasks owned by a [`TaskHandle`]. Dropping or cancelling the
//! handle aborts the task, so a store that forgets a handle cannot leak a
//! timer.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Owned handle to a spawned task; aborts it on cancel or drop
#[derive(Debug)]
pub struct TaskHandle {
    handle: JoinHandle<()>,
}

impl TaskHandle {
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self { handle: tokio::spawn(future) }
    }

    pub fn cancel(self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Run `task` once after `delay`
pub fn spawn_after<F, Fut>(delay: Duration, task: F) -> TaskHandle
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    TaskHandle::spawn(async move {
        tokio::time::sleep(delay).await;
        task().await;
    })
}

/// Run `task` every `period`, first run one period from now
pub fn spawn_every<F, Fut>(period: Duration, mut task: F) -> TaskHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    TaskHandle::spawn(async move {
        loop {
            tokio::time::sleep(period).await;
            task().await;
        }
    })
}
