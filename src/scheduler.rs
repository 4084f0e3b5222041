use crate::clock::Clock;
use crate::controller::ChecklistController;
use crate::store::KeyValueStore;
use crate::surface::ChecklistSurface;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Handle to the recurring day reset. Only one timer is pending at a time;
/// the next one is armed after the previous reset ran.
pub struct ResetTask {
    handle: Option<JoinHandle<()>>,
}

impl ResetTask {
    pub fn spawn<S, U, C, F, Fut>(
        controller: Arc<Mutex<ChecklistController<S, U, C>>>,
        on_reset: F,
    ) -> Self
    where
        S: KeyValueStore + Send + 'static,
        U: ChecklistSurface + Send + 'static,
        C: Clock + Send + 'static,
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            loop {
                let delay = controller.lock().await.schedule_reset();
                debug!("next checklist reset in {}s", delay.as_secs());
                tokio::time::sleep(delay).await;

                controller.lock().await.run_reset();
                on_reset().await;
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("checklist reset stopped");
        }
    }
}

impl Drop for ResetTask {
    fn drop(&mut self) {
        self.stop();
    }
}
