use eframe::egui;
use std::future::Future;
use std::sync::mpsc::{channel, Receiver, TryRecvError};

use crate::error::AppError;

pub type TaskResult<T> = Result<T, AppError>;

/// One API job running on its own thread with a throwaway tokio runtime.
/// The UI polls it every frame.
pub struct Task<T> {
    label: &'static str,
    rx: Receiver<TaskResult<T>>,
}

impl<T: Send + 'static> Task<T> {
    pub fn spawn<F, Fut, E>(ctx: &egui::Context, label: &'static str, job: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>>,
        E: Into<AppError>,
    {
        let (tx, rx) = channel();
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let result = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt.block_on(job()).map_err(Into::into),
                Err(e) => {
                    log::error!("[Task] {}: failed to start runtime: {}", label, e);
                    Err(AppError::Runtime(e))
                }
            };
            let _ = tx.send(result);
            ctx.request_repaint();
        });

        log::debug!("[Task] Started {}", label);
        Self { label, rx }
    }
}

impl<T> Task<T> {
    /// `None` while still running
    pub fn poll(&self) -> Option<TaskResult<T>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                log::error!("[Task] {} ended without a result", self.label);
                Some(Err(AppError::TaskLost))
            }
        }
    }
}

/// Take a finished result out of a task slot, emptying the slot
pub fn take_finished<T>(slot: &mut Option<Task<T>>) -> Option<TaskResult<T>> {
    let result = slot.as_ref()?.poll()?;
    *slot = None;
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use std::time::{Duration, Instant};

    fn wait<T>(slot: &mut Option<Task<T>>) -> TaskResult<T> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(result) = take_finished(slot) {
                return result;
            }
            assert!(Instant::now() < deadline, "task did not finish");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_task_delivers_result_once() {
        let ctx = egui::Context::default();
        let mut slot = Some(Task::spawn(&ctx, "sum", || async { Ok::<_, ApiError>(2 + 3) }));

        assert_eq!(wait(&mut slot).unwrap(), 5);
        assert!(slot.is_none());
        assert!(take_finished(&mut slot).is_none());
    }

    #[test]
    fn test_task_error_converts_to_app_error() {
        let ctx = egui::Context::default();
        let mut slot = Some(Task::spawn(&ctx, "fail", || async {
            Err::<(), _>(ApiError::Status { status: 401, message: "Invalid token".into() })
        }));

        let err = wait(&mut slot).unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_panicking_task_is_reported_lost() {
        let ctx = egui::Context::default();
        let mut slot: Option<Task<()>> = Some(Task::spawn(&ctx, "panic", || async {
            if true {
                panic!("worker died");
            }
            Ok::<_, ApiError>(())
        }));

        assert!(matches!(wait(&mut slot), Err(AppError::TaskLost)));
    }
}
