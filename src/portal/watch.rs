use crate::actix_web::rt;
use crate::core::routing::route;
use crate::core::services::score::Standing;
use crate::portal::backend::PortalBackend;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const DEFAULT_PERIOD: Duration = Duration::from_secs(5);

/// Polls a user's persisted result on a fixed period. The task lives exactly
/// as long as the watcher.
pub struct ResultWatcher {
    rx: watch::Receiver<Option<Standing>>,
    handle: JoinHandle<()>,
}

impl ResultWatcher {
    pub fn spawn<B>(backend: B, user_id: i32, period: Duration) -> Self
    where
        B: PortalBackend + 'static,
    {
        let (tx, rx) = watch::channel(None);
        let handle = rt::spawn(async move {
            let mut ticker = rt::time::interval(period);
            loop {
                ticker.tick().await;
                match backend.result(user_id).await {
                    Ok(result) => {
                        let standing = Standing {
                            result,
                            destination: route(result),
                        };
                        if tx.send(Some(standing)).is_err() {
                            break;
                        }
                    }
                    Err(e) => log::warn!("polling result for user {} failed: {}", user_id, e),
                }
            }
        });
        Self { rx, handle }
    }

    /// Last polled standing, `None` before the first successful poll.
    pub fn latest(&self) -> Option<Standing> {
        *self.rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Standing>> {
        self.rx.clone()
    }

    pub fn stop(self) {}
}

impl Drop for ResultWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
