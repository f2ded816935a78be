use crate::dispatcher::DeviceApi;
use crate::domain::events::Event;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::Sender;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument};

/// Periodic device refresh. The first tick fires at once; suspended ticks are
/// skipped rather than queued.
#[derive(Debug)]
pub struct Poller {
    suspended: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Poller {
    pub fn start(api: Arc<dyn DeviceApi>, tx: Sender<Event>, period: Duration) -> Self {
        let (suspended, suspended_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if *suspended_rx.borrow() {
                    debug!("⏸️ Polling suspended, skipping refresh");
                    continue;
                }
                if !fetch_devices(api.as_ref(), &tx).await {
                    break;
                }
            }
        });
        info!("🔁 Polling devices every {:?}", period);

        Poller { suspended, task }
    }

    pub fn suspend(&self) {
        self.suspended.send_replace(true);
    }

    pub fn resume(&self) {
        self.suspended.send_replace(false);
    }

    #[cfg(test)]
    pub fn is_suspended(&self) -> bool {
        *self.suspended.borrow()
    }

    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Fetches the device list and posts the result to the mailbox. Returns false
/// once the mailbox is closed.
#[instrument(skip_all)]
pub async fn fetch_devices(api: &dyn DeviceApi, tx: &Sender<Event>) -> bool {
    let result = api.list_devices().await;
    tx.send(Event::DevicesRefreshed(result)).await.is_ok()
}
