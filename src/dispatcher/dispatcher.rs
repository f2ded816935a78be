use crate::dispatcher::DeviceApi;
use crate::domain::events::Event;
use crate::domain::{Channel, DeviceCommand};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

#[derive(Debug)]
struct ScheduledCommand {
    epoch: u64,
    timer: JoinHandle<()>,
}

/// Sends command batches and debounces them per (device, channel). Results
/// are reported back to the dashboard mailbox, never retried.
#[derive(Debug)]
pub struct CommandDispatcher {
    api: Arc<dyn DeviceApi>,
    tx: Sender<Event>,
    delay: Duration,
    scheduled: HashMap<(String, Channel), ScheduledCommand>,
}

impl CommandDispatcher {
    pub fn new(api: Arc<dyn DeviceApi>, tx: Sender<Event>, delay: Duration) -> Self {
        CommandDispatcher {
            api,
            tx,
            delay,
            scheduled: HashMap::new(),
        }
    }

    /// Issues one request for the whole batch; the outcome arrives as `Event::CommandResolved`.
    #[instrument(skip(self, commands))]
    pub fn send(&self, device_id: &str, channel: Channel, epoch: u64, commands: Vec<DeviceCommand>) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        let device_id = device_id.to_string();

        debug!("📤 Sending {} command(s) for {}...", commands.len(), channel);
        tokio::spawn(async move {
            let outcome = api.send_commands(&device_id, &commands).await;
            if let Err(e) = &outcome {
                warn!(device_id, "⚠️ Unable to send {} command(s): {}", channel, e);
            }

            let event = Event::CommandResolved {
                device_id,
                channel,
                epoch,
                outcome,
            };
            if tx.send(event).await.is_err() {
                debug!("Dashboard is gone, dropping the command outcome");
            }
        });
    }

    /// Replaces any pending timer for the channel; only the latest payload is ever sent.
    pub fn schedule(&mut self, device_id: &str, channel: Channel, epoch: u64, commands: Vec<DeviceCommand>) {
        let key = (device_id.to_string(), channel);
        if let Some(previous) = self.scheduled.remove(&key) {
            previous.timer.abort();
        }

        let tx = self.tx.clone();
        let delay = self.delay;
        let event_device_id = device_id.to_string();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let event = Event::DebounceElapsed {
                device_id: event_device_id,
                channel,
                epoch,
                commands,
            };
            tx.send(event).await.unwrap_or_default();
        });

        self.scheduled.insert(key, ScheduledCommand { epoch, timer });
    }

    /// Claims an elapsed timer. Returns false for a timer that was replaced
    /// after it fired.
    pub fn take_elapsed(&mut self, device_id: &str, channel: Channel, epoch: u64) -> bool {
        let key = (device_id.to_string(), channel);
        match self.scheduled.get(&key) {
            Some(scheduled) if scheduled.epoch == epoch => {
                self.scheduled.remove(&key);
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    pub fn is_scheduled(&self, device_id: &str, channel: Channel) -> bool {
        self.scheduled.contains_key(&(device_id.to_string(), channel))
    }

    pub fn cancel_device(&mut self, device_id: &str) {
        self.scheduled.retain(|(id, _), scheduled| {
            if id == device_id {
                scheduled.timer.abort();
                false
            } else {
                true
            }
        });
    }

    /// Drops every pending payload without sending it.
    pub fn cancel_all(&mut self) {
        let dropped = self.scheduled.len();
        for (_, scheduled) in self.scheduled.drain() {
            scheduled.timer.abort();
        }
        if dropped > 0 {
            debug!("Dropped {} pending debounced command(s)", dropped);
        }
    }
}

impl Drop for CommandDispatcher {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
