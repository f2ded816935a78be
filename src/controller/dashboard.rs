use crate::app_config::AppConfig;
use crate::controller::{DashboardView, DeviceControl, Dispatch, DispatchMode, Gesture, GestureError, Poller, Resolution, fetch_devices};
use crate::dispatcher::{ApiError, CommandDispatcher, DeviceApi};
use crate::domain::events::Event;
use crate::domain::{Channel, Device, DeviceCommand, Notice, WorkMode};
use crate::settings::{DeviceSettingsStore, SettingsError};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

#[derive(Debug)]
pub enum DashboardCommand {
    Gesture {
        device_id: String,
        gesture: Gesture,
        reply: oneshot::Sender<Result<(), GestureError>>,
    },
    TogglePower {
        device_id: String,
        reply: oneshot::Sender<Result<(), GestureError>>,
    },
    SetWorkMode {
        device_id: String,
        mode: WorkMode,
        reply: oneshot::Sender<Result<(), GestureError>>,
    },
    Refresh,
    SetEditing(bool),
    ToggleHidden {
        device_id: String,
        reply: oneshot::Sender<Result<bool, SettingsError>>,
    },
    Rename {
        device_id: String,
        name: String,
        reply: oneshot::Sender<Result<(), SettingsError>>,
    },
    Shutdown,
}

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Gesture(#[from] GestureError),
    #[error("unable to persist device settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("the dashboard is no longer running")]
    Closed,
}

/// Cloneable front door to a running dashboard.
#[derive(Debug, Clone)]
pub struct DashboardHandle {
    tx: Sender<DashboardCommand>,
}

impl DashboardHandle {
    pub async fn gesture(&self, device_id: &str, gesture: Gesture) -> Result<(), DashboardError> {
        let (reply, rx) = oneshot::channel();
        let command = DashboardCommand::Gesture {
            device_id: device_id.to_string(),
            gesture,
            reply,
        };
        Ok(self.request(command, rx).await??)
    }

    pub async fn toggle_power(&self, device_id: &str) -> Result<(), DashboardError> {
        let (reply, rx) = oneshot::channel();
        let command = DashboardCommand::TogglePower {
            device_id: device_id.to_string(),
            reply,
        };
        Ok(self.request(command, rx).await??)
    }

    pub async fn set_work_mode(&self, device_id: &str, mode: WorkMode) -> Result<(), DashboardError> {
        let (reply, rx) = oneshot::channel();
        let command = DashboardCommand::SetWorkMode {
            device_id: device_id.to_string(),
            mode,
            reply,
        };
        Ok(self.request(command, rx).await??)
    }

    /// Queues an out-of-band refresh; the result shows up in the view. Ignored
    /// while editing.
    pub async fn refresh(&self) -> Result<(), DashboardError> {
        self.send(DashboardCommand::Refresh).await
    }

    pub async fn set_editing(&self, editing: bool) -> Result<(), DashboardError> {
        self.send(DashboardCommand::SetEditing(editing)).await
    }

    /// Returns whether the device is hidden now.
    pub async fn toggle_hidden(&self, device_id: &str) -> Result<bool, DashboardError> {
        let (reply, rx) = oneshot::channel();
        let command = DashboardCommand::ToggleHidden {
            device_id: device_id.to_string(),
            reply,
        };
        Ok(self.request(command, rx).await??)
    }

    pub async fn rename(&self, device_id: &str, name: &str) -> Result<(), DashboardError> {
        let (reply, rx) = oneshot::channel();
        let command = DashboardCommand::Rename {
            device_id: device_id.to_string(),
            name: name.to_string(),
            reply,
        };
        Ok(self.request(command, rx).await??)
    }

    pub async fn shutdown(&self) -> Result<(), DashboardError> {
        self.send(DashboardCommand::Shutdown).await
    }

    async fn send(&self, command: DashboardCommand) -> Result<(), DashboardError> {
        self.tx.send(command).await.map_err(|_| DashboardError::Closed)
    }

    async fn request<T>(&self, command: DashboardCommand, rx: oneshot::Receiver<T>) -> Result<T, DashboardError> {
        self.send(command).await?;
        rx.await.map_err(|_| DashboardError::Closed)
    }
}

/// Owns every device control and serializes all mutations: UI commands, poll
/// results, debounce timers and request outcomes all arrive through mailboxes.
#[derive(Debug)]
pub struct Dashboard {
    api: Arc<dyn DeviceApi>,
    settings: DeviceSettingsStore,
    controls: Vec<DeviceControl>,
    dispatcher: CommandDispatcher,
    poller: Option<Poller>,
    events_tx: Sender<Event>,
    events_rx: Receiver<Event>,
    commands_rx: Receiver<DashboardCommand>,
    view_tx: watch::Sender<DashboardView>,
    editing: bool,
    notice: Option<Notice>,
    poll_interval: Duration,
    notice_duration: Duration,
}

/// Starts the dashboard actor. The view stays unloaded until the settings
/// overlay has been read; polling starts right after.
pub fn spawn(
    api: Arc<dyn DeviceApi>,
    settings: DeviceSettingsStore,
    config: &AppConfig,
) -> (DashboardHandle, watch::Receiver<DashboardView>, JoinHandle<()>) {
    let buffer_size = config.core().mailbox_buffer_size();
    let (events_tx, events_rx) = mpsc::channel::<Event>(buffer_size);
    let (commands_tx, commands_rx) = mpsc::channel::<DashboardCommand>(buffer_size);
    let (view_tx, view_rx) = watch::channel(DashboardView::default());

    let dashboard = Dashboard {
        dispatcher: CommandDispatcher::new(api.clone(), events_tx.clone(), config.core().debounce_delay()),
        api,
        settings,
        controls: Vec::new(),
        poller: None,
        events_tx,
        events_rx,
        commands_rx,
        view_tx,
        editing: false,
        notice: None,
        poll_interval: config.core().poll_interval(),
        notice_duration: config.core().notice_duration(),
    };

    let task = tokio::spawn(dashboard.run());
    (DashboardHandle { tx: commands_tx }, view_rx, task)
}

impl Dashboard {
    #[instrument(skip(self))]
    async fn run(mut self) {
        self.settings.load().await;
        self.publish();
        self.poller = Some(Poller::start(self.api.clone(), self.events_tx.clone(), self.poll_interval));
        info!("🏠 Dashboard is ready");

        loop {
            tokio::select! {
                Some(event) = self.events_rx.recv() => self.handle_event(event),
                command = self.commands_rx.recv() => match command {
                    Some(DashboardCommand::Shutdown) | None => break,
                    Some(command) => self.handle_command(command).await,
                },
            }
            self.publish();
        }

        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop();
        }
        self.dispatcher.cancel_all();
        info!("🏠 Dashboard stopped");
    }

    async fn handle_command(&mut self, command: DashboardCommand) {
        match command {
            DashboardCommand::Gesture { device_id, gesture, reply } => {
                let result = self.apply_gesture(&device_id, gesture);
                reply.send(result).unwrap_or_default();
            }
            DashboardCommand::TogglePower { device_id, reply } => {
                let result = self.toggle_power(&device_id);
                reply.send(result).unwrap_or_default();
            }
            DashboardCommand::SetWorkMode { device_id, mode, reply } => {
                let result = self.set_work_mode(&device_id, mode);
                reply.send(result).unwrap_or_default();
            }
            DashboardCommand::Refresh if self.editing => {
                debug!("Ignoring refresh while editing");
            }
            DashboardCommand::Refresh => {
                let api = self.api.clone();
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    fetch_devices(api.as_ref(), &tx).await;
                });
            }
            DashboardCommand::SetEditing(editing) => self.set_editing(editing),
            DashboardCommand::ToggleHidden { device_id, reply } => {
                let result = self.settings.toggle_hidden(&device_id).await;
                if let Err(e) = &result {
                    warn!(device_id, "⚠️ Unable to toggle visibility: {}", e);
                }
                reply.send(result).unwrap_or_default();
            }
            DashboardCommand::Rename { device_id, name, reply } => {
                let result = self.settings.set_custom_name(&device_id, &name).await;
                if let Err(e) = &result {
                    warn!(device_id, "⚠️ Unable to rename device: {}", e);
                }
                reply.send(result).unwrap_or_default();
            }
            DashboardCommand::Shutdown => {}
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::DevicesRefreshed(Ok(devices)) => self.merge(devices),
            Event::DevicesRefreshed(Err(e)) => self.refresh_failed(e),
            Event::DebounceElapsed {
                device_id,
                channel,
                epoch,
                commands,
            } => self.debounce_elapsed(&device_id, channel, epoch, commands),
            Event::CommandResolved {
                device_id,
                channel,
                epoch,
                outcome,
            } => self.command_resolved(&device_id, channel, epoch, outcome),
            Event::NoticeElapsed => {}
        }
    }

    fn apply_gesture(&mut self, device_id: &str, gesture: Gesture) -> Result<(), GestureError> {
        self.ensure_not_editing()?;
        let dispatch = self.control_mut(device_id)?.gesture(gesture)?;
        self.route(device_id, dispatch);
        Ok(())
    }

    fn toggle_power(&mut self, device_id: &str) -> Result<(), GestureError> {
        self.ensure_not_editing()?;
        let dispatches = self.control_mut(device_id)?.toggle_power()?;
        for dispatch in dispatches {
            self.route(device_id, dispatch);
        }
        Ok(())
    }

    fn set_work_mode(&mut self, device_id: &str, mode: WorkMode) -> Result<(), GestureError> {
        self.ensure_not_editing()?;
        if let Some(dispatch) = self.control_mut(device_id)?.set_work_mode(mode)? {
            self.route(device_id, dispatch);
        }
        Ok(())
    }

    fn route(&mut self, device_id: &str, dispatch: Dispatch) {
        match dispatch.mode {
            DispatchMode::Immediate => self.dispatcher.send(device_id, dispatch.channel, dispatch.epoch, dispatch.commands),
            DispatchMode::Debounced => self.dispatcher.schedule(device_id, dispatch.channel, dispatch.epoch, dispatch.commands),
        }
    }

    fn set_editing(&mut self, editing: bool) {
        if self.editing == editing {
            return;
        }
        self.editing = editing;

        if let Some(poller) = &self.poller {
            if editing {
                poller.suspend();
            } else {
                poller.resume();
            }
        }
        info!("✏️ Editing mode {}", if editing { "on" } else { "off" });
    }

    /// Keeps the order of the listing. Controls of known devices survive so
    /// their pending edits do too.
    fn merge(&mut self, devices: Vec<Device>) {
        let mut previous: HashMap<String, DeviceControl> =
            self.controls.drain(..).map(|control| (control.id().to_string(), control)).collect();

        self.controls = devices
            .into_iter()
            .map(|device| match previous.remove(&device.id) {
                Some(mut control) => {
                    control.refresh(device);
                    control
                }
                None => {
                    debug!(device_id = device.id, "🆕 Discovered '{}'", device.name);
                    DeviceControl::new(device)
                }
            })
            .collect();

        for device_id in previous.keys() {
            info!(device_id, "👋 Device is gone, dropping its pending commands");
            self.dispatcher.cancel_device(device_id);
        }
    }

    fn refresh_failed(&mut self, e: ApiError) {
        warn!("⚠️ Unable to refresh devices: {}", e);
        self.notice = Some(Notice::new(e.to_string(), Instant::now(), self.notice_duration));
        self.expire_notice_later();
    }

    fn debounce_elapsed(&mut self, device_id: &str, channel: Channel, epoch: u64, commands: Vec<DeviceCommand>) {
        let claimed = self.dispatcher.take_elapsed(device_id, channel, epoch);
        let current = self.control(device_id).is_some_and(|control| control.is_current(channel, epoch));

        if claimed && current {
            self.dispatcher.send(device_id, channel, epoch, commands);
        } else {
            debug!(device_id, "Dropping superseded {} batch (epoch {})", channel, epoch);
        }
    }

    fn command_resolved(&mut self, device_id: &str, channel: Channel, epoch: u64, outcome: Result<(), ApiError>) {
        let notice_duration = self.notice_duration;
        let Some(control) = self.controls.iter_mut().find(|control| control.id() == device_id) else {
            debug!(device_id, "Outcome for a device that is gone");
            return;
        };

        if control.resolve(channel, epoch, outcome, Instant::now(), notice_duration) == Resolution::RolledBack {
            self.expire_notice_later();
        }
    }

    fn expire_notice_later(&self) {
        let tx = self.events_tx.clone();
        let duration = self.notice_duration;
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            tx.send(Event::NoticeElapsed).await.unwrap_or_default();
        });
    }

    fn publish(&self) {
        let now = Instant::now();
        let notice = self
            .notice
            .as_ref()
            .filter(|notice| notice.is_active(now))
            .map(|notice| notice.message().to_string());
        let view = DashboardView::project(&self.controls, &self.settings, self.editing, notice, now);

        self.view_tx.send_if_modified(|current| {
            if *current == view {
                false
            } else {
                *current = view;
                true
            }
        });
    }

    fn control(&self, device_id: &str) -> Option<&DeviceControl> {
        self.controls.iter().find(|control| control.id() == device_id)
    }

    fn control_mut(&mut self, device_id: &str) -> Result<&mut DeviceControl, GestureError> {
        self.controls
            .iter_mut()
            .find(|control| control.id() == device_id)
            .ok_or_else(|| GestureError::UnknownDevice(device_id.to_string()))
    }

    fn ensure_not_editing(&self) -> Result<(), GestureError> {
        if self.editing { Err(GestureError::Editing) } else { Ok(()) }
    }
}
