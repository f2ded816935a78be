use crate::codec::{FieldValue, decode, encode};
use crate::controller::{Dispatch, DispatchMode, Gesture, GestureError};
use crate::dispatcher::ApiError;
use crate::domain::{Channel, ChannelValue, Device, DeviceCommand, DomainState, MAX_VALUE, Notice, WorkMode};
use crate::perceptual::{MAX_BRIGHTNESS, apply_magnetism};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

const CHANNELS: [Channel; 5] = [
    Channel::Power,
    Channel::Brightness,
    Channel::ColourTemp,
    Channel::Colour,
    Channel::WorkMode,
];
const MAX_COLOUR_TEMP: u16 = 1000;

/// An optimistic edit that has been applied locally but not yet confirmed.
#[derive(PartialEq, Debug, Clone)]
struct PendingEdit {
    channel: Channel,
    target: ChannelValue,
    /// Last values the device is known to hold, one per touched channel.
    rollback: Vec<ChannelValue>,
    epoch: u64,
    /// The batch turns the device on as well.
    powers_on: bool,
    enters_colour_mode: bool,
    /// Values carried by each batch handed out for this edit, by epoch.
    batches: Vec<(u64, Vec<ChannelValue>)>,
}

impl PendingEdit {
    fn touches(&self, channel: Channel) -> bool {
        self.channel == channel || self.rollback.iter().any(|value| value.channel() == channel)
    }

    fn record_batch(&mut self) {
        let mut values = vec![self.target];
        if self.enters_colour_mode {
            values.push(ChannelValue::WorkMode(WorkMode::Colour));
        }
        if self.powers_on {
            values.push(ChannelValue::Power(true));
        }
        self.batches.push((self.epoch, values));
    }

    /// An earlier batch of the burst reached the device, so rolling back
    /// must stop at its values.
    fn confirm_superseded(&mut self, epoch: u64) {
        if let Some((_, values)) = self.batches.iter().find(|(batch_epoch, _)| *batch_epoch == epoch) {
            for previous in self.rollback.iter_mut() {
                if let Some(value) = values.iter().find(|value| value.channel() == previous.channel()) {
                    *previous = *value;
                }
            }
        }
        self.batches.retain(|(batch_epoch, _)| *batch_epoch > epoch);
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Resolution {
    Confirmed,
    RolledBack,
    Stale,
}

/// Per-device optimistic state machine. Every channel is either idle (the
/// server value is authoritative) or holds one pending edit (the local value
/// wins until the edit resolves).
#[derive(Debug)]
pub struct DeviceControl {
    device: Device,
    state: DomainState,
    pending: HashMap<Channel, PendingEdit>,
    last_epoch: u64,
    notice: Option<Notice>,
}

impl DeviceControl {
    pub fn new(device: Device) -> Self {
        let state = decode(&device);
        DeviceControl {
            device,
            state,
            pending: HashMap::new(),
            last_epoch: 0,
            notice: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.device.id
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn state(&self) -> &DomainState {
        &self.state
    }

    pub fn pending_channels(&self) -> Vec<Channel> {
        CHANNELS.into_iter().filter(|channel| self.pending.contains_key(channel)).collect()
    }

    pub fn is_current(&self, channel: Channel, epoch: u64) -> bool {
        self.pending.get(&channel).is_some_and(|edit| edit.epoch == epoch)
    }

    pub fn notice(&self, now: Instant) -> Option<&Notice> {
        self.notice.as_ref().filter(|notice| notice.is_active(now))
    }

    pub fn gesture(&mut self, gesture: Gesture) -> Result<Dispatch, GestureError> {
        self.ensure_controllable()?;
        self.ensure_light()?;

        let (target, companions, enters_colour_mode) = match gesture {
            Gesture::Brightness(raw) => (ChannelValue::Brightness(apply_magnetism(raw.min(MAX_BRIGHTNESS))), vec![], false),
            Gesture::ColourTemp(value) => (ChannelValue::ColourTemp(value.min(MAX_COLOUR_TEMP)), vec![], false),
            Gesture::Colour(colour) => (ChannelValue::Colour(colour), vec![ChannelValue::WorkMode(WorkMode::Colour)], true),
            Gesture::ColourValue(raw) => {
                let value = apply_magnetism(raw.min(MAX_VALUE));
                let colour = self.state.colour.with_value(value);
                (ChannelValue::Colour(colour), vec![ChannelValue::Brightness(value)], false)
            }
        };

        let epoch = self.begin_edit(target, &companions, enters_colour_mode);
        debug!(device_id = self.device.id, "🎚️ {:?} on '{}' (epoch {})", target, self.device.name, epoch);
        Ok(self.dispatch(DispatchMode::Debounced, target.channel(), epoch))
    }

    /// Power is never debounced. Turning off also strips the implicit power-on
    /// from batches that are still waiting, so they are handed back for rescheduling.
    pub fn toggle_power(&mut self) -> Result<Vec<Dispatch>, GestureError> {
        self.ensure_controllable()?;

        let on = !self.state.power;
        let epoch = self.next_epoch();
        let mut edit = self.pending.remove(&Channel::Power).unwrap_or_else(|| PendingEdit {
            channel: Channel::Power,
            target: ChannelValue::Power(on),
            rollback: vec![ChannelValue::Power(self.state.power)],
            epoch,
            powers_on: false,
            enters_colour_mode: false,
            batches: Vec::new(),
        });
        edit.target = ChannelValue::Power(on);
        edit.epoch = epoch;
        edit.record_batch();
        self.pending.insert(Channel::Power, edit);
        self.state.power = on;

        info!(device_id = self.device.id, "🔌 Turn {} '{}'", if on { "on" } else { "off" }, self.device.name);
        let mut dispatches = vec![self.dispatch(DispatchMode::Immediate, Channel::Power, epoch)];

        if !on {
            let waiting: Vec<Channel> = self
                .pending
                .values()
                .filter(|edit| edit.powers_on && edit.channel.is_debounced())
                .map(|edit| edit.channel)
                .collect();

            for channel in waiting {
                let epoch = self.next_epoch();
                if let Some(edit) = self.pending.get_mut(&channel) {
                    edit.powers_on = false;
                    edit.rollback.retain(|value| value.channel() != Channel::Power);
                    edit.epoch = epoch;
                    edit.record_batch();
                }
                dispatches.push(self.dispatch(DispatchMode::Debounced, channel, epoch));
            }
        }

        Ok(dispatches)
    }

    /// Re-selecting the active mode is a no-op.
    pub fn set_work_mode(&mut self, mode: WorkMode) -> Result<Option<Dispatch>, GestureError> {
        self.ensure_controllable()?;
        self.ensure_light()?;

        if self.state.work_mode == mode {
            return Ok(None);
        }

        let epoch = self.begin_edit(ChannelValue::WorkMode(mode), &[], false);
        info!(device_id = self.device.id, "🎨 Switch '{}' to {} mode", self.device.name, mode);
        Ok(Some(self.dispatch(DispatchMode::Immediate, Channel::WorkMode, epoch)))
    }

    /// Settles the pending edit the outcome belongs to. A superseded request
    /// that succeeded only moves the rollback point forward.
    pub fn resolve(&mut self, channel: Channel, epoch: u64, outcome: Result<(), ApiError>, now: Instant, notice_duration: Duration) -> Resolution {
        let Some(edit) = self.pending.get_mut(&channel) else {
            return Resolution::Stale;
        };
        if edit.epoch != epoch {
            if outcome.is_ok() {
                edit.confirm_superseded(epoch);
            }
            debug!(device_id = self.device.id, "Superseded {} command settled (epoch {})", channel, epoch);
            return Resolution::Stale;
        }
        let Some(edit) = self.pending.remove(&channel) else {
            return Resolution::Stale;
        };

        match outcome {
            Ok(()) => {
                debug!(device_id = self.device.id, "✅ {} confirmed for '{}'", channel, self.device.name);
                Resolution::Confirmed
            }
            Err(e) => {
                for value in edit.rollback {
                    // Another edit still owns this channel
                    if self.is_shadowed(value.channel()) {
                        continue;
                    }
                    self.state.set(value);
                }
                warn!(device_id = self.device.id, "↩️ Rolled back {} on '{}': {}", channel, self.device.name, e);
                self.notice = Some(Notice::new(e.to_string(), now, notice_duration));
                Resolution::RolledBack
            }
        }
    }

    /// Merges a fresh snapshot: idle channels take the server value, pending
    /// channels keep the local one.
    pub fn refresh(&mut self, device: Device) {
        self.device = device;
        let decoded = decode(&self.device);

        for channel in CHANNELS {
            if !self.is_shadowed(channel) {
                self.state.set(decoded.get(channel));
            }
        }
    }

    fn begin_edit(&mut self, target: ChannelValue, companions: &[ChannelValue], enters_colour_mode: bool) -> u64 {
        let channel = target.channel();
        let powers_on = !self.state.power;
        let epoch = self.next_epoch();

        let mut edit = self.pending.remove(&channel).unwrap_or_else(|| PendingEdit {
            channel,
            target,
            rollback: Vec::new(),
            epoch,
            powers_on: false,
            enters_colour_mode: false,
            batches: Vec::new(),
        });

        let mut touched = Vec::with_capacity(companions.len() + 2);
        touched.push(target);
        touched.extend_from_slice(companions);
        if powers_on {
            touched.push(ChannelValue::Power(true));
        }

        for value in touched {
            if !edit.rollback.iter().any(|previous| previous.channel() == value.channel()) {
                edit.rollback.push(self.state.get(value.channel()));
            }
            self.state.set(value);
        }

        edit.target = target;
        edit.epoch = epoch;
        edit.powers_on |= powers_on;
        edit.enters_colour_mode |= enters_colour_mode;
        edit.record_batch();
        self.pending.insert(channel, edit);

        epoch
    }

    fn dispatch(&self, mode: DispatchMode, channel: Channel, epoch: u64) -> Dispatch {
        let commands = self.pending.get(&channel).map(|edit| self.payload(edit)).unwrap_or_default();
        Dispatch {
            mode,
            channel,
            epoch,
            commands,
        }
    }

    fn payload(&self, edit: &PendingEdit) -> Vec<DeviceCommand> {
        let category = &self.device.category;
        let mut commands = Vec::with_capacity(3);

        if edit.powers_on {
            commands.push(encode(category, FieldValue::Power(true)));
        }
        if edit.enters_colour_mode {
            commands.push(encode(category, FieldValue::WorkMode(WorkMode::Colour)));
        }

        let field = match edit.target {
            ChannelValue::Power(on) => FieldValue::Power(on),
            ChannelValue::Brightness(value) => FieldValue::Brightness(value),
            ChannelValue::ColourTemp(value) => FieldValue::ColourTemp(value),
            ChannelValue::Colour(colour) => FieldValue::Colour(colour),
            ChannelValue::WorkMode(mode) => FieldValue::WorkMode(mode),
        };
        commands.push(encode(category, field));

        commands
    }

    fn is_shadowed(&self, channel: Channel) -> bool {
        self.pending.values().any(|edit| edit.touches(channel))
    }

    fn next_epoch(&mut self) -> u64 {
        self.last_epoch += 1;
        self.last_epoch
    }

    fn ensure_controllable(&self) -> Result<(), GestureError> {
        if self.device.online {
            Ok(())
        } else {
            Err(GestureError::Offline(self.device.id.clone()))
        }
    }

    fn ensure_light(&self) -> Result<(), GestureError> {
        if self.device.is_light() {
            Ok(())
        } else {
            Err(GestureError::Unsupported(self.device.id.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Colour, DeviceCategory, StatusItem};
    use pretty_assertions::assert_eq;

    const NOTICE: Duration = Duration::from_secs(4);

    fn light(power: bool, device_brightness: u16) -> Device {
        Device {
            id: "light".to_string(),
            name: "Sala".to_string(),
            online: true,
            category: DeviceCategory::Light,
            status: vec![
                StatusItem::new("switch_led", power),
                StatusItem::new("bright_value_v2", device_brightness),
                StatusItem::new("temp_value_v2", 500),
                StatusItem::new("work_mode", "white"),
                StatusItem::new("colour_data_v2", r#"{"h":0,"s":1000,"v":1000}"#),
            ],
        }
    }

    fn failure() -> Result<(), ApiError> {
        Err(ApiError::Rejected("device is offline".to_string()))
    }

    #[test]
    fn new_decodes_the_device() {
        let control = DeviceControl::new(light(true, 177));

        assert!(control.state().power);
        assert_eq!(control.state().brightness, 500);
        assert!(control.pending_channels().is_empty());
    }

    #[test]
    fn a_brightness_gesture_applies_the_snapped_value_at_once() -> Result<(), GestureError> {
        let mut control = DeviceControl::new(light(true, 1000));

        let dispatch = control.gesture(Gesture::Brightness(245))?;

        assert_eq!(control.state().brightness, 250);
        assert_eq!(dispatch.mode, DispatchMode::Debounced);
        assert_eq!(dispatch.channel, Channel::Brightness);
        assert_eq!(dispatch.commands, vec![DeviceCommand::new("bright_value_v2", 31)]);
        assert_eq!(control.pending_channels(), vec![Channel::Brightness]);

        Ok(())
    }

    #[test]
    fn a_gesture_on_a_device_that_is_off_bundles_power_on() -> Result<(), GestureError> {
        let mut control = DeviceControl::new(light(false, 1000));

        let first = control.gesture(Gesture::Brightness(500))?;
        let second = control.gesture(Gesture::Brightness(750))?;

        assert!(control.state().power);
        assert_eq!(
            first.commands,
            vec![DeviceCommand::new("switch_led", true), DeviceCommand::new("bright_value_v2", 177)]
        );
        assert_eq!(
            second.commands,
            vec![DeviceCommand::new("switch_led", true), DeviceCommand::new("bright_value_v2", 487)]
        );
        assert!(second.epoch > first.epoch);

        Ok(())
    }

    #[test]
    fn refresh_does_not_clobber_a_pending_edit() -> Result<(), GestureError> {
        let mut control = DeviceControl::new(light(true, 1000));
        control.gesture(Gesture::Brightness(500))?;

        let mut refreshed = light(true, 31);
        refreshed.status[2] = StatusItem::new("temp_value_v2", 100);
        control.refresh(refreshed);

        assert_eq!(control.state().brightness, 500);
        assert_eq!(control.state().colour_temp, 100);

        Ok(())
    }

    #[test]
    fn refresh_is_honored_once_the_edit_is_confirmed() -> Result<(), GestureError> {
        let mut control = DeviceControl::new(light(true, 1000));
        let dispatch = control.gesture(Gesture::Brightness(500))?;

        let resolution = control.resolve(Channel::Brightness, dispatch.epoch, Ok(()), Instant::now(), NOTICE);
        assert_eq!(resolution, Resolution::Confirmed);
        assert_eq!(control.state().brightness, 500);

        control.refresh(light(true, 487));
        assert_eq!(control.state().brightness, 750);

        Ok(())
    }

    #[test]
    fn a_failed_edit_rolls_back_to_the_value_before_the_burst() -> Result<(), GestureError> {
        let mut control = DeviceControl::new(light(true, 1000));
        control.gesture(Gesture::Brightness(500))?;
        let last = control.gesture(Gesture::Brightness(750))?;
        let now = Instant::now();

        let resolution = control.resolve(Channel::Brightness, last.epoch, failure(), now, NOTICE);

        assert_eq!(resolution, Resolution::RolledBack);
        assert_eq!(control.state().brightness, 1000);
        assert_eq!(control.notice(now).map(Notice::message), Some("device is offline"));
        assert_eq!(control.notice(now + NOTICE), None);

        control.refresh(light(true, 177));
        assert_eq!(control.state().brightness, 500);

        Ok(())
    }

    #[test]
    fn a_failed_implicit_power_on_is_rolled_back_too() -> Result<(), GestureError> {
        let mut control = DeviceControl::new(light(false, 1000));
        let dispatch = control.gesture(Gesture::ColourTemp(300))?;

        control.resolve(Channel::ColourTemp, dispatch.epoch, failure(), Instant::now(), NOTICE);

        assert!(!control.state().power);
        assert_eq!(control.state().colour_temp, 500);

        Ok(())
    }

    #[test]
    fn a_superseded_outcome_is_ignored() -> Result<(), GestureError> {
        let mut control = DeviceControl::new(light(true, 1000));
        let first = control.gesture(Gesture::Brightness(500))?;
        control.gesture(Gesture::Brightness(750))?;

        let resolution = control.resolve(Channel::Brightness, first.epoch, failure(), Instant::now(), NOTICE);

        assert_eq!(resolution, Resolution::Stale);
        assert_eq!(control.state().brightness, 750);
        assert_eq!(control.pending_channels(), vec![Channel::Brightness]);

        Ok(())
    }

    #[test]
    fn a_failed_power_toggle_reverts_the_flip() -> Result<(), GestureError> {
        let mut control = DeviceControl::new(light(false, 1000));

        let dispatches = control.toggle_power()?;
        assert!(control.state().power);
        assert_eq!(dispatches.len(), 1);
        assert_eq!(dispatches[0].mode, DispatchMode::Immediate);
        assert_eq!(dispatches[0].commands, vec![DeviceCommand::new("switch_led", true)]);

        control.resolve(Channel::Power, dispatches[0].epoch, failure(), Instant::now(), NOTICE);
        assert!(!control.state().power);

        Ok(())
    }

    #[test]
    fn a_power_toggle_in_flight_survives_a_refresh() -> Result<(), GestureError> {
        let mut control = DeviceControl::new(light(false, 1000));
        control.toggle_power()?;

        control.refresh(light(false, 1000));

        assert!(control.state().power);

        Ok(())
    }

    #[test]
    fn turning_off_strips_power_on_from_waiting_batches() -> Result<(), GestureError> {
        let mut control = DeviceControl::new(light(false, 1000));
        let gesture = control.gesture(Gesture::Brightness(500))?;

        let dispatches = control.toggle_power()?;

        assert!(!control.state().power);
        assert_eq!(dispatches.len(), 2);
        assert_eq!(dispatches[0].commands, vec![DeviceCommand::new("switch_led", false)]);
        assert_eq!(dispatches[1].mode, DispatchMode::Debounced);
        assert_eq!(dispatches[1].commands, vec![DeviceCommand::new("bright_value_v2", 177)]);
        assert!(!control.is_current(Channel::Brightness, gesture.epoch));
        assert!(control.is_current(Channel::Brightness, dispatches[1].epoch));

        Ok(())
    }

    #[test]
    fn a_colour_gesture_enters_colour_mode() -> Result<(), GestureError> {
        let mut control = DeviceControl::new(light(true, 1000));

        let dispatch = control.gesture(Gesture::Colour(Colour::new(240, 1000, 1000)))?;

        assert_eq!(control.state().work_mode, WorkMode::Colour);
        assert_eq!(
            dispatch.commands,
            vec![
                DeviceCommand::new("work_mode", "colour"),
                DeviceCommand::new("colour_data_v2", r#"{"h":240,"s":1000,"v":1000}"#),
            ]
        );

        control.resolve(Channel::Colour, dispatch.epoch, failure(), Instant::now(), NOTICE);
        assert_eq!(control.state().work_mode, WorkMode::White);
        assert_eq!(control.state().colour, Colour::default());

        Ok(())
    }

    #[test]
    fn a_colour_value_gesture_mirrors_brightness() -> Result<(), GestureError> {
        let mut control = DeviceControl::new(light(true, 1000));

        let dispatch = control.gesture(Gesture::ColourValue(490))?;

        assert_eq!(control.state().colour, Colour::new(0, 1000, 500));
        assert_eq!(control.state().brightness, 500);
        assert_eq!(
            dispatch.commands,
            vec![DeviceCommand::new("colour_data_v2", r#"{"h":0,"s":1000,"v":177}"#)]
        );

        Ok(())
    }

    #[test]
    fn colour_mode_is_kept_when_the_value_follows_a_hue_pick() -> Result<(), GestureError> {
        let mut control = DeviceControl::new(light(true, 1000));

        control.gesture(Gesture::Colour(Colour::new(120, 1000, 1000)))?;
        let dispatch = control.gesture(Gesture::ColourValue(750))?;

        assert_eq!(dispatch.commands[0], DeviceCommand::new("work_mode", "colour"));
        assert_eq!(dispatch.commands.len(), 2);

        Ok(())
    }

    #[test]
    fn channels_hold_independent_edits() -> Result<(), GestureError> {
        let mut control = DeviceControl::new(light(true, 1000));

        let brightness = control.gesture(Gesture::Brightness(500))?;
        let colour = control.gesture(Gesture::Colour(Colour::new(60, 1000, 1000)))?;

        assert_ne!(brightness.channel, colour.channel);
        assert!(control.is_current(Channel::Brightness, brightness.epoch));
        assert!(control.is_current(Channel::Colour, colour.epoch));

        control.resolve(Channel::Colour, colour.epoch, failure(), Instant::now(), NOTICE);
        assert_eq!(control.state().brightness, 500);

        Ok(())
    }

    #[test]
    fn selecting_the_active_work_mode_is_a_no_op() -> Result<(), GestureError> {
        let mut control = DeviceControl::new(light(true, 1000));

        assert_eq!(control.set_work_mode(WorkMode::White)?, None);
        assert!(control.pending_channels().is_empty());

        Ok(())
    }

    #[test]
    fn switching_work_mode_while_off_is_one_batch() -> Result<(), GestureError> {
        let mut control = DeviceControl::new(light(false, 1000));

        let dispatch = control.set_work_mode(WorkMode::Colour)?.expect("a dispatch");

        assert_eq!(dispatch.mode, DispatchMode::Immediate);
        assert_eq!(
            dispatch.commands,
            vec![DeviceCommand::new("switch_led", true), DeviceCommand::new("work_mode", "colour")]
        );
        assert!(control.state().power);

        Ok(())
    }

    #[test]
    fn a_failed_work_mode_switch_reverts_mode_and_power() -> Result<(), GestureError> {
        let mut control = DeviceControl::new(light(false, 1000));
        let dispatch = control.set_work_mode(WorkMode::Colour)?.expect("a dispatch");

        let resolution = control.resolve(Channel::WorkMode, dispatch.epoch, failure(), Instant::now(), NOTICE);

        assert_eq!(resolution, Resolution::RolledBack);
        assert!(!control.state().power);
        assert_eq!(control.state().work_mode, WorkMode::White);
        assert!(control.pending_channels().is_empty());

        Ok(())
    }

    #[test]
    fn refresh_keeps_the_brightness_mirrored_by_a_colour_value_edit() -> Result<(), GestureError> {
        let mut control = DeviceControl::new(light(true, 1000));
        control.gesture(Gesture::ColourValue(500))?;

        control.refresh(light(true, 1000));

        assert_eq!(control.state().brightness, 500);
        assert_eq!(control.state().colour, Colour::new(0, 1000, 500));

        Ok(())
    }

    #[test]
    fn a_failure_after_a_confirmed_batch_rolls_back_to_the_confirmed_value() -> Result<(), GestureError> {
        let mut control = DeviceControl::new(light(true, 1000));
        let first = control.gesture(Gesture::Brightness(500))?;
        let second = control.gesture(Gesture::Brightness(750))?;
        let now = Instant::now();

        assert_eq!(control.resolve(Channel::Brightness, first.epoch, Ok(()), now, NOTICE), Resolution::Stale);
        assert_eq!(control.resolve(Channel::Brightness, second.epoch, failure(), now, NOTICE), Resolution::RolledBack);

        assert_eq!(control.state().brightness, 500);

        Ok(())
    }

    #[test]
    fn a_failed_superseded_batch_keeps_the_original_rollback() -> Result<(), GestureError> {
        let mut control = DeviceControl::new(light(true, 1000));
        let first = control.gesture(Gesture::Brightness(500))?;
        let second = control.gesture(Gesture::Brightness(750))?;
        let now = Instant::now();

        control.resolve(Channel::Brightness, first.epoch, failure(), now, NOTICE);
        control.resolve(Channel::Brightness, second.epoch, failure(), now, NOTICE);

        assert_eq!(control.state().brightness, 1000);

        Ok(())
    }

    #[test]
    fn a_confirmed_toggle_is_kept_when_the_next_one_fails() -> Result<(), GestureError> {
        let mut control = DeviceControl::new(light(false, 1000));
        let on = control.toggle_power()?;
        let off = control.toggle_power()?;
        let now = Instant::now();

        control.resolve(Channel::Power, on[0].epoch, Ok(()), now, NOTICE);
        control.resolve(Channel::Power, off[0].epoch, failure(), now, NOTICE);

        assert!(control.state().power);

        Ok(())
    }

    #[test]
    fn an_offline_device_rejects_controls() {
        let mut device = light(true, 1000);
        device.online = false;
        let mut control = DeviceControl::new(device);

        assert_eq!(control.gesture(Gesture::Brightness(500)), Err(GestureError::Offline("light".to_string())));
        assert_eq!(control.toggle_power(), Err(GestureError::Offline("light".to_string())));
    }

    #[test]
    fn a_switch_only_supports_power() -> Result<(), GestureError> {
        let mut control = DeviceControl::new(Device {
            id: "plug".to_string(),
            name: "Tomada".to_string(),
            online: true,
            category: DeviceCategory::Switch,
            status: vec![StatusItem::new("switch_1", false)],
        });

        assert_eq!(control.gesture(Gesture::ColourTemp(10)), Err(GestureError::Unsupported("plug".to_string())));
        let dispatches = control.toggle_power()?;
        assert_eq!(dispatches[0].commands, vec![DeviceCommand::new("switch_1", true)]);

        Ok(())
    }
}
