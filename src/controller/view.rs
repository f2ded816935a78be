use crate::controller::DeviceControl;
use crate::domain::{Channel, DeviceCategory, DomainState};
use crate::perceptual::{active_preset, hsv_to_hsl};
use crate::settings::DeviceSettingsStore;
use tokio::time::Instant;

/// What the dashboard renders. Nothing is rendered until the settings overlay
/// has loaded, so devices never flash with their vendor names.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct DashboardView {
    pub loaded: bool,
    pub editing: bool,
    pub notice: Option<String>,
    pub devices: Vec<DeviceView>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct DeviceView {
    pub id: String,
    pub name: String,
    pub category: DeviceCategory,
    pub online: bool,
    pub hidden: bool,
    pub controls_enabled: bool,
    pub state: DomainState,
    pub pending: Vec<Channel>,
    pub active_preset: Option<usize>,
    pub colour_preview: String,
    pub notice: Option<String>,
}

impl DashboardView {
    pub fn project(controls: &[DeviceControl], settings: &DeviceSettingsStore, editing: bool, notice: Option<String>, now: Instant) -> Self {
        if !settings.is_loaded() {
            return DashboardView {
                editing,
                notice,
                ..Default::default()
            };
        }

        let devices = controls
            .iter()
            .filter(|control| editing || !settings.is_hidden(control.id()))
            .map(|control| {
                let device = control.device();
                let state = *control.state();
                DeviceView {
                    id: device.id.clone(),
                    name: settings.name(&device.id, &device.name).to_string(),
                    category: device.category.clone(),
                    online: device.online,
                    hidden: settings.is_hidden(&device.id),
                    controls_enabled: device.online && !editing,
                    state,
                    pending: control.pending_channels(),
                    active_preset: active_preset(&state.colour),
                    colour_preview: hsv_to_hsl(&state.colour),
                    notice: control.notice(now).map(|notice| notice.message().to_string()),
                }
            })
            .collect();

        DashboardView {
            loaded: true,
            editing,
            notice,
            devices,
        }
    }

    pub fn device(&self, id: &str) -> Option<&DeviceView> {
        self.devices.iter().find(|device| device.id == id)
    }

    pub fn lights(&self) -> impl Iterator<Item = &DeviceView> {
        self.by_category(DeviceCategory::Light)
    }

    pub fn switches(&self) -> impl Iterator<Item = &DeviceView> {
        self.by_category(DeviceCategory::Switch)
    }

    pub fn others(&self) -> impl Iterator<Item = &DeviceView> {
        self.by_category(DeviceCategory::Other)
    }

    fn by_category(&self, category: DeviceCategory) -> impl Iterator<Item = &DeviceView> {
        self.devices.iter().filter(move |device| device.category == category)
    }
}
