mod dashboard;
mod device_control;
mod gesture;
mod poller;
mod view;

pub use dashboard::{Dashboard, DashboardCommand, DashboardError, DashboardHandle, spawn};
pub use device_control::{DeviceControl, Resolution};
pub use gesture::{Dispatch, DispatchMode, Gesture, GestureError};
pub use poller::{Poller, fetch_devices};
pub use view::{DashboardView, DeviceView};
