use crate::controller::DashboardView;
use futures::StreamExt;
use tokio::sync::watch::Receiver;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, instrument, warn};

/// Reports every published view through the log.
#[instrument(skip_all)]
pub async fn view_listener(rx: Receiver<DashboardView>) {
    let mut views = WatchStream::from_changes(rx);

    while let Some(view) = views.next().await {
        if !view.loaded {
            continue;
        }

        debug!(
            "📋 {} light(s), {} switch(es), {} other device(s){}",
            view.lights().count(),
            view.switches().count(),
            view.others().count(),
            if view.editing { ", editing" } else { "" }
        );
        if let Some(notice) = &view.notice {
            warn!("📣 {}", notice);
        }
        for device in &view.devices {
            if let Some(notice) = &device.notice {
                warn!(device_id = device.id, "📣 '{}': {}", device.name, notice);
            }
            if !device.pending.is_empty() {
                debug!(device_id = device.id, "⏳ '{}' is waiting on {:?}", device.name, device.pending);
            }
        }
    }
}
