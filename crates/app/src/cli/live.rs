//! Renders a live dashboard until Ctrl+C.

use brewdesk::poller::Visibility;
use brewdesk_app::domain::dashboards::{Dashboard, LiveView};
use tracing::debug;

use crate::{cli::emit, shutdown};

pub(crate) async fn follow<D, R>(dashboard: D, render: R) -> Result<(), String>
where
    D: Dashboard,
    R: Fn(&D::View) -> String,
{
    let visibility = Visibility::visible();
    let live = LiveView::start(dashboard, visibility.watch());
    let mut views = live.watch();

    let shutdown = shutdown::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            signal = &mut shutdown => {
                signal.map_err(|error| error.to_string())?;
                break;
            }
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }

                let view = views.borrow_and_update().clone();

                if let Some(view) = view {
                    emit(&render(&view));
                }
            }
        }
    }

    debug!(dashboard = live.dashboard().name(), "live view stopped");

    live.stop();

    Ok(())
}
