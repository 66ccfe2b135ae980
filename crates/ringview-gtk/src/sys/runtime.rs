use crate::events::AppEvent;
use async_channel::Sender;
use std::path::PathBuf;
use std::thread;
use tokio::runtime::Runtime;

pub fn start_background_services(tx: Sender<AppEvent>, config_path: Option<PathBuf>) {
    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create Tokio runtime: {}", e);
                return;
            }
        };

        rt.block_on(async {
            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::sys::server::run_server(tx).await;
                });
            }

            if let Some(path) = config_path {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::sys::watcher::run_async_watcher(path, tx).await;
                });
            }

            std::future::pending::<()>().await;
        });
    });
}
