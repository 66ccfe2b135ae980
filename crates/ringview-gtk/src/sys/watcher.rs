use crate::events::AppEvent;
use async_channel::Sender;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};

/// Absolute form of `path`, so its parent is a directory notify can watch and
/// event paths compare equal. Falls back to joining the working directory
/// when the file does not exist yet.
pub fn resolve_watch_path(path: &Path) -> PathBuf {
    fs_err::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Sends [`AppEvent::ConfigReload`] whenever `config_path` is written,
/// created or removed.
pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_gets_watchable_parent() {
        let resolved = resolve_watch_path(Path::new("ring.toml"));
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("ring.toml"));
        assert!(resolved.parent().is_some_and(|p| !p.as_os_str().is_empty()));
    }

    #[test]
    fn test_existing_path_is_canonicalized() {
        let dir = std::env::temp_dir();
        let file = dir.join("ringview-watch-test.toml");
        fs_err::write(&file, "").unwrap();

        let resolved = resolve_watch_path(&file);
        assert_eq!(resolved, fs_err::canonicalize(&file).unwrap());
        fs_err::remove_file(&file).unwrap();
    }
}
