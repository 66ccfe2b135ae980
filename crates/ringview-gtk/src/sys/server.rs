use crate::events::AppEvent;
use async_channel::Sender;
use ringview::SOCKET_PATH;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

fn parse_command(line: &str) -> Option<AppEvent> {
    match line.trim() {
        "reload" => Some(AppEvent::Reload),
        "cancel" => Some(AppEvent::Cancel),
        _ => None,
    }
}

pub async fn run_server(tx: Sender<AppEvent>) {
    // stale socket from a previous run
    if std::fs::metadata(SOCKET_PATH).is_ok() {
        let _ = std::fs::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket: {}", e);
            return;
        }
    };

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        match parse_command(&line) {
                            Some(event) => {
                                let _ = tx.send(event).await;
                            }
                            None => log::warn!("Unknown command '{}'", line.trim()),
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("reload\n"), Some(AppEvent::Reload));
        assert_eq!(parse_command("  cancel "), Some(AppEvent::Cancel));
        assert_eq!(parse_command("show"), None);
    }
}
