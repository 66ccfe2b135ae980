use std::process::{Command, Stdio};

/// Spawns `command` through the shell and lets it run detached.
pub fn spawn_command(command: &str) -> std::io::Result<()> {
    Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(())
}
