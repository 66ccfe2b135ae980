#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Reload,
    Cancel,
    ConfigReload,
}
