/// Messages from the background services to the GTK main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ConfigReload,
}
