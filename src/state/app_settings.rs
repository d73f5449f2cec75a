use log::LevelFilter;
use std::str::FromStr;

#[derive(Debug, Default, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
}

impl AppSettings {
    pub fn load() -> Self {
        // EPLTUI_LOG=debug raises the in-app log pane verbosity.
        let log_level = std::env::var("EPLTUI_LOG")
            .ok()
            .and_then(|level| LevelFilter::from_str(level.trim()).ok());
        Self { full_screen: false, log_level }
    }
}
