// Library surface used by the binary and the integration tests. The TUI
// itself lives bin-side (src/tui) since nothing outside the binary draws.
pub mod config;
pub mod engine;
pub mod feed;
pub mod prefs;
pub mod session;
