//! Console Logging
//!
//! `log` facade backed by the browser console. Lines look like
//! `[ACTIONS] moved card 4 to column 2`.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.target(), &record.args().to_string());
        let js = wasm_bindgen::JsValue::from_str(&line);
        match record.level() {
            Level::Error => web_sys::console::error_1(&js),
            Level::Warn => web_sys::console::warn_1(&js),
            Level::Info => web_sys::console::info_1(&js),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&js),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Safe to call more than once.
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn format_line(target: &str, message: &str) -> String {
    format!("[{}] {}", tag(target), message)
}

/// Last path segment of a module target, upper-cased
fn tag(target: &str) -> String {
    target.rsplit("::").next().unwrap_or(target).to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_uses_last_module_segment() {
        assert_eq!(tag("kanban_board_ui::actions"), "ACTIONS");
        assert_eq!(tag("kanban_board_ui::components::card_view"), "CARD_VIEW");
        assert_eq!(tag("dnd"), "DND");
    }

    #[test]
    fn test_format_line() {
        assert_eq!(format_line("kanban_board_ui::app", "Loaded 3 columns"), "[APP] Loaded 3 columns");
    }
}
