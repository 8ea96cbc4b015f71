//! `tracing` output to the browser console.

use std::io;

use openerp_viewrouter::RouterConfig;
use tracing::Level;
use wasm_bindgen::JsValue;

/// Buffers one formatted event and logs it to the console when dropped.
#[derive(Default)]
struct ConsoleWriter {
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        web_sys::console::log_1(&JsValue::from_str(line.trim_end()));
    }
}

/// Parse a level name, defaulting to `INFO`.
pub fn parse_level(level: &str) -> Level {
    level.trim().parse().unwrap_or(Level::INFO)
}

/// Level requested by the `log_level` key of a router config.
pub fn config_level(config: &RouterConfig) -> Level {
    parse_level(&config.log_level)
}

/// Install the console subscriber. Returns false if one was already set.
pub fn install(level: &str) -> bool {
    install_level(parse_level(level))
}

/// Install the console subscriber at the config's `log_level`.
pub fn install_from(config: &RouterConfig) -> bool {
    install_level(config_level(config))
}

fn install_level(level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .without_time()
        .with_writer(ConsoleWriter::default)
        .try_init()
        .is_ok()
}
