//! `tracing` output for the browser.
//!
//! Formatted events are buffered per event and handed to the matching
//! `console.*` method when the writer is dropped.

use std::io::{self, Write};

use tracing::{Level, Metadata};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LOG_FILTER;

struct ConsoleWriter {
    buf: Vec<u8>,
    level: Level,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            buf: Vec::with_capacity(256),
            level,
        }
    }
}

impl Write for ConsoleWriter {
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

        let text = String::from_utf8_lossy(&self.buf);
        let line = text.trim_end();
        match self.level {
            Level::ERROR => web_sys::console::error_1(&line.into()),
            Level::WARN => web_sys::console::warn_1(&line.into()),
            Level::INFO => web_sys::console::info_1(&line.into()),
            _ => web_sys::console::debug_1(&line.into()),
        }
    }
}

#[derive(Clone, Copy, Default)]
struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init() {
    let env_filter = EnvFilter::try_new(LOG_FILTER).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(ConsoleMakeWriter)
            .with_ansi(false)
            .without_time()
            .with_target(true),
    );

    if subscriber.try_init().is_err() {
        return;
    }

    tracing::info!(version = crate::config::APP_VERSION, "tracing initialized");
}
