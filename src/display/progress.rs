//! Progress display for fetches that take a while

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

const SPINNER_UPDATE_INTERVAL_MS: u64 = 100;
const CLEAR_LINE_WIDTH: usize = 100;

/// Simple spinner to show progress of asynchronous operations
pub struct ProgressSpinner {
    message: String,
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ProgressSpinner {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    /// Start spinner. Does nothing when stdout is not a terminal.
    pub fn start(&mut self) {
        if !atty::is(atty::Stream::Stdout) || self.handle.is_some() {
            return;
        }

        self.running.store(true, Ordering::Relaxed);
        let running = Arc::clone(&self.running);
        let message = self.message.clone();

        let handle = thread::spawn(move || {
            let spinner_chars = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
            let mut index = 0;

            while running.load(Ordering::Relaxed) {
                print!("\r{} {}", spinner_chars[index], message);
                let _ = io::stdout().flush();

                index = (index + 1) % spinner_chars.len();
                thread::sleep(Duration::from_millis(SPINNER_UPDATE_INTERVAL_MS));
            }

            print!("\r{:<width$}\r", "", width = CLEAR_LINE_WIDTH);
            let _ = io::stdout().flush();
        });

        self.handle = Some(handle);
    }

    /// Stop spinner and display completion message
    pub fn stop(&mut self, completion_message: Option<&str>) {
        self.running.store(false, Ordering::Relaxed);

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }

        if let Some(msg) = completion_message {
            println!(" {}", msg);
            let _ = io::stdout().flush();
        }
    }
}

impl Drop for ProgressSpinner {
    fn drop(&mut self) {
        self.stop(None);
    }
}

/// Types of operation status
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OperationStatus {
    Success,
    Warning,
}

pub fn status_line(operation: &str, status: OperationStatus) -> String {
    let (symbol, label) = match status {
        OperationStatus::Success => ("✅", "Completed"),
        OperationStatus::Warning => ("⚠️", "Warning"),
    };
    // leading space keeps emoji from being clipped
    format!(" {} {}: {}", symbol, label, operation)
}

/// Display operation status
pub fn display_status(operation: &str, status: OperationStatus) {
    println!("{}", status_line(operation, status));
}
