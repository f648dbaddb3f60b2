//! Terminal I/O abstraction layer.
//!
//! Handles TTY detection, color support, the standard input handle, and
//! stderr capture for testing. Commands never write to stdout.

use std::io::{self, IsTerminal, Read, Write};
use std::sync::{Arc, Mutex};

/// Writer wrapper that supports both real I/O and buffered capture.
///
/// In system mode, writes go to real stderr.
/// In test mode, writes are captured to an in-memory buffer.
struct OutputWriter(Box<dyn Write + Send>);

impl std::fmt::Debug for OutputWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OutputWriter")
    }
}

impl Write for OutputWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

/// Writer that shares a buffer with test code via `Arc<Mutex<Vec<u8>>>`.
struct SharedWriter(Arc<Mutex<Vec<u8>>>);

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self
            .0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Captured test output that can be inspected after command execution.
#[derive(Debug, Clone)]
pub struct TestOutput {
    err_buf: Arc<Mutex<Vec<u8>>>,
}

impl TestOutput {
    /// Get the captured stderr content as a string.
    pub fn stderr(&self) -> String {
        let buf = self
            .err_buf
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        String::from_utf8_lossy(&buf).to_string()
    }
}

/// I/O streams for terminal interaction.
///
/// Wraps stdin and stderr, and records whether stdin and stdout are
/// terminals.
///
/// Commands should use [`ios_eprintln!`] instead of `eprintln!()` so
/// output can be captured in tests.
pub struct IOStreams {
    // TTY state
    stdin_is_tty: bool,
    stdout_is_tty: bool,

    // Color
    color_forced: Option<bool>,

    // Input handle, handed out once. Dropping it closes the stream.
    input: Mutex<Option<Box<dyn Read + Send>>>,

    // Error stream (capturable in test mode)
    err: Arc<Mutex<OutputWriter>>,
}

impl std::fmt::Debug for IOStreams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IOStreams")
            .field("stdin_is_tty", &self.stdin_is_tty)
            .field("stdout_is_tty", &self.stdout_is_tty)
            .field("color_forced", &self.color_forced)
            .finish_non_exhaustive()
    }
}

impl IOStreams {
    /// Create `IOStreams` for the real terminal.
    pub fn system() -> Self {
        Self {
            stdin_is_tty: io::stdin().is_terminal(),
            stdout_is_tty: io::stdout().is_terminal(),
            color_forced: std::env::var("NO_COLOR").ok().map(|_| false),
            input: Mutex::new(Some(Box::new(io::stdin()))),
            err: Arc::new(Mutex::new(OutputWriter(Box::new(io::stderr())))),
        }
    }

    /// Create `IOStreams` for testing with output captured to buffers.
    ///
    /// No stream is a TTY, color is off, and stdin is empty until
    /// [`set_stdin`](Self::set_stdin) is called. Returns the IOStreams and a
    /// `TestOutput` handle for reading captured stderr.
    ///
    /// # Example
    ///
    /// ```
    /// use sshkey_core::{IOStreams, ios_eprintln};
    ///
    /// let (ios, output) = IOStreams::test_with_output();
    /// ios_eprintln!(ios, "hello {}", 1);
    /// assert_eq!(output.stderr(), "hello 1\n");
    /// ```
    pub fn test_with_output() -> (Self, TestOutput) {
        let err_buf = Arc::new(Mutex::new(Vec::<u8>::new()));

        let ios = Self {
            stdin_is_tty: false,
            stdout_is_tty: false,
            color_forced: Some(false),
            input: Mutex::new(Some(Box::new(io::empty()))),
            err: Arc::new(Mutex::new(OutputWriter(Box::new(SharedWriter(
                err_buf.clone(),
            ))))),
        };

        let output = TestOutput { err_buf };

        (ios, output)
    }

    /// Set the stdout TTY state (for test configuration).
    pub fn set_stdout_tty(&mut self, is_tty: bool) {
        self.stdout_is_tty = is_tty;
    }

    /// Set the stdin TTY state (for test configuration).
    pub fn set_stdin_tty(&mut self, is_tty: bool) {
        self.stdin_is_tty = is_tty;
    }

    /// Replace standard input with the given bytes (for test configuration).
    pub fn set_stdin(&mut self, data: impl Into<Vec<u8>>) {
        *self
            .input
            .get_mut()
            .unwrap_or_else(std::sync::PoisonError::into_inner) =
            Some(Box::new(io::Cursor::new(data.into())));
    }

    /// Take ownership of standard input.
    ///
    /// The first call returns the real (or injected) stream. Later calls
    /// get an empty reader, the same as reading a stream that was closed.
    pub fn take_stdin(&self) -> Box<dyn Read + Send> {
        self.input
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take()
            .unwrap_or_else(|| Box::new(io::empty()))
    }

    // --- Output methods ---

    /// Write formatted output to stderr with trailing newline.
    pub fn writeln_err(&self, args: std::fmt::Arguments<'_>) {
        let mut w = self
            .err
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let _ = w.write_fmt(args);
        let _ = w.write_all(b"\n");
    }

    // --- Query methods ---

    /// Whether stdin is connected to a terminal.
    pub fn is_stdin_tty(&self) -> bool {
        self.stdin_is_tty
    }

    /// Whether stdout is connected to a terminal.
    pub fn is_stdout_tty(&self) -> bool {
        self.stdout_is_tty
    }

    /// Whether both ends of the session are attached to a terminal.
    pub fn is_interactive(&self) -> bool {
        self.is_stdin_tty() && self.is_stdout_tty()
    }

    /// Whether color output is enabled.
    pub fn color_enabled(&self) -> bool {
        if let Some(forced) = self.color_forced {
            return forced;
        }
        self.stdout_is_tty
    }

    /// Create a `ColorScheme` based on the current color settings.
    pub fn color_scheme(&self) -> ColorScheme {
        ColorScheme {
            enabled: self.color_enabled(),
        }
    }
}

/// Terminal color scheme for themed output.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    enabled: bool,
}

impl ColorScheme {
    /// Apply bold styling.
    pub fn bold(&self, text: &str) -> String {
        if self.enabled {
            console::style(text).bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Green check mark for completed actions.
    pub fn success_icon(&self) -> String {
        if self.enabled {
            console::style("✓").green().to_string()
        } else {
            "✓".to_string()
        }
    }
}

/// Write to IOStreams stderr with newline, similar to `eprintln!()`.
#[macro_export]
macro_rules! ios_eprintln {
    ($ios:expr, $($arg:tt)*) => {
        $ios.writeln_err(format_args!($($arg)*))
    };
}
