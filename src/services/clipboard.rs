//! Clipboard copy with a fallback path
//!
//! The primary sink pipes text into a platform clipboard command. When none
//! is available (e.g. over SSH) the OSC 52 escape asks the terminal itself to
//! set the clipboard. Either way the user gets exactly one notification.

use crate::model::NotificationQueue;
use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;
use std::io::{self, Write};
use std::process::{Command, Stdio};

/// Somewhere text can be copied to
pub trait ClipboardSink {
    fn name(&self) -> &'static str;
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// Copies through the first working platform clipboard command
pub struct CommandClipboard {
    candidates: Vec<(&'static str, Vec<&'static str>)>,
}

impl Default for CommandClipboard {
    fn default() -> Self {
        #[cfg(target_os = "macos")]
        let candidates = vec![("pbcopy", vec![])];

        #[cfg(target_os = "windows")]
        let candidates = vec![("clip", vec![])];

        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        let candidates = vec![
            ("wl-copy", vec![]),
            ("xclip", vec!["-selection", "clipboard"]),
            ("xsel", vec!["--clipboard", "--input"]),
        ];

        Self { candidates }
    }
}

impl CommandClipboard {
    fn run(program: &str, args: &[&str], text: &str) -> Result<()> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to launch {}", program))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(anyhow!("{} exited with status {}", program, status));
        }
        Ok(())
    }
}

impl ClipboardSink for CommandClipboard {
    fn name(&self) -> &'static str {
        "command"
    }

    fn copy(&mut self, text: &str) -> Result<()> {
        let mut last_error = anyhow!("no clipboard command configured");
        for (program, args) in &self.candidates {
            match Self::run(program, args, text) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::debug!(program, error = %e, "clipboard command failed");
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }
}

/// `ESC ] 52 ; c ; <base64> BEL`: set the system clipboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetClipboard(pub String);

impl crossterm::Command for SetClipboard {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "\x1b]52;c;{}\x07", STANDARD.encode(self.0.as_bytes()))
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "OSC 52 needs an ANSI terminal",
        ))
    }
}

/// Asks the terminal to set the clipboard with an OSC 52 sequence
#[derive(Default)]
pub struct Osc52Clipboard;

impl ClipboardSink for Osc52Clipboard {
    fn name(&self) -> &'static str {
        "osc52"
    }

    fn copy(&mut self, text: &str) -> Result<()> {
        crossterm::execute!(io::stdout(), SetClipboard(text.to_string()))?;
        Ok(())
    }
}

/// Copy `text`, trying `fallback` if `primary` fails, and post one notification
pub fn copy_to_clipboard(
    text: &str,
    primary: &mut dyn ClipboardSink,
    fallback: &mut dyn ClipboardSink,
    notifications: &mut NotificationQueue,
) -> bool {
    let result = primary.copy(text).or_else(|primary_err| {
        tracing::debug!(sink = primary.name(), error = %primary_err, "primary clipboard failed, trying fallback");
        fallback.copy(text)
    });

    match result {
        Ok(()) => {
            notifications.success("Copied to clipboard");
            true
        }
        Err(e) => {
            tracing::warn!(sink = fallback.name(), error = %e, "clipboard copy failed");
            notifications.error("Copy failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Severity;

    struct FakeSink {
        works: bool,
        copied: Vec<String>,
    }

    impl FakeSink {
        fn new(works: bool) -> Self {
            Self {
                works,
                copied: Vec::new(),
            }
        }
    }

    impl ClipboardSink for FakeSink {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn copy(&mut self, text: &str) -> Result<()> {
            if self.works {
                self.copied.push(text.to_string());
                Ok(())
            } else {
                Err(anyhow!("denied"))
            }
        }
    }

    #[test]
    fn test_primary_success_skips_fallback() {
        let mut primary = FakeSink::new(true);
        let mut fallback = FakeSink::new(true);
        let mut queue = NotificationQueue::default();

        assert!(copy_to_clipboard("abc", &mut primary, &mut fallback, &mut queue));
        assert_eq!(primary.copied, vec!["abc"]);
        assert!(fallback.copied.is_empty());
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.active()[0].severity, Severity::Success);
    }

    #[test]
    fn test_fallback_used_when_primary_fails() {
        let mut primary = FakeSink::new(false);
        let mut fallback = FakeSink::new(true);
        let mut queue = NotificationQueue::default();

        assert!(copy_to_clipboard("abc", &mut primary, &mut fallback, &mut queue));
        assert_eq!(fallback.copied, vec!["abc"]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.active()[0].message, "Copied to clipboard");
    }

    #[test]
    fn test_both_failing_posts_single_error() {
        let mut primary = FakeSink::new(false);
        let mut fallback = FakeSink::new(false);
        let mut queue = NotificationQueue::default();

        assert!(!copy_to_clipboard("abc", &mut primary, &mut fallback, &mut queue));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.active()[0].severity, Severity::Error);
        assert_eq!(queue.active()[0].message, "Copy failed");
    }

    #[test]
    fn test_set_clipboard_writes_osc52() {
        use crossterm::Command;

        let mut out = String::new();
        SetClipboard("Mon: 3".to_string()).write_ansi(&mut out).unwrap();
        assert_eq!(out, "\x1b]52;c;TW9uOiAz\x07");
    }

    #[test]
    fn test_command_clipboard_without_candidates_fails() {
        let mut sink = CommandClipboard { candidates: Vec::new() };
        assert!(sink.copy("abc").is_err());
    }
}
