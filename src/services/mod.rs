//! Collaborators that feed the presentation layer
//!
//! - Background transfers with simulated progress
//! - Clipboard copy with a fallback sink

pub mod clipboard;
pub mod transfer;

pub use clipboard::{copy_to_clipboard, ClipboardSink, CommandClipboard, Osc52Clipboard};
pub use transfer::{TransferRequest, TransferRunner};
