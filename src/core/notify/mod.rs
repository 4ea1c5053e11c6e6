//! Completion notification through the relay
//!
//! Job bodies are POSTed to `<base_url>/<notify_id>` until the relay reports
//! a consumer waiting on that id, or the job deadline passes.

mod relay;
mod types;

pub use relay::RelayNotifier;
pub use types::{NotifyReceipt, RelayAck};
