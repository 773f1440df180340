//! Transient notifications and permission-gated delivery sinks.
//!
//! # Responsibility
//! - Keep the in-app toast list with auto-dismiss.
//! - Fan fired reminders out to optional platform sinks.
//!
//! # Invariants
//! - The in-app toast always appears; sinks are best-effort extras.
//! - Sink failures are logged, never propagated to the caller.

pub mod center;
pub mod sink;

pub use center::{NotificationCenter, NotifyError, Toast, ToastId, TOAST_AUTO_DISMISS_MS};
pub use sink::{NotificationSink, SinkError, SinkPermission};
