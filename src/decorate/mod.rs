//! Stateful decorators.
//!
//! Each decorator wraps exactly one inner callable and owns whatever state
//! it needs. That state lives inside the wrapper value, so two wrappers
//! built from the same callable never share it, and it is dropped together
//! with the wrapper. Shared state is only ever touched through `invoke`,
//! behind an atomic or a lock, so one wrapper can be called from many
//! threads at once.
//!
//! - [`Delayed`]: sleeps before delegating ([`AsyncDelayed`] with `async`)
//! - [`Counted`]: counts calls and notifies every n-th one
//! - [`Logged`]: appends a timestamped entry to a sink per call
//! - [`Tee`]: shows inputs and outputs to observers
//! - [`Recorded`]: keeps an ordered history of calls
//! - [`Timed`]: reports how long each call took
//!
//! # Examples
//!
//! ```rust
//! use fnops::callable::Callable;
//! use fnops::decorate::{delay, notify_every};
//! use std::cell::Cell;
//! use std::time::Duration;
//!
//! let markers = Cell::new(0);
//! let fetch = |id: u32| Ok::<_, String>(format!("page {id}"));
//! let polite = notify_every(delay(fetch, Duration::ZERO), 2, |_| markers.set(markers.get() + 1));
//!
//! for id in 0..4 {
//!     polite.invoke(id).unwrap();
//! }
//! assert_eq!(markers.get(), 2);
//! ```

mod counter;
mod delay;
mod logger;
mod recorder;
mod tee;
mod timer;

pub use counter::{Counted, dot_every, notify_every};
#[cfg(feature = "async")]
pub use delay::{AsyncDelayed, delay_async};
pub use delay::{Delayed, delay};
pub use logger::{Logged, LoggerConfig, log_to, log_to_writer};
pub use recorder::{CallRecord, Recorded, record};
pub use tee::{Observer, Silent, Tee, tee};
pub use timer::{Timed, Timing, timed};
