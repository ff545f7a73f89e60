//! # Events Module
//!
//! Progress reporting for the cleaner and the reporter.
//!
//! The core emits events through a channel so the CLI (or any other
//! front end) can draw progress without the core knowing about it.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Clean(CleanEvent::FileWritten { destination, .. }) = event {
//!             println!("wrote {}", destination.display());
//!         }
//!     }
//! });
//!
//! sanitizer.clean_all_with(&mut std::io::stdout(), &sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
