//! # Events Module
//!
//! Progress reporting for a batch run.
//!
//! The core emits events through a channel so any front end (the CLI's
//! progress bar, a web handler, a test) can follow along without the core
//! knowing who is listening.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Hash(HashEvent::Progress(p)) = event {
//!             println!("Hashed {}/{}", p.completed, p.total);
//!         }
//!     }
//! });
//!
//! let report = pipeline.run_with_events(&paths, &sender);
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
