//! Console printing from many threads at once, with every line tagged by the
//! id of the thread that printed it and colored consistently per thread.
//!
//! # Use case
//!
//! When a handful of threads report progress on the same terminal using
//! plain `println!`, output from concurrent calls made up of several writes
//! can land in the middle of each other, and it is hard to tell at a glance
//! which thread said what. This crate serializes whole lines (or whole
//! blocks of lines) and prefixes each with a bracketed thread id in a color
//! chosen for that thread the first time it prints.
//!
//! # Objective
//!
//!   - Output of one call never interleaves with output of another call,
//!     no matter how many threads print concurrently.
//!
//!   - Each thread gets a color round-robin from a fixed palette in the order
//!     threads first print, and keeps it for the rest of the process.
//!
//!   - Printing never fails from the caller's point of view. An output error
//!     drops the rest of that line and the next call proceeds as usual.
//!
//! # Example
//!
//! ```
//! use std::thread;
//! use std::time::Duration;
//!
//! tprint::set_color_enabled(true);
//!
//! let workers: Vec<_> = (0..5)
//!     .map(|n| {
//!         thread::spawn(move || {
//!             for i in 0..4 {
//!                 tprint::tprint!("hello from worker", n, "round", i);
//!                 thread::sleep(Duration::from_millis(10 * i));
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for worker in workers {
//!     worker.join().unwrap();
//! }
//! ```
//!
//! <details>
//! <summary style="padding-left:3em"><a><em>▷&emsp;Click to show output</em></a></summary>
//!
//! ```text
//! [ThreadId(2)] hello from worker 0 round 0
//! [ThreadId(3)] hello from worker 1 round 0
//! [ThreadId(4)] hello from worker 2 round 0
//! [ThreadId(2)] hello from worker 0 round 1
//! [ThreadId(5)] hello from worker 3 round 0
//! [ThreadId(6)] hello from worker 4 round 0
//! ...
//! ```
//! </details>

mod global;
mod palette;
mod printer;
mod sync;

pub use crate::global::{is_color_enabled, print, print_range, printer, set_color_enabled};
pub use crate::palette::Palette;
pub use crate::printer::Printer;

#[doc(no_inline)]
pub use termcolor::ColorChoice;

/// Prints a list of values of any `Display` types on one line, separated by
/// spaces, after the tag of the calling thread.
///
/// By default the line goes to the process-wide printer on stdout. Prefix
/// the values with `in <printer>;` to use a specific [`Printer`].
///
/// ```
/// use termcolor::Buffer;
/// use tprint::{tprint, Printer};
///
/// let name = String::from("parser");
/// tprint!("stage", name, "took", 12.5, "ms");
/// tprint!();
///
/// let printer = Printer::new(Buffer::no_color());
/// tprint!(in printer; "a", 1, 'b');
/// assert!(printer.into_inner().as_slice().ends_with(b"] a 1 b\x1b[0m\n"));
/// ```
#[macro_export]
macro_rules! tprint {
    (in $printer:expr; $($item:expr),* $(,)?) => {
        $printer.print(&[$(&$item as &dyn ::core::fmt::Display),*] as &[&dyn ::core::fmt::Display])
    };
    ($($item:expr),* $(,)?) => {
        $crate::print(&[$(&$item as &dyn ::core::fmt::Display),*] as &[&dyn ::core::fmt::Display])
    };
}
