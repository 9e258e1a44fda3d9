use crate::printer::Printer;
use std::fmt::Display;
use std::sync::OnceLock;
use termcolor::StandardStream;

static STDOUT: OnceLock<Printer<StandardStream>> = OnceLock::new();

/// The process-wide printer on stdout.
///
/// Created with coloring enabled on first use and never torn down. All the
/// free functions of this crate go through it.
pub fn printer() -> &'static Printer<StandardStream> {
    STDOUT.get_or_init(Printer::stdout)
}

/// Enables or disables coloring of the process-wide printer for every
/// thread.
pub fn set_color_enabled(enabled: bool) {
    printer().set_color_enabled(enabled);
}

/// Whether the process-wide printer currently colors its output.
pub fn is_color_enabled() -> bool {
    printer().is_color_enabled()
}

/// Prints the items to stdout on one line, separated by spaces, after the
/// tag of the calling thread.
///
/// For arguments of different types use [`tprint!`][crate::tprint].
///
/// ```
/// tprint::print(["hello", "from", "some", "thread"]);
/// tprint::print(&[1, 2, 3]);
/// ```
pub fn print<I>(items: I)
where
    I: IntoIterator,
    I::Item: Display,
{
    printer().print(items);
}

/// Prints the tag of the calling thread to stdout, followed by each item on
/// its own line.
///
/// ```
/// let primes = vec![2, 3, 5, 7];
/// tprint::print_range(&primes);
/// tprint::print_range(primes.iter().map(|p| p * p));
/// ```
pub fn print_range<I>(items: I)
where
    I: IntoIterator,
    I::Item: Display,
{
    printer().print_range(items);
}
