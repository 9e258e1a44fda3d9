use crate::palette::{ColorAllocator, Palette};
use crate::sync::Mutex;
use std::fmt::{self, Debug, Display};
use std::io::{Result, Write};
use std::thread::{self, ThreadId};
use termcolor::{ColorChoice, StandardStream, WriteColor};

const RESET: &str = "\x1b[0m";

/// Serializes lines of output from many threads onto one stream, tagging
/// each with the id of the thread that printed it.
///
/// Every call to [`print`][Printer::print] or
/// [`print_range`][Printer::print_range] holds the printer's lock from the
/// first byte of its tag to the final flush, so output of two calls never
/// interleaves. The first time a thread prints with coloring enabled it is
/// given the next color of the palette, and it keeps that color for as long
/// as the printer lives.
///
/// Most programs use the process-wide printer on stdout through the free
/// functions of this crate and the [`tprint!`][crate::tprint] macro. An
/// explicit `Printer` is useful for writing somewhere else, such as stderr
/// or an in-memory buffer.
///
/// ```
/// use tprint::Printer;
/// use termcolor::Buffer;
///
/// let printer = Printer::new(Buffer::no_color());
/// assert!(!printer.is_color_enabled());
///
/// rayon::scope(|scope| {
///     for worker in 0..4 {
///         let printer = &printer;
///         scope.spawn(move |_| {
///             for step in 0..3 {
///                 printer.print([format!("worker {}", worker), format!("step {}", step)]);
///             }
///         });
///     }
/// });
///
/// let buffer = printer.into_inner();
/// let output = String::from_utf8_lossy(buffer.as_slice());
/// assert_eq!(output.lines().count(), 12);
/// assert!(output.lines().all(|line| line.starts_with("[ThreadId(")));
/// ```
///
/// <details>
/// <summary style="padding-left:3em"><a><em>▷&emsp;Click to show output</em></a></summary>
///
/// ```text
/// [ThreadId(3)] worker 1 step 0
/// [ThreadId(2)] worker 0 step 0
/// [ThreadId(3)] worker 1 step 1
/// [ThreadId(5)] worker 3 step 0
/// [ThreadId(4)] worker 2 step 0
/// [ThreadId(2)] worker 0 step 1
/// [ThreadId(5)] worker 3 step 1
/// [ThreadId(3)] worker 1 step 2
/// [ThreadId(4)] worker 2 step 1
/// [ThreadId(2)] worker 0 step 2
/// [ThreadId(4)] worker 2 step 2
/// [ThreadId(5)] worker 3 step 2
/// ```
/// </details>
///
/// <br>
///
/// # Deadlocks
///
/// The lock is not reentrant. An item whose `Display` impl prints through
/// the same printer will block forever.
pub struct Printer<W> {
    inner: Mutex<Inner<W>>,
}

#[cfg(test)]
struct _Test
where
    Printer<StandardStream>: Send + Sync;

struct Inner<W> {
    stream: W,
    color_enabled: bool,
    colors: ColorAllocator<ThreadId>,
}

/// Bracketed thread id, preceded by the thread's color when there is one.
#[derive(Copy, Clone)]
struct Tag {
    id: ThreadId,
    color: Option<&'static str>,
}

impl Printer<StandardStream> {
    /// Makes a printer whose output goes to stdout, with coloring enabled.
    pub fn stdout() -> Self {
        Self::stdout_with(ColorChoice::Always)
    }

    /// Makes a printer whose output goes to stderr, with coloring enabled.
    pub fn stderr() -> Self {
        Self::stderr_with(ColorChoice::Always)
    }

    /// Makes a printer whose output goes to stdout.
    ///
    /// Coloring starts out enabled if termcolor would use colors for this
    /// choice. In particular `ColorChoice::Auto` starts out uncolored when
    /// `NO_COLOR` is set or `TERM=dumb`.
    pub fn stdout_with(choice: ColorChoice) -> Self {
        Self::new(StandardStream::stdout(choice))
    }

    /// Makes a printer whose output goes to stderr.
    ///
    /// Coloring starts out enabled if termcolor would use colors for this
    /// choice.
    pub fn stderr_with(choice: ColorChoice) -> Self {
        Self::new(StandardStream::stderr(choice))
    }
}

impl<W: WriteColor> Printer<W> {
    /// Makes a printer over an arbitrary stream using the
    /// [ANSI palette][Palette::ANSI].
    ///
    /// Coloring starts out enabled only if the stream supports color. This
    /// differs from the process-wide printer, which always starts out
    /// colored. Call [`set_color_enabled`][Printer::set_color_enabled] to
    /// color a stream that does not report color support.
    ///
    /// ```
    /// use tprint::Printer;
    /// use termcolor::Buffer;
    ///
    /// assert!(Printer::new(Buffer::ansi()).is_color_enabled());
    ///
    /// let printer = Printer::new(Buffer::no_color());
    /// assert!(!printer.is_color_enabled());
    /// printer.set_color_enabled(true);
    /// printer.print(["forced"]);
    /// assert!(printer.into_inner().as_slice().starts_with(b"\x1b[31m["));
    /// ```
    pub fn new(stream: W) -> Self {
        Self::with_palette(stream, Palette::ANSI)
    }

    /// Makes a printer that assigns colors from a custom palette.
    ///
    /// ```
    /// use tprint::{Palette, Printer};
    /// use termcolor::Buffer;
    ///
    /// const BLUES: Palette = Palette::new(&["34", "94"]);
    ///
    /// let printer = Printer::with_palette(Buffer::ansi(), BLUES);
    /// printer.print(["in", "blue"]);
    ///
    /// let buffer = printer.into_inner();
    /// assert!(buffer.as_slice().starts_with(b"\x1b[34m["));
    /// ```
    pub fn with_palette(stream: W, palette: Palette) -> Self {
        let color_enabled = stream.supports_color();
        Printer {
            inner: Mutex::new(Inner {
                stream,
                color_enabled,
                colors: ColorAllocator::new(palette),
            }),
        }
    }

    /// Enables or disables coloring for every thread.
    ///
    /// Takes effect for the next call to begin printing. A call already
    /// holding the lock finishes with the formatting it started with.
    pub fn set_color_enabled(&self, enabled: bool) {
        self.inner.lock().color_enabled = enabled;
    }

    /// Whether output is currently being colored.
    pub fn is_color_enabled(&self) -> bool {
        self.inner.lock().color_enabled
    }

    /// Prints the items on one line after this thread's tag, separated by
    /// single spaces.
    ///
    /// ```
    /// use std::fmt::Display;
    /// use std::thread;
    /// use tprint::Printer;
    /// use termcolor::Buffer;
    ///
    /// let printer = Printer::new(Buffer::no_color());
    /// printer.print::<[&dyn Display; 3]>([&"a", &1, &"b"]);
    ///
    /// let expected = format!("[{:?}] a 1 b\x1b[0m\n", thread::current().id());
    /// assert_eq!(printer.into_inner().as_slice(), expected.as_bytes());
    /// ```
    pub fn print<I>(&self, items: I)
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let inner = &mut *self.inner.lock();
        let tag = inner.tag(thread::current().id());
        let _ = write_line(&mut inner.stream, tag, items);
    }

    /// Prints this thread's tag on a line of its own, followed by each item
    /// on its own line.
    ///
    /// Items are pulled from the iterator one at a time while the lock is
    /// held, and written as they are produced.
    ///
    /// ```
    /// use std::thread;
    /// use tprint::Printer;
    /// use termcolor::Buffer;
    ///
    /// let printer = Printer::new(Buffer::no_color());
    /// printer.print_range(1..=3);
    ///
    /// let expected = format!("[{:?}]\n1\n2\n3\n\x1b[0m\n", thread::current().id());
    /// assert_eq!(printer.into_inner().as_slice(), expected.as_bytes());
    /// ```
    pub fn print_range<I>(&self, items: I)
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let inner = &mut *self.inner.lock();
        let tag = inner.tag(thread::current().id());
        let _ = write_block(&mut inner.stream, tag, items);
    }
}

impl<W> Printer<W> {
    /// Consumes the printer, returning the underlying stream.
    pub fn into_inner(self) -> W {
        self.inner.into_inner().stream
    }
}

impl<W> Debug for Printer<W> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter
            .debug_struct("Printer")
            .field("color_enabled", &self.inner.lock().color_enabled)
            .finish()
    }
}

impl<W> Inner<W> {
    fn tag(&mut self, id: ThreadId) -> Tag {
        let color = if self.color_enabled {
            Some(self.colors.color_for(id))
        } else {
            None
        };
        Tag { id, color }
    }
}

impl Display for Tag {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        if let Some(code) = self.color {
            write!(formatter, "\x1b[{}m", code)?;
        }
        write!(formatter, "[{:?}]", self.id)
    }
}

fn write_line<W, I>(stream: &mut W, tag: Tag, items: I) -> Result<()>
where
    W: Write,
    I: IntoIterator,
    I::Item: Display,
{
    write!(stream, "{} ", tag)?;
    let mut items = items.into_iter();
    if let Some(first) = items.next() {
        write!(stream, "{}", first)?;
        for item in items {
            write!(stream, " {}", item)?;
        }
    }
    writeln!(stream, "{}", RESET)?;
    stream.flush()
}

fn write_block<W, I>(stream: &mut W, tag: Tag, items: I) -> Result<()>
where
    W: Write,
    I: IntoIterator,
    I::Item: Display,
{
    writeln!(stream, "{}", tag)?;
    for item in items {
        writeln!(stream, "{}", item)?;
    }
    writeln!(stream, "{}", RESET)?;
    stream.flush()
}
