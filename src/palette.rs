use std::collections::HashMap;
use std::hash::Hash;

/// Fixed, ordered set of colors handed out to threads in round-robin order.
///
/// Each entry is the parameter of an SGR escape sequence, so `"31"` is
/// written to the terminal as `ESC [ 31 m`.
///
/// ```
/// use tprint::Palette;
///
/// const WARM: Palette = Palette::new(&["31", "33", "91", "93"]);
///
/// assert_eq!(WARM.codes.len(), 4);
/// assert_eq!(Palette::ANSI.codes[0], "31");
/// ```
///
/// A palette cannot be empty. In a `const` this is a compile error:
///
/// ```compile_fail
/// use tprint::Palette;
///
/// const NOTHING: Palette = Palette::new(&[]);
///
/// let _ = NOTHING.codes;
/// ```
#[readonly::make]
#[derive(Copy, Clone, Debug)]
pub struct Palette {
    /// Color codes in the order they are assigned.
    ///
    /// This field is read-only; writing to its value will not compile.
    #[readonly]
    pub codes: &'static [&'static str],
}

impl Palette {
    /// The 4-bit ANSI foreground colors, excluding black.
    pub const ANSI: Palette = Palette::new(&[
        "31", "32", "33", "34", "35", "36", "37", "90", "91", "92", "93", "94", "95", "96", "97",
    ]);

    /// Makes a palette from SGR color codes.
    ///
    /// # Panics
    ///
    /// Panics if `codes` is empty.
    pub const fn new(codes: &'static [&'static str]) -> Self {
        assert!(!codes.is_empty(), "palette must contain at least one color");
        Palette { codes }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::ANSI
    }
}

/// Remembers which color every identity was given, assigning new identities
/// the next palette entry.
///
/// Not synchronized. The printer only touches it while holding its lock.
pub(crate) struct ColorAllocator<K> {
    palette: Palette,
    /// Index of the color given to the next new identity.
    cursor: usize,
    assigned: HashMap<K, &'static str>,
}

impl<K: Eq + Hash> ColorAllocator<K> {
    pub(crate) fn new(palette: Palette) -> Self {
        ColorAllocator {
            palette,
            cursor: 0,
            assigned: HashMap::new(),
        }
    }

    pub(crate) fn color_for(&mut self, id: K) -> &'static str {
        let palette = &self.palette;
        let cursor = &mut self.cursor;
        *self.assigned.entry(id).or_insert_with(|| {
            let code = palette.codes[*cursor];
            *cursor = (*cursor + 1) % palette.codes.len();
            code
        })
    }
}
