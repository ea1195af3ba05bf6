use std::cmp;

// The arena starts with PAGE-sized chunks, and then each new chunk is twice as
// big as its predecessor, up until we reach HUGE_PAGE-sized chunks, whereupon
// we stop growing.
const PAGE: usize = 4096;
const HUGE_PAGE: usize = 2 * 1024 * 1024;

/// A bump arena for string data. Strings handed out by the arena stay at the
/// same address until the arena itself is dropped.
#[derive(Default)]
pub struct StrArena {
    /// Every chunk is allocated once with a fixed capacity and never grows,
    /// so its heap buffer is never moved.
    chunks: Vec<Vec<u8>>,
}

impl StrArena {
    #[inline(never)]
    #[cold]
    fn grow(&mut self, additional: usize) {
        let mut new_cap = match self.chunks.last() {
            Some(last) => last.capacity().min(HUGE_PAGE / 2) * 2,
            None => PAGE,
        };
        // Also ensure that this chunk can fit `additional`.
        new_cap = cmp::max(additional, new_cap);
        self.chunks.push(Vec::with_capacity(new_cap));
    }

    fn has_room(&self, additional: usize) -> bool {
        match self.chunks.last() {
            Some(last) => last.capacity() - last.len() >= additional,
            None => false,
        }
    }

    /// Copies `string` into the arena.
    pub fn alloc_str(&mut self, string: &str) -> &str {
        if string.is_empty() {
            return "";
        }
        if !self.has_room(string.len()) {
            self.grow(string.len());
        }

        let chunk = match self.chunks.last_mut() {
            Some(c) => c,
            None => unreachable!("arena grew without adding a chunk"),
        };
        let start = chunk.len();
        // Capacity was checked above, so this never reallocates.
        chunk.extend_from_slice(string.as_bytes());

        // SAFETY: the bytes were copied from a `&str`, so they are valid UTF-8.
        unsafe { std::str::from_utf8_unchecked(&chunk[start..]) }
    }

    pub fn allocated_bytes(&self) -> usize {
        self.chunks.iter().map(|c| c.len()).sum()
    }
}
