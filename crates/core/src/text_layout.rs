//! Text layout - content pools to target characters
//!
//! Both strategies are pure functions of `(pool, grid, rng)` and return
//! exactly `grid.total()` characters, blank where nothing is placed. All
//! randomness comes from the injected [`SimpleRng`].

use crate::content::{DESTINATIONS, WORDS};
use crate::rng::SimpleRng;
use crate::types::{Grid, BLANK, SPARSE_ROW_FRACTION};

/// A pool entry assigned to a board row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentLine<'a> {
    pub text: &'a str,
    pub row: usize,
}

/// Which pool and packing the cascade reveal uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutStrategy {
    /// Word fill over [`WORDS`].
    #[default]
    Words,
    /// Sparse lines over [`DESTINATIONS`].
    Destinations,
}

impl LayoutStrategy {
    /// Parse strategy from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "words" => Some(LayoutStrategy::Words),
            "destinations" => Some(LayoutStrategy::Destinations),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutStrategy::Words => "words",
            LayoutStrategy::Destinations => "destinations",
        }
    }

    pub fn next(self) -> Self {
        match self {
            LayoutStrategy::Words => LayoutStrategy::Destinations,
            LayoutStrategy::Destinations => LayoutStrategy::Words,
        }
    }

    pub fn layout(self, grid: Grid, rng: &mut SimpleRng) -> Vec<char> {
        match self {
            LayoutStrategy::Words => word_fill(WORDS, grid, rng),
            LayoutStrategy::Destinations => sparse_lines(DESTINATIONS, grid, rng),
        }
    }
}

/// Shuffle the pool, then pack it with [`word_fill_ordered`].
pub fn word_fill(pool: &[&str], grid: Grid, rng: &mut SimpleRng) -> Vec<char> {
    let mut shuffled = pool.to_vec();
    rng.shuffle(&mut shuffled);
    word_fill_ordered(&shuffled, grid)
}

/// Pack accepted words, space separated, left-to-right and top-to-bottom
/// across the flat cell array.
///
/// # Examples
///
/// ```
/// use solari_core::text_layout::word_fill_ordered;
/// use solari_core::types::Grid;
///
/// let cells: String = word_fill_ordered(&["flap", "code"], Grid::new(5, 2)).into_iter().collect();
/// assert_eq!(cells, "FLAP CODE ");
/// ```
pub fn word_fill_ordered(pool: &[&str], grid: Grid) -> Vec<char> {
    let mut cells = vec![BLANK; grid.total()];
    let text = select_words(pool, grid).join(" ");
    for (cell, ch) in cells.iter_mut().zip(text.chars()) {
        *cell = ch.to_ascii_uppercase();
    }
    cells
}

/// Greedy word selection, in pool order.
///
/// A word is accepted when it fits a row on its own and the joined text
/// still fits the board; at most one word per row is taken.
pub fn select_words<'a>(pool: &[&'a str], grid: Grid) -> Vec<&'a str> {
    let cols = grid.cols as usize;
    let rows = grid.rows as usize;
    let total = grid.total();

    let mut accepted = Vec::new();
    let mut used = 0usize;
    for &word in pool {
        if accepted.len() >= rows {
            break;
        }
        let len = word.chars().count();
        if len == 0 || len > cols {
            continue;
        }
        let needed = if accepted.is_empty() { len } else { used + 1 + len };
        if needed > total {
            continue;
        }
        used = needed;
        accepted.push(word);
    }
    accepted
}

/// Place a few long-ish entries on distinct rows, left-aligned.
pub fn sparse_lines(pool: &[&str], grid: Grid, rng: &mut SimpleRng) -> Vec<char> {
    let mut cells = vec![BLANK; grid.total()];
    for line in plan_sparse_lines(pool, grid, rng) {
        let start = line.row * grid.cols as usize;
        for (offset, ch) in line.text.chars().enumerate() {
            cells[start + offset] = ch.to_ascii_uppercase();
        }
    }
    cells
}

/// Choose entries and rows for [`sparse_lines`].
///
/// Entries are scored `len + jitter * cols` so longer names win with random
/// tie-breaking; the chosen rows come out in ascending order.
pub fn plan_sparse_lines<'a>(
    pool: &[&'a str],
    grid: Grid,
    rng: &mut SimpleRng,
) -> Vec<ContentLine<'a>> {
    let cols = grid.cols as usize;
    let rows = grid.rows as usize;

    let mut scored: Vec<(f32, &'a str)> = pool
        .iter()
        .filter(|entry| {
            let len = entry.chars().count();
            len > 0 && len <= cols
        })
        .map(|&entry| {
            let score = entry.chars().count() as f32 + rng.next_f32() * cols as f32;
            (score, entry)
        })
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    let wanted = (rows as f32 * SPARSE_ROW_FRACTION).ceil() as usize;
    let k = wanted.min(scored.len()).min(rows);

    let mut row_order: Vec<usize> = (0..rows).collect();
    rng.shuffle(&mut row_order);
    let mut chosen = row_order[..k].to_vec();
    chosen.sort_unstable();

    scored
        .into_iter()
        .zip(chosen)
        .map(|((_, text), row)| ContentLine { text, row })
        .collect()
}
