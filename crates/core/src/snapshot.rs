use crate::types::{Grid, BLANK};

/// What the view layer needs to draw one tile for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileSnapshot {
    pub current: char,
    pub previous: char,
    pub flipping: bool,
    pub fast: bool,
    pub inverted: bool,
    /// Increments once per flip step; lets views restart flap animations.
    pub flip_seq: u64,
}

impl TileSnapshot {
    /// Glyph on the static lower half: the old glyph until the flap lands.
    pub fn lower(&self) -> char {
        if self.flipping {
            self.previous
        } else {
            self.current
        }
    }
}

impl Default for TileSnapshot {
    fn default() -> Self {
        Self {
            current: BLANK,
            previous: BLANK,
            flipping: false,
            fast: false,
            inverted: false,
            flip_seq: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardSnapshot {
    pub grid: Grid,
    pub live: bool,
    pub tiles: Vec<TileSnapshot>,
}

impl BoardSnapshot {
    pub fn clear(&mut self) {
        self.grid = Grid::default();
        self.live = false;
        self.tiles.clear();
    }

    pub fn tile(&self, row: usize, col: usize) -> Option<&TileSnapshot> {
        self.grid.index(row, col).and_then(|i| self.tiles.get(i))
    }

    /// True when no tile is mid-flip.
    pub fn settled(&self) -> bool {
        self.tiles.iter().all(|t| !t.flipping)
    }

    /// Current glyphs row by row.
    pub fn rows_text(&self) -> Vec<String> {
        let cols = (self.grid.cols as usize).max(1);
        self.tiles
            .chunks(cols)
            .map(|row| row.iter().map(|t| t.current).collect())
            .collect()
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self {
            grid: Grid::default(),
            live: false,
            tiles: Vec::new(),
        }
    }
}
