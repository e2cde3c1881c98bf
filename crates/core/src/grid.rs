//! Grid planner - viewport size to tile grid
//!
//! Tile width follows the viewport (`width / 7`) inside a fixed range and the
//! tile height follows from the portrait aspect ratio. Whatever the viewport,
//! the board is at least 2x2 and at most `MAX_GRID_DIM` tiles on each side.

use crate::types::{
    Grid, Rect, MAX_GRID_DIM, MAX_TILE_WIDTH, MIN_GRID_DIM, MIN_TILE_WIDTH, TILE_ASPECT,
    TILE_WIDTH_DIVISOR,
};
use crate::config::ConfigError;

/// Planner constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPlanner {
    pub min_tile_width: f32,
    pub max_tile_width: f32,
    pub width_divisor: f32,
    /// Tile width divided by tile height.
    pub aspect: f32,
}

impl Default for GridPlanner {
    fn default() -> Self {
        Self {
            min_tile_width: MIN_TILE_WIDTH,
            max_tile_width: MAX_TILE_WIDTH,
            width_divisor: TILE_WIDTH_DIVISOR,
            aspect: TILE_ASPECT,
        }
    }
}

/// Result of planning a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPlan {
    pub grid: Grid,
    pub tile_width: f32,
    pub tile_height: f32,
    pub width: f32,
    pub height: f32,
}

impl GridPlanner {
    /// Width bounds must be positive and ordered, divisor and aspect positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        let ok = positive(self.min_tile_width)
            && positive(self.max_tile_width)
            && self.min_tile_width <= self.max_tile_width
            && positive(self.width_divisor)
            && positive(self.aspect);
        if ok {
            Ok(())
        } else {
            Err(ConfigError::InvalidPlanner {
                min_tile_width: self.min_tile_width,
                max_tile_width: self.max_tile_width,
                width_divisor: self.width_divisor,
                aspect: self.aspect,
            })
        }
    }

    /// Never panics, even for a planner that fails [`GridPlanner::validate`].
    pub fn plan(&self, width: f32, height: f32) -> GridPlan {
        let width = sanitize(width);
        let height = sanitize(height);

        let tile_width = (width / self.width_divisor)
            .max(self.min_tile_width)
            .min(self.max_tile_width);
        let tile_height = tile_width / self.aspect;

        let cols = grid_dim(width / tile_width);
        let rows = grid_dim(height / tile_height);

        GridPlan {
            grid: Grid::new(cols, rows),
            tile_width,
            tile_height,
            width,
            height,
        }
    }
}

impl GridPlan {
    /// Height of one on-screen cell (the viewport split evenly across rows).
    pub fn cell_height(&self) -> f32 {
        self.height / self.grid.rows.max(1) as f32
    }

    pub fn cell_width(&self) -> f32 {
        self.width / self.grid.cols.max(1) as f32
    }

    /// Per-tile rectangles in row-major order.
    pub fn tile_rects(&self) -> Vec<Rect> {
        let w = self.cell_width();
        let h = self.cell_height();
        let mut rects = Vec::with_capacity(self.grid.total());
        for row in 0..self.grid.rows {
            for col in 0..self.grid.cols {
                rects.push(Rect::new(col as f32 * w, row as f32 * h, w, h));
            }
        }
        rects
    }

    /// Index of the tile under a viewport point.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        if !(x >= 0.0 && y >= 0.0 && x < self.width && y < self.height) {
            return None;
        }
        let col = ((x / self.cell_width()) as usize).min(self.grid.cols as usize - 1);
        let row = ((y / self.cell_height()) as usize).min(self.grid.rows as usize - 1);
        self.grid.index(row, col)
    }
}

/// Float-to-int casts saturate and map NaN to 0, so this stays in range.
fn grid_dim(fit: f32) -> u16 {
    (fit.floor() as u16).clamp(MIN_GRID_DIM, MAX_GRID_DIM)
}

fn sanitize(v: f32) -> f32 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_viewport() {
        let plan = GridPlanner::default().plan(1400.0, 900.0);
        // 1400 / 7 = 200 -> clamped to 120; height 120 / 0.55 ≈ 218.2
        assert_eq!(plan.tile_width, 120.0);
        assert_eq!(plan.grid, Grid::new(11, 4));
    }

    #[test]
    fn narrow_viewport_uses_minimum_tile_width() {
        let plan = GridPlanner::default().plan(280.0, 600.0);
        assert_eq!(plan.tile_width, 50.0);
        // 600 / (50 / 0.55) = 6.6
        assert_eq!(plan.grid, Grid::new(5, 6));
    }

    #[test]
    fn mid_width_tracks_divisor() {
        let plan = GridPlanner::default().plan(700.0, 700.0);
        assert_eq!(plan.tile_width, 100.0);
        assert_eq!(plan.grid.cols, 7);
    }

    #[test]
    fn degenerate_viewports_clamp_to_two_by_two() {
        let planner = GridPlanner::default();
        for (w, h) in [(0.0, 0.0), (-50.0, 10.0), (f32::NAN, f32::INFINITY), (1.0, 1.0)] {
            let plan = planner.plan(w, h);
            assert_eq!(plan.grid, Grid::new(2, 2), "viewport {}x{}", w, h);
        }
    }

    #[test]
    fn huge_viewports_are_capped() {
        let plan = GridPlanner::default().plan(1.0e9, 1.0e9);
        assert_eq!(plan.grid, Grid::new(MAX_GRID_DIM, MAX_GRID_DIM));
        assert_eq!(plan.grid.total(), 65_536);
    }

    #[test]
    fn inverted_width_bounds_plan_without_panicking() {
        let planner = GridPlanner {
            min_tile_width: 200.0,
            max_tile_width: 100.0,
            ..GridPlanner::default()
        };
        assert!(planner.validate().is_err());
        let plan = planner.plan(800.0, 600.0);
        assert_eq!(plan.tile_width, 100.0);
        assert!(plan.grid.cols >= MIN_GRID_DIM);
    }

    #[test]
    fn planner_validation() {
        assert_eq!(GridPlanner::default().validate(), Ok(()));
        for planner in [
            GridPlanner { aspect: 0.0, ..GridPlanner::default() },
            GridPlanner { width_divisor: -7.0, ..GridPlanner::default() },
            GridPlanner { min_tile_width: f32::NAN, ..GridPlanner::default() },
        ] {
            assert!(matches!(
                planner.validate(),
                Err(ConfigError::InvalidPlanner { .. })
            ));
        }
    }

    #[test]
    fn rects_tile_the_viewport() {
        let plan = GridPlanner::default().plan(700.0, 400.0);
        let rects = plan.tile_rects();
        assert_eq!(rects.len(), plan.grid.total());
        let last = rects[rects.len() - 1];
        assert!((last.x + last.w - 700.0).abs() < 1e-3);
        assert!((last.y + last.h - 400.0).abs() < 1e-3);
    }

    #[test]
    fn hit_test_maps_points_to_indices() {
        let plan = GridPlanner::default().plan(700.0, 400.0);
        assert_eq!(plan.hit_test(0.0, 0.0), Some(0));
        assert_eq!(plan.hit_test(699.0, 399.0), Some(plan.grid.total() - 1));
        assert_eq!(plan.hit_test(-1.0, 5.0), None);
        assert_eq!(plan.hit_test(700.0, 5.0), None);
    }
}
