//! Uniform hash grid for broad-phase collision
//!
//! Cells are keyed by floor-divided integer coordinates, so the grid is
//! unbounded and handles negative positions without an origin offset. Each
//! entry is an entity reference: the entity's index in the store slice the grid
//! was built from. The grid is cleared and rebuilt every tick.

use rustc_hash::FxHashMap;

use super::collision::Aabb;

/// Inclusive range of cells covered by a box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub min: (i32, i32),
    pub max: (i32, i32),
}

impl CellRange {
    /// Iterate every `(cx, cy)` in the range
    pub fn cells(self) -> impl Iterator<Item = (i32, i32)> {
        let (min_x, min_y) = self.min;
        let (max_x, max_y) = self.max;
        (min_x..=max_x).flat_map(move |cx| (min_y..=max_y).map(move |cy| (cx, cy)))
    }

    /// Number of cells covered, saturating at `usize::MAX`
    pub fn len(&self) -> usize {
        let w = (i64::from(self.max.0) - i64::from(self.min.0) + 1).max(0) as u64;
        let h = (i64::from(self.max.1) - i64::from(self.min.1) + 1).max(0) as u64;
        usize::try_from(w.saturating_mul(h)).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Spatial hash grid over entity references
#[derive(Debug, Clone)]
pub struct SpatialHashGrid {
    cell_size: f32,
    cells: FxHashMap<(i32, i32), Vec<usize>>,
}

impl SpatialHashGrid {
    /// `cell_size` must be positive; settings validation guarantees it.
    pub fn new(cell_size: f32) -> Self {
        debug_assert!(cell_size > 0.0, "cell size must be positive");
        Self {
            cell_size,
            cells: FxHashMap::default(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Drop every bucket
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Cell coordinate of a single edge (floor, not truncation)
    #[inline]
    pub fn cell_coord(&self, v: f32) -> i32 {
        (v / self.cell_size).floor() as i32
    }

    /// Cells overlapped by a box, both edges included
    pub fn cell_range(&self, aabb: &Aabb) -> CellRange {
        CellRange {
            min: (self.cell_coord(aabb.min.x), self.cell_coord(aabb.min.y)),
            max: (self.cell_coord(aabb.max.x), self.cell_coord(aabb.max.y)),
        }
    }

    /// Add `entity` to every cell its box covers
    ///
    /// Work is proportional to `cell_range(aabb).len()`, so `cell_size` should
    /// be on the order of the entity footprint. Boxes spanning a huge number
    /// of cells are not bounded here.
    pub fn insert(&mut self, entity: usize, aabb: &Aabb) {
        for key in self.cell_range(aabb).cells() {
            self.cells.entry(key).or_default().push(entity);
        }
    }

    /// Write every other entity sharing a cell with `aabb` into `buf`
    ///
    /// The result is deduplicated and never contains `entity` itself. `buf` is
    /// cleared first, so callers can reuse one buffer across queries. Cost
    /// scales with the covered cell span, as for `insert`.
    pub fn query_candidates_into(&self, entity: usize, aabb: &Aabb, buf: &mut Vec<usize>) {
        buf.clear();
        for key in self.cell_range(aabb).cells() {
            if let Some(occupants) = self.cells.get(&key) {
                buf.extend(occupants.iter().copied().filter(|&other| other != entity));
            }
        }
        buf.sort_unstable();
        buf.dedup();
    }

    pub fn query_candidates(&self, entity: usize, aabb: &Aabb) -> Vec<usize> {
        let mut buf = Vec::new();
        self.query_candidates_into(entity, aabb, &mut buf);
        buf
    }

    /// Number of non-empty cells
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Total entries across all cells (an entity spanning k cells counts k times)
    pub fn total_entries(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    /// Occupants of one cell
    pub fn cell(&self, key: (i32, i32)) -> &[usize] {
        self.cells.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Dimensions;
    use glam::Vec2;
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb::from_rect(Vec2::new(x, y), Dimensions::new(w, h))
    }

    #[test]
    fn test_negative_coordinates_floor() {
        let grid = SpatialHashGrid::new(20.0);
        let range = grid.cell_range(&rect(-25.0, -25.0, 10.0, 10.0));
        assert_eq!(range.min, (-2, -2));
        assert_eq!(range.max, (-1, -1));
    }

    #[test]
    fn test_boundary_aligned_edge_uses_floor() {
        let grid = SpatialHashGrid::new(20.0);
        // Max edge at exactly 20.0 lands in cell 1
        let range = grid.cell_range(&rect(0.0, 0.0, 20.0, 20.0));
        assert_eq!(range.min, (0, 0));
        assert_eq!(range.max, (1, 1));
        assert_eq!(range.len(), 4);

        // Min edge at exactly -20.0 lands in cell -1
        let range = grid.cell_range(&rect(-20.0, -40.0, 5.0, 5.0));
        assert_eq!(range.min, (-1, -2));
    }

    #[test]
    fn test_cell_range_len_with_saturated_coords() {
        let grid = SpatialHashGrid::new(20.0);
        let range = grid.cell_range(&rect(-1e30, 0.0, 1e30, 10.0));
        assert_eq!(range.min, (i32::MIN, 0));
        assert_eq!(range.max, (0, 0));
        assert_eq!(range.len() as u64, i32::MAX as u64 + 2);
        assert!(!range.is_empty());
    }

    #[test]
    fn test_insert_spans_all_covered_cells() {
        let mut grid = SpatialHashGrid::new(20.0);
        grid.insert(0, &rect(5.0, 5.0, 30.0, 10.0));
        // x: 5..35 -> cells 0..1, y: 5..15 -> cell 0
        assert_eq!(grid.occupied_cells(), 2);
        assert_eq!(grid.cell((0, 0)), &[0usize]);
        assert_eq!(grid.cell((1, 0)), &[0usize]);
        assert!(grid.cell((2, 0)).is_empty());
    }

    #[test]
    fn test_query_excludes_self_and_dedups() {
        let mut grid = SpatialHashGrid::new(20.0);
        let a = rect(0.0, 0.0, 30.0, 30.0);
        let b = rect(5.0, 5.0, 30.0, 30.0);
        grid.insert(0, &a);
        grid.insert(1, &b);

        // a and b share four cells, but b is reported once
        assert_eq!(grid.query_candidates(0, &a), vec![1]);
        assert_eq!(grid.query_candidates(1, &b), vec![0]);
    }

    #[test]
    fn test_query_ignores_distant_entities() {
        let mut grid = SpatialHashGrid::new(20.0);
        let a = rect(0.0, 0.0, 10.0, 10.0);
        grid.insert(0, &a);
        grid.insert(1, &rect(200.0, 200.0, 10.0, 10.0));
        grid.insert(2, &rect(-200.0, 0.0, 10.0, 10.0));
        assert!(grid.query_candidates(0, &a).is_empty());
    }

    #[test]
    fn test_clear_empties_grid() {
        let mut grid = SpatialHashGrid::new(20.0);
        grid.insert(0, &rect(0.0, 0.0, 50.0, 50.0));
        assert!(grid.total_entries() > 0);
        grid.clear();
        assert_eq!(grid.occupied_cells(), 0);
        assert_eq!(grid.total_entries(), 0);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let boxes = [
            rect(0.0, 0.0, 20.0, 20.0),
            rect(10.0, 10.0, 20.0, 20.0),
            rect(-25.0, -25.0, 10.0, 10.0),
            rect(-30.0, -18.0, 40.0, 5.0),
            rect(300.0, 40.0, 20.0, 20.0),
        ];
        let mut grid = SpatialHashGrid::new(20.0);
        let mut rounds = Vec::new();
        for _ in 0..3 {
            grid.clear();
            for (i, b) in boxes.iter().enumerate() {
                grid.insert(i, b);
            }
            let results: Vec<Vec<usize>> = boxes
                .iter()
                .enumerate()
                .map(|(i, b)| grid.query_candidates(i, b))
                .collect();
            rounds.push((results, grid.total_entries()));
        }
        assert_eq!(rounds[0], rounds[1]);
        assert_eq!(rounds[1], rounds[2]);
    }

    proptest! {
        #[test]
        fn prop_query_never_returns_self(
            boxes in prop::collection::vec(
                (-200.0f32..200.0, -200.0f32..200.0, 1.0f32..60.0, 1.0f32..60.0),
                1..24,
            )
        ) {
            let boxes: Vec<Aabb> = boxes.into_iter().map(|(x, y, w, h)| rect(x, y, w, h)).collect();
            let mut grid = SpatialHashGrid::new(20.0);
            for (i, b) in boxes.iter().enumerate() {
                grid.insert(i, b);
            }
            for (i, b) in boxes.iter().enumerate() {
                let candidates = grid.query_candidates(i, b);
                prop_assert!(!candidates.contains(&i));
                let mut deduped = candidates.clone();
                deduped.dedup();
                prop_assert_eq!(deduped.len(), candidates.len());
            }
        }

        #[test]
        fn prop_overlapping_boxes_are_candidates(
            a in (-200.0f32..200.0, -200.0f32..200.0, 1.0f32..60.0, 1.0f32..60.0),
            b in (-200.0f32..200.0, -200.0f32..200.0, 1.0f32..60.0, 1.0f32..60.0),
        ) {
            let a = rect(a.0, a.1, a.2, a.3);
            let b = rect(b.0, b.1, b.2, b.3);
            let mut grid = SpatialHashGrid::new(20.0);
            grid.insert(0, &a);
            grid.insert(1, &b);
            if crate::sim::collision::overlaps(&a, &b) {
                prop_assert_eq!(grid.query_candidates(0, &a), vec![1]);
            }
        }
    }
}
