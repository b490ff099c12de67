// src/editor/brush.rs

//! Greedy grouping of occupied squares into square brush strokes.
//!
//! One click with a brush of side `s` paints an `s × s` block around the
//! clicked square. The grouper tries sides 15, 7 and 3 in that order and takes
//! every fully occupied block it finds; whatever is left is painted one square
//! at a time. This is a largest-first heuristic, not an exact cover.

use crate::editor::commands::BrushSize;

/// A square stroke that will be painted with one click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushBlock {
    pub size: BrushSize,
    /// Lowest (x, y) corner of the block.
    pub anchor_x: i64,
    pub anchor_y: i64,
    /// Index of the input square at the block's centre; the click target.
    pub cell: usize,
}

impl BrushBlock {
    /// Every square the block paints.
    pub fn squares(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        let side = self.size.side();
        (0..side).flat_map(move |dx| (0..side).map(move |dy| (self.anchor_x + dx, self.anchor_y + dy)))
    }
}

/// The representatives painted with one brush size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrushGroup {
    pub size: BrushSize,
    /// Indices into the grouped squares, in input order.
    pub cells: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrushPlan {
    pub blocks: Vec<BrushBlock>,
}

impl BrushPlan {
    /// Non-empty groups in painting order (1, 3, 7, 15).
    pub fn groups(&self) -> Vec<BrushGroup> {
        BrushSize::PAINT_ORDER
            .iter()
            .filter_map(|&size| {
                let mut cells: Vec<usize> = self
                    .blocks
                    .iter()
                    .filter(|block| block.size == size)
                    .map(|block| block.cell)
                    .collect();
                if cells.is_empty() {
                    return None;
                }
                cells.sort_unstable();
                Some(BrushGroup { size, cells })
            })
            .collect()
    }
}

/// Dense occupancy over the bounding box of a set of squares.
struct OccupancyGrid {
    min_x: i64,
    min_y: i64,
    width: i64,
    height: i64,
    slots: Vec<Option<usize>>,
}

impl OccupancyGrid {
    fn from_squares(squares: &[(i64, i64)]) -> Self {
        let (min_x, min_y, max_x, max_y) = squares.iter().fold(
            (i64::MAX, i64::MAX, i64::MIN, i64::MIN),
            |(ax, ay, bx, by), &(x, y)| (ax.min(x), ay.min(y), bx.max(x), by.max(y)),
        );
        let width = max_x - min_x + 1;
        let height = max_y - min_y + 1;
        let mut grid = Self {
            min_x,
            min_y,
            width,
            height,
            slots: vec![None; (width * height) as usize],
        };
        for (idx, &(x, y)) in squares.iter().enumerate() {
            let slot = grid.slot(x - min_x, y - min_y);
            grid.slots[slot] = Some(idx);
        }
        grid
    }

    fn slot(&self, x: i64, y: i64) -> usize {
        (x * self.height + y) as usize
    }

    fn get(&self, x: i64, y: i64) -> Option<usize> {
        self.slots[self.slot(x, y)]
    }

    fn block_is_full(&self, x0: i64, y0: i64, side: i64) -> bool {
        (x0..x0 + side).all(|x| (y0..y0 + side).all(|y| self.get(x, y).is_some()))
    }

    fn clear_block(&mut self, x0: i64, y0: i64, side: i64) {
        for x in x0..x0 + side {
            for y in y0..y0 + side {
                let slot = self.slot(x, y);
                self.slots[slot] = None;
            }
        }
    }
}

/// Partitions `squares` into brush blocks. Squares must be distinct; block
/// `cell` fields index into `squares`.
pub fn group_brushes(squares: &[(i64, i64)]) -> BrushPlan {
    if squares.is_empty() {
        return BrushPlan::default();
    }
    let mut grid = OccupancyGrid::from_squares(squares);
    let mut blocks = Vec::new();

    for size in BrushSize::DESCENDING_BLOCKS {
        let side = size.side();
        if grid.width < side || grid.height < side {
            continue;
        }
        for x0 in 0..=(grid.width - side) {
            for y0 in 0..=(grid.height - side) {
                if !grid.block_is_full(x0, y0, side) {
                    continue;
                }
                if let Some(center) = grid.get(x0 + side / 2, y0 + side / 2) {
                    blocks.push(BrushBlock {
                        size,
                        anchor_x: x0 + grid.min_x,
                        anchor_y: y0 + grid.min_y,
                        cell: center,
                    });
                }
                grid.clear_block(x0, y0, side);
            }
        }
    }

    for x in 0..grid.width {
        for y in 0..grid.height {
            if let Some(cell) = grid.get(x, y) {
                blocks.push(BrushBlock {
                    size: BrushSize::One,
                    anchor_x: x + grid.min_x,
                    anchor_y: y + grid.min_y,
                    cell,
                });
            }
        }
    }

    BrushPlan { blocks }
}
