// src/editor/pages.rs

//! Splits the logical grid into viewport-sized pages.
//!
//! The editor can only show `page_squares_x × page_squares_y` squares at a
//! time, and adjacent pages overlap by their margins. Pages along x are laid
//! out from the right edge of the map towards the left, with the odd-sized
//! remainder page at x = 0; pages along y go bottom-up with the remainder page
//! on top. Remainders are rounded down to an even number of squares because
//! the editor only resizes in steps of two.

use crate::editor::commands::{Action, ClickTarget, ResizeControl};
use crate::profile::{ResizeControls, ViewportLayout};
use crate::utils::GridRect;
use serde::Serialize;

/// Number of squares the editor viewport shows along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewportSize {
    pub x: i64,
    pub y: i64,
}

impl ViewportSize {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Which resize buttons a transition may use. Growing or shrinking from the
/// editor's default map size only works from one edge (`Init`), returning to
/// it only from the other (`Finish`); `Window` shifts by using both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeMode {
    Init,
    Window,
    Finish,
}

impl ResizeMode {
    fn uses_far_edge(&self) -> bool {
        matches!(self, ResizeMode::Window | ResizeMode::Finish)
    }

    fn uses_near_edge(&self) -> bool {
        matches!(self, ResizeMode::Window | ResizeMode::Init)
    }
}

/// One viewport transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResizeStep {
    pub from: ViewportSize,
    pub to: ViewportSize,
    pub mode: ResizeMode,
}

impl ResizeStep {
    pub fn new(from: ViewportSize, to: ViewportSize, mode: ResizeMode) -> Self {
        Self { from, to, mode }
    }

    /// The resize buttons to press, in order.
    pub fn controls(&self) -> Vec<ResizeControl> {
        let mut controls = Vec::new();
        axis_controls(
            &mut controls,
            self.from.x,
            self.to.x,
            self.mode,
            [
                ResizeControl::HorizontalPlus,
                ResizeControl::HorizontalMinus,
                ResizeControl::HorizontalPlus2,
                ResizeControl::HorizontalMinus2,
            ],
        );
        axis_controls(
            &mut controls,
            self.from.y,
            self.to.y,
            self.mode,
            [
                ResizeControl::VerticalPlus,
                ResizeControl::VerticalMinus,
                ResizeControl::VerticalPlus2,
                ResizeControl::VerticalMinus2,
            ],
        );
        controls
    }

    pub fn actions(&self, buttons: &ResizeControls) -> Vec<Action> {
        self.controls()
            .into_iter()
            .map(|control| Action::click(control.position(buttons), ClickTarget::Resize { control }))
            .collect()
    }
}

/// `[plus, minus, plus2, minus2]` for one axis.
fn axis_controls(out: &mut Vec<ResizeControl>, from: i64, to: i64, mode: ResizeMode, buttons: [ResizeControl; 4]) {
    let [plus, minus, plus2, minus2] = buttons;
    let n_clicks = ((from - to) / 2).abs();
    for _ in 0..n_clicks {
        if to <= from {
            if mode.uses_far_edge() {
                out.push(plus2);
            }
            if mode.uses_near_edge() {
                out.push(minus);
            }
        } else {
            if mode.uses_near_edge() {
                out.push(plus);
            }
            if mode.uses_far_edge() {
                out.push(minus2);
            }
        }
    }
}

/// A viewport-sized window of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub col: i64,
    pub row: i64,
    /// Grid squares painted while this page is shown.
    pub window: GridRect,
    /// Subtracted from grid coordinates to get viewport-local coordinates.
    pub origin_x: i64,
    pub origin_y: i64,
    pub viewport: ViewportSize,
}

impl Page {
    pub fn contains(&self, x: i64, y: i64) -> bool {
        self.window.contains(x, y)
    }

    pub fn to_local(&self, x: i64, y: i64) -> (i64, i64) {
        (x - self.origin_x, y - self.origin_y)
    }
}

/// A page together with the resizes that must precede it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledPage<'a> {
    pub page: &'a Page,
    pub resizes: Vec<ResizeStep>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePlan {
    layout: ViewportLayout,
    pub pages_x: i64,
    pub pages_y: i64,
    pub remainder_x: i64,
    pub remainder_y: i64,
    /// Extent actually covered by the pages: `pages * usable + remainder`.
    pub covered_x: i64,
    pub covered_y: i64,
    pages: Vec<Page>,
}

impl PagePlan {
    /// Plans pages for a grid of `total_x × total_y` squares. `layout` must
    /// have passed [`ViewportLayout::validate`].
    pub fn new(layout: &ViewportLayout, total_x: i64, total_y: i64) -> Self {
        let usable_x = layout.usable_x();
        let usable_y = layout.usable_y();
        let total_x = total_x.max(0);
        let total_y = total_y.max(0);

        let pages_x = total_x / usable_x;
        let pages_y = total_y / usable_y;
        let remainder_x = round_down_to_even(total_x % usable_x);
        let remainder_y = round_down_to_even(total_y % usable_y);
        let covered_x = pages_x * usable_x + remainder_x;
        let covered_y = pages_y * usable_y + remainder_y;

        let mut pages = Vec::new();
        for row in 0..=pages_y {
            for col in 0..=pages_x {
                let (x_range, origin_x, view_x) = if col < pages_x {
                    let xmax = covered_x - col * usable_x;
                    (
                        (xmax - usable_x)..xmax,
                        covered_x - (col + 1) * usable_x,
                        (col + 1) * layout.page_squares_x - col * layout.right_margin,
                    )
                } else {
                    (
                        0..remainder_x,
                        0,
                        col * layout.page_squares_x - (col - 1) * layout.right_margin + remainder_x,
                    )
                };
                let vertical_margins = layout.top_margin + layout.bottom_margin;
                let (y_range, origin_y, view_y) = if row < pages_y {
                    let ymax = (row + 1) * usable_y;
                    (
                        (ymax - usable_y)..ymax,
                        row * (layout.page_squares_y - layout.top_margin) - (row + 1) * layout.bottom_margin,
                        (row + 1) * layout.page_squares_y - row * vertical_margins,
                    )
                } else {
                    (
                        (covered_y - remainder_y)..covered_y,
                        covered_y - (layout.page_squares_y - layout.top_margin),
                        row * layout.page_squares_y - (row - 1) * vertical_margins + remainder_y,
                    )
                };

                let window = GridRect::new(x_range, y_range);
                if window.is_empty() {
                    continue;
                }
                pages.push(Page {
                    col,
                    row,
                    window,
                    origin_x,
                    origin_y,
                    viewport: ViewportSize::new(view_x, view_y),
                });
            }
        }

        Self {
            layout: *layout,
            pages_x,
            pages_y,
            remainder_x,
            remainder_y,
            covered_x,
            covered_y,
            pages,
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Whether a grid square falls inside the planned extent.
    pub fn covers(&self, x: i64, y: i64) -> bool {
        (0..self.covered_x).contains(&x) && (0..self.covered_y).contains(&y)
    }

    /// `(col, row)` of the page whose window holds a grid square, or `None`
    /// outside the covered extent.
    pub fn page_of(&self, x: i64, y: i64) -> Option<(i64, i64)> {
        if !self.covers(x, y) {
            return None;
        }
        let col = if x < self.remainder_x {
            self.pages_x
        } else {
            (self.covered_x - 1 - x) / self.layout.usable_x()
        };
        let row = y / self.layout.usable_y();
        Some((col, row))
    }

    pub fn default_start(&self) -> ViewportSize {
        ViewportSize::new(self.layout.start_squares_x, self.layout.start_squares_y)
    }

    /// Pairs each page with the resizes that lead to it from `start`.
    /// When the start size was read from the input file, the first page gets
    /// one extra shrink by two squares on both axes.
    pub fn schedule(&self, start: ViewportSize, seeded_from_file: bool) -> Vec<ScheduledPage<'_>> {
        let default_start = self.default_start();
        let mut seeded = seeded_from_file;
        let mut prev = start;
        let mut scheduled = Vec::with_capacity(self.pages.len());

        for page in &self.pages {
            let mode = if prev == default_start || seeded {
                ResizeMode::Init
            } else {
                ResizeMode::Window
            };
            let mut resizes = vec![ResizeStep::new(prev, page.viewport, mode)];
            if seeded {
                let shrunk = ViewportSize::new(page.viewport.x - 2, page.viewport.y - 2);
                resizes.push(ResizeStep::new(page.viewport, shrunk, ResizeMode::Window));
                seeded = false;
            }
            prev = page.viewport;
            scheduled.push(ScheduledPage { page, resizes });
        }
        scheduled
    }

    /// Returns the viewport to its full page size, then drops the top margin.
    pub fn finish_steps(&self) -> [ResizeStep; 2] {
        let covered = ViewportSize::new(self.covered_x, self.covered_y);
        [
            ResizeStep::new(
                covered,
                ViewportSize::new(self.layout.page_squares_x, self.layout.page_squares_y),
                ResizeMode::Finish,
            ),
            ResizeStep::new(
                covered,
                ViewportSize::new(self.covered_x, self.covered_y - self.layout.top_margin),
                ResizeMode::Window,
            ),
        ]
    }
}

fn round_down_to_even(value: i64) -> i64 {
    value / 2 * 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(page_x: i64, page_y: i64, right: i64, top: i64, bottom: i64) -> ViewportLayout {
        ViewportLayout {
            page_squares_x: page_x,
            page_squares_y: page_y,
            right_margin: right,
            top_margin: top,
            bottom_margin: bottom,
            start_squares_x: 40,
            start_squares_y: 40,
        }
    }

    #[test]
    fn test_full_page_plus_remainder_along_x() {
        let plan = PagePlan::new(&layout(304, 72, 4, 2, 4), 330, 10);
        assert_eq!(plan.pages_x, 1);
        assert_eq!(plan.remainder_x, 30);
        assert_eq!(plan.pages_y, 0);
        assert_eq!(plan.remainder_y, 10);

        let pages = plan.pages();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].window, GridRect::new(30..330, 0..10));
        assert_eq!(pages[0].origin_x, 30);
        assert_eq!(pages[0].viewport.x, 304);
        assert_eq!(pages[1].window, GridRect::new(0..30, 0..10));
        assert_eq!(pages[1].origin_x, 0);
        assert_eq!(pages[1].viewport.x, 304 + 30);
    }

    #[test]
    fn test_odd_remainder_rounds_down() {
        let plan = PagePlan::new(&layout(104, 72, 4, 2, 4), 131, 67);
        assert_eq!(plan.remainder_x, 30);
        assert_eq!(plan.covered_x, 130);
        assert_eq!(plan.remainder_y, 0);
        assert_eq!(plan.covered_y, 66);
        assert!(!plan.covers(130, 0));
        assert!(plan.covers(129, 65));
        // The remainder row along y is empty and therefore skipped.
        assert!(plan.pages().iter().all(|page| page.row == 0));
    }

    #[test]
    fn test_zero_extent_yields_no_pages() {
        let plan = PagePlan::new(&layout(104, 72, 4, 2, 4), 0, 0);
        assert!(plan.pages().is_empty());
        let plan = PagePlan::new(&layout(104, 72, 4, 2, 4), 250, 1);
        assert!(plan.pages().is_empty());
    }

    #[test]
    fn test_vertical_origins_leave_bottom_margin() {
        let plan = PagePlan::new(&layout(104, 72, 4, 2, 4), 20, 140);
        // usable_y = 66: two full rows and an 8 square remainder.
        assert_eq!(plan.pages_y, 2);
        assert_eq!(plan.remainder_y, 8);
        let rows: Vec<&Page> = plan.pages().iter().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].window.y, 0..66);
        assert_eq!(rows[0].to_local(0, 0), (0, 4));
        assert_eq!(rows[1].window.y, 66..132);
        assert_eq!(rows[1].to_local(0, 66), (0, 4));
        assert_eq!(rows[2].window.y, 132..140);
        assert_eq!(rows[2].origin_y, 140 - 70);
        assert_eq!(rows[0].viewport.y, 72);
        assert_eq!(rows[1].viewport.y, 2 * 72 - 6);
    }

    #[test]
    fn test_pages_cover_grid_without_gaps() {
        let layouts = [layout(104, 72, 4, 2, 4), layout(20, 16, 2, 2, 2), layout(10, 10, 0, 0, 0)];
        for vl in layouts.iter() {
            for total_x in [0, 1, 7, 19, 40, 101, 233] {
                for total_y in [0, 2, 11, 36, 75, 150] {
                    let plan = PagePlan::new(vl, total_x, total_y);
                    for page in plan.pages() {
                        assert!(!page.window.is_empty());
                        assert!(page.window.x.start >= 0 && page.window.x.end <= plan.covered_x);
                        assert!(page.window.y.start >= 0 && page.window.y.end <= plan.covered_y);
                    }
                    for x in 0..plan.covered_x {
                        for y in 0..plan.covered_y {
                            let holder = plan.pages().iter().find(|page| page.contains(x, y));
                            let Some(page) = holder else {
                                panic!("({}, {}) uncovered for {}x{}", x, y, total_x, total_y);
                            };
                            assert_eq!(plan.page_of(x, y), Some((page.col, page.row)));
                        }
                    }
                    assert_eq!(plan.page_of(plan.covered_x, 0), None);
                    assert_eq!(plan.page_of(0, -1), None);
                    assert!(plan.covered_x <= total_x && total_x - plan.covered_x <= 1);
                }
            }
        }
    }

    #[test]
    fn test_resize_controls_per_mode() {
        let shrink = ViewportSize::new(40, 40);
        let smaller = ViewportSize::new(36, 40);
        assert_eq!(
            ResizeStep::new(shrink, smaller, ResizeMode::Init).controls(),
            vec![ResizeControl::HorizontalMinus, ResizeControl::HorizontalMinus]
        );
        assert_eq!(
            ResizeStep::new(shrink, smaller, ResizeMode::Finish).controls(),
            vec![ResizeControl::HorizontalPlus2, ResizeControl::HorizontalPlus2]
        );
        assert_eq!(
            ResizeStep::new(shrink, smaller, ResizeMode::Window).controls(),
            vec![
                ResizeControl::HorizontalPlus2,
                ResizeControl::HorizontalMinus,
                ResizeControl::HorizontalPlus2,
                ResizeControl::HorizontalMinus,
            ]
        );

        let grow = ResizeStep::new(ViewportSize::new(40, 40), ViewportSize::new(40, 43), ResizeMode::Window);
        // (40 - 43) / 2 truncates to one click.
        assert_eq!(grow.controls(), vec![ResizeControl::VerticalPlus, ResizeControl::VerticalMinus2]);
        assert!(ResizeStep::new(shrink, shrink, ResizeMode::Window).controls().is_empty());
    }

    #[test]
    fn test_schedule_modes() {
        let plan = PagePlan::new(&layout(104, 72, 4, 2, 4), 330, 10);
        let scheduled = plan.schedule(plan.default_start(), false);
        assert_eq!(scheduled.len(), plan.pages().len());
        assert_eq!(scheduled[0].resizes.len(), 1);
        assert_eq!(scheduled[0].resizes[0].mode, ResizeMode::Init);
        assert_eq!(scheduled[0].resizes[0].from, ViewportSize::new(40, 40));
        for pair in scheduled.windows(2) {
            assert_eq!(pair[1].resizes[0].mode, ResizeMode::Window);
            assert_eq!(pair[1].resizes[0].from, pair[0].page.viewport);
            assert_eq!(pair[1].resizes[0].to, pair[1].page.viewport);
        }
    }

    #[test]
    fn test_schedule_seeded_from_file_adds_one_shrink() {
        let plan = PagePlan::new(&layout(104, 72, 4, 2, 4), 330, 10);
        let start = ViewportSize::new(333, 13);
        let scheduled = plan.schedule(start, true);
        let first = &scheduled[0];
        assert_eq!(first.resizes.len(), 2);
        assert_eq!(first.resizes[0].mode, ResizeMode::Init);
        assert_eq!(first.resizes[0].from, start);
        let viewport = first.page.viewport;
        assert_eq!(
            first.resizes[1],
            ResizeStep::new(viewport, ViewportSize::new(viewport.x - 2, viewport.y - 2), ResizeMode::Window)
        );
        assert!(scheduled[1..].iter().all(|s| s.resizes.len() == 1));
    }

    #[test]
    fn test_finish_steps() {
        let plan = PagePlan::new(&layout(104, 72, 4, 2, 4), 330, 10);
        let [full, trim] = plan.finish_steps();
        assert_eq!(full.mode, ResizeMode::Finish);
        assert_eq!(full.from, ViewportSize::new(plan.covered_x, plan.covered_y));
        assert_eq!(full.to, ViewportSize::new(104, 72));
        assert_eq!(trim.mode, ResizeMode::Window);
        assert_eq!(trim.to, ViewportSize::new(plan.covered_x, plan.covered_y - 2));
    }
}
