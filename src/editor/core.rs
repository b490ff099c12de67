// src/editor/core.rs

use log::{info, warn};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::document::Document;
use crate::editor::commands::Action;
use crate::editor::elevation::{sequence_elevation, ElevatedSquare};
use crate::editor::pages::{PagePlan, ViewportSize};
use crate::editor::terrain::{paint_terrain, TerrainSquare};
use crate::error::{AutopaintError, Result};
use crate::platform::{InputDriver, Pacing};
use crate::profile::{Profile, ScreenLayout};

/// Per-run switches chosen by the operator.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Continue a map whose current size matches the extents of the input
    /// file instead of the editor's default size.
    pub start_size_from_file: bool,
    pub pacing: Pacing,
    /// Where to save the document, done marks included, if the run is
    /// aborted. Nothing is written otherwise.
    pub checkpoint: Option<PathBuf>,
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub pages: usize,
    pub clicks: usize,
    pub key_presses: usize,
    pub cells_done: usize,
    /// Pending cells outside the area the pages can reach.
    pub cells_skipped: usize,
    pub aborted: bool,
}

/// Forwards actions to a driver, pacing them and keeping count.
struct Executor<'d, D: InputDriver> {
    driver: &'d mut D,
    pacing: Pacing,
    clicks: usize,
    key_presses: usize,
}

impl<'d, D: InputDriver> Executor<'d, D> {
    fn new(driver: &'d mut D, pacing: Pacing) -> Self {
        Self {
            driver,
            pacing,
            clicks: 0,
            key_presses: 0,
        }
    }

    fn run(&mut self, actions: &[Action]) -> Result<()> {
        for action in actions {
            self.driver.perform(action)?;
            if action.is_click() {
                self.clicks += 1;
            } else {
                self.key_presses += 1;
            }
            self.pacing.wait_after(action);
        }
        Ok(())
    }
}

/// Paints a document into the scenario editor, one viewport page at a time.
pub struct Session<'a> {
    layout: &'a ScreenLayout,
    profile: &'a Profile,
    options: RunOptions,
}

impl<'a> Session<'a> {
    pub fn new(layout: &'a ScreenLayout, profile: &'a Profile, options: RunOptions) -> Self {
        Self { layout, profile, options }
    }

    /// Viewport size the editor is assumed to show before the first page.
    pub fn start_viewport(&self, doc: &Document) -> ViewportSize {
        let viewport = &self.layout.viewport;
        match (self.options.start_size_from_file, doc.max_coords()) {
            (true, Some((max_x, max_y))) => {
                ViewportSize::new(
                    max_x.saturating_add(viewport.right_margin),
                    max_y.saturating_add(viewport.bottom_margin),
                )
            }
            _ => ViewportSize::new(viewport.start_squares_x, viewport.start_squares_y),
        }
    }

    /// Plans pages over the cells not yet done.
    pub fn plan(&self, doc: &Document) -> PagePlan {
        let (total_x, total_y) = doc
            .pending_max_coords()
            .map(|(max_x, max_y)| (max_x.saturating_add(1), max_y.saturating_add(1)))
            .unwrap_or((0, 0));
        PagePlan::new(&self.layout.viewport, total_x, total_y)
    }

    /// Runs every page against `driver`, marking cells done as their page
    /// completes. An abort from the driver ends the run early with
    /// `aborted` set, after writing the checkpoint if one was requested; any
    /// other driver error is returned.
    pub fn run<D: InputDriver>(&self, doc: &mut Document, driver: &mut D) -> Result<RunSummary> {
        self.layout.viewport.validate()?;
        let start = self.start_viewport(doc);
        let plan = self.plan(doc);

        // Pending cells per (col, row), in input order.
        let mut by_page: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        let mut pending = 0;
        for idx in doc.pending_indices() {
            let cell = &doc.cells()[idx];
            if let Some(key) = plan.page_of(cell.x, cell.y) {
                by_page.entry(key).or_default().push(idx);
                pending += 1;
            }
        }
        let mut summary = RunSummary {
            cells_skipped: doc.len() - doc.num_done() - pending,
            ..RunSummary::default()
        };
        if summary.cells_skipped > 0 {
            warn!("{} cells lie outside the paintable area and will be skipped", summary.cells_skipped);
        }
        info!(
            "Planned {} pages ({} x {} squares) for {} cells",
            plan.pages().len(),
            plan.covered_x,
            plan.covered_y,
            pending
        );

        let mut executor = Executor::new(driver, self.options.pacing);
        let outcome = self.paint_pages(doc, &plan, start, by_page, &mut executor, &mut summary);

        summary.clicks = executor.clicks;
        summary.key_presses = executor.key_presses;
        match outcome {
            Ok(()) => Ok(summary),
            Err(AutopaintError::Aborted) => {
                warn!("Run aborted after {} of {} pages", summary.pages, plan.pages().len());
                summary.aborted = true;
                if let Some(path) = &self.options.checkpoint {
                    doc.save(path)?;
                }
                Ok(summary)
            }
            Err(e) => Err(e),
        }
    }

    fn paint_pages<D: InputDriver>(
        &self,
        doc: &mut Document,
        plan: &PagePlan,
        start: ViewportSize,
        mut by_page: HashMap<(i64, i64), Vec<usize>>,
        executor: &mut Executor<'_, D>,
        summary: &mut RunSummary,
    ) -> Result<()> {
        let mut height = self.layout.start_height;
        for scheduled in plan.schedule(start, self.options.start_size_from_file) {
            let page = scheduled.page;
            let members = by_page.remove(&(page.col, page.row)).unwrap_or_default();

            let mut actions: Vec<Action> = scheduled
                .resizes
                .iter()
                .flat_map(|step| step.actions(&self.layout.resize))
                .collect();

            let cells = doc.cells();
            let elevated: Vec<ElevatedSquare> = members
                .iter()
                .map(|&idx| {
                    let (x, y) = page.to_local(cells[idx].x, cells[idx].y);
                    ElevatedSquare { x, y, z: cells[idx].z }
                })
                .collect();
            let pass = sequence_elevation(&elevated, height, self.layout);
            height = pass.final_height;
            actions.extend(pass.actions);

            let terrain: Vec<TerrainSquare<'_>> = members
                .iter()
                .map(|&idx| {
                    let (x, y) = page.to_local(cells[idx].x, cells[idx].y);
                    TerrainSquare { x, y, labels: &cells[idx].labels }
                })
                .collect();
            actions.extend(paint_terrain(&terrain, self.profile, self.layout));

            info!(
                "Page ({}, {}): {} cells, {} actions",
                page.col,
                page.row,
                members.len(),
                actions.len()
            );
            executor.run(&actions)?;
            doc.mark_done(&members);
            summary.pages += 1;
            summary.cells_done += members.len();
        }

        for step in plan.finish_steps() {
            executor.run(&step.actions(&self.layout.resize))?;
        }
        Ok(())
    }
}
