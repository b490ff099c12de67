// src/document/document.rs

use crate::error::Result;
use crate::map::{Cell, CellRecord};
use log::info;
use std::fs::File;
use std::ffi::OsString;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// The cell table of one input file, with per-cell completion marks.
#[derive(Debug, Default, Clone)]
pub struct Document {
    cells: Vec<Cell>,
}

impl Document {
    /// Create a new empty Document.
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Reads a cell table. `x`, `y` and `z` are required columns; the
    /// label columns and `done` are optional. A row whose coordinates are not
    /// finite or do not fit the grid fails the whole load.
    pub fn load_csv<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut cells = Vec::new();
        for record in csv_reader.deserialize::<CellRecord>() {
            cells.push(Cell::try_from(record?)?);
        }
        Ok(Self { cells })
    }

    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let doc = Self::load_csv(file)?;
        info!("Loaded {} cells from {:?}", doc.cells.len(), path);
        Ok(doc)
    }

    /// Writes every cell back out, including its `done` mark.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for cell in &self.cells {
            csv_writer.serialize(CellRecord::from(cell))?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write_csv(file)?;
        info!("Wrote {} cells to {:?}", self.cells.len(), path);
        Ok(())
    }

    /// `<input>.checkpoint`, next to the input file.
    pub fn checkpoint_path(input: &Path) -> PathBuf {
        let mut name: OsString = input.as_os_str().to_owned();
        name.push(".checkpoint");
        PathBuf::from(name)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Indices of the cells that still need painting.
    pub fn pending_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.done)
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn num_done(&self) -> usize {
        self.cells.iter().filter(|cell| cell.done).count()
    }

    pub fn mark_done(&mut self, indices: &[usize]) {
        for &idx in indices {
            if let Some(cell) = self.cells.get_mut(idx) {
                cell.done = true;
            }
        }
    }

    /// Largest (x, y) over all cells, done or not.
    pub fn max_coords(&self) -> Option<(i64, i64)> {
        max_coords(self.cells.iter())
    }

    /// Largest (x, y) over the cells not yet done.
    pub fn pending_max_coords(&self) -> Option<(i64, i64)> {
        max_coords(self.cells.iter().filter(|cell| !cell.done))
    }
}

fn max_coords<'a>(cells: impl Iterator<Item = &'a Cell>) -> Option<(i64, i64)> {
    cells.fold(None, |acc, cell| match acc {
        None => Some((cell.x, cell.y)),
        Some((mx, my)) => Some((mx.max(cell.x), my.max(cell.y))),
    })
}
