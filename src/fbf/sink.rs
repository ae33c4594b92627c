//! Debug sinks receiving intermediate maps by stage name.
use crate::error::Result;
use crate::grid::Grid;
use crate::image::save_grayscale;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Destination for intermediate grids.
///
/// Each stage writes each name at most once per run and writes may arrive
/// from several threads in any order.
pub trait DebugSink: Send + Sync {
    /// `normalize` asks for a min/max rescale to the display range before
    /// the grid is rendered.
    fn save(&self, name: &str, grid: &Grid, normalize: bool) -> Result<()>;
}

/// Writes `<dir>/<name>.png` for every saved grid.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DebugSink for DirectorySink {
    fn save(&self, name: &str, grid: &Grid, normalize: bool) -> Result<()> {
        save_grayscale(grid, &self.dir.join(format!("{name}.png")), normalize)
    }
}

/// Keeps copies of every saved grid, keyed by name.
#[derive(Debug, Default)]
pub struct MemorySink {
    grids: Mutex<BTreeMap<String, Grid>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Grid> {
        self.lock().get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drain the collected grids in name order.
    pub fn into_inner(self) -> BTreeMap<String, Grid> {
        self.grids.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Grid>> {
        self.grids.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DebugSink for MemorySink {
    fn save(&self, name: &str, grid: &Grid, _normalize: bool) -> Result<()> {
        self.lock().insert(name.to_owned(), grid.clone());
        Ok(())
    }
}
