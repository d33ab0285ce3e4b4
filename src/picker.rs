use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

const EXTENSIONS: [&str; 2] = ["txt", "md"];

/// Directory listing of `.txt`/`.md` files to pick a typing target from
#[derive(Debug, Clone)]
pub struct FilePicker {
    dir: PathBuf,
    entries: Vec<PathBuf>,
    selected: usize,
    error: Option<String>,
}

impl FilePicker {
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let mut entries: Vec<PathBuf> = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && has_text_extension(path))
            .collect();
        entries.sort();

        let error = entries
            .is_empty()
            .then(|| format!("no .txt or .md files in {}", dir.display()));

        Ok(Self {
            dir,
            entries,
            selected: 0,
            error,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_path(&self) -> Option<&Path> {
        self.entries.get(self.selected).map(PathBuf::as_path)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

fn has_text_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}
