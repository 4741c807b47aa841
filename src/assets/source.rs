use std::path::{Path, PathBuf};

/// Layout of the numbered source image directory (`<dir>/1.jpg`, `<dir>/2.jpg`, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLayout {
    dir: PathBuf,
    ext: String,
}

impl SourceLayout {
    pub fn new(dir: impl Into<PathBuf>, ext: impl Into<String>) -> Self {
        let ext = ext.into();
        let ext = ext.trim_start_matches('.').to_string();
        Self {
            dir: dir.into(),
            ext,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ext(&self) -> &str {
        &self.ext
    }

    /// True when the source directory exists. Individual files are not checked here;
    /// a missing `N.<ext>` surfaces as a decode error when it is first loaded.
    pub fn is_present(&self) -> bool {
        self.dir.is_dir()
    }

    /// Path of the 1-based source image `index`.
    pub fn path_for(&self, index: u32) -> PathBuf {
        self.dir.join(format!("{index}.{}", self.ext))
    }

    /// Instructions printed when the directory is absent.
    pub fn guidance(&self, count: u32) -> String {
        let dir = self.dir.display();
        let last = count.max(1);
        format!(
            "You need a directory called {dir} for this project to work, with images in that \
             directory numerically numbered. It should contain {last} images named \
             1.{ext} through {last}.{ext} (for example {dir}/1.{ext}, {dir}/2.{ext}, ...).",
            ext = self.ext,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
