//! Output naming: where files go and how collisions are avoided.
//!
//! Names are claimed with `create_new` / `create_dir`, so two conversions
//! running at once never end up writing to the same path.

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Directory and base name every output for one input is derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    pub dir: PathBuf,
    pub stem: String,
}

impl ExportTarget {
    /// Outputs go into `output_dir` if given, otherwise beside `input`.
    /// The directory is created if it does not exist yet.
    pub fn for_input(input: &Path, output_dir: Option<&Path>) -> Result<Self> {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .with_context(|| format!("No usable file name in {}", input.display()))?
            .to_string();
        let dir = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("creating output directory {}", dir.display()))?;
        }
        Ok(Self { dir, stem })
    }

    /// Create the first free `<stem>.<ext>`, `<stem> (1).<ext>`, ...
    pub fn create_file(&self, ext: &str) -> Result<(PathBuf, File)> {
        create_unique_file(&self.dir, &self.stem, ext)
    }

    /// Create the first free `<stem>`, `<stem> (1)`, ... directory.
    pub fn create_dir(&self) -> Result<PathBuf> {
        create_unique_dir(&self.dir, &self.stem)
    }
}

fn candidate(dir: &Path, stem: &str, n: usize, ext: Option<&str>) -> PathBuf {
    let name = if n == 0 {
        stem.to_string()
    } else {
        format!("{stem} ({n})")
    };
    match ext {
        Some(ext) => dir.join(format!("{name}.{ext}")),
        None => dir.join(name),
    }
}

/// Create a new file in `dir` named `stem.ext`, or `stem (n).ext` for the
/// smallest n = 1, 2, ... that is still free.
pub fn create_unique_file(dir: &Path, stem: &str, ext: &str) -> Result<(PathBuf, File)> {
    for n in 0.. {
        let path = candidate(dir, stem, n, Some(ext));
        match File::options().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e).with_context(|| format!("creating {}", path.display())),
        }
    }
    unreachable!("unbounded range")
}

/// Create a new directory in `dir` named `stem`, or `stem (n)` for the
/// smallest n = 1, 2, ... that is still free.
pub fn create_unique_dir(dir: &Path, stem: &str) -> Result<PathBuf> {
    for n in 0.. {
        let path = candidate(dir, stem, n, None);
        match std::fs::create_dir(&path) {
            Ok(()) => return Ok(path),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e).with_context(|| format!("creating {}", path.display())),
        }
    }
    unreachable!("unbounded range")
}

/// File stem for spectrum `index` (zero-based) of `count`: the one-based
/// number zero-padded to the width of `count`, then the sample name if any.
pub fn spectrum_file_stem(index: usize, count: usize, name: &str) -> String {
    let digits = count.to_string().len();
    let number = format!("{:0digits$}", index + 1);
    let name = sanitize_file_name(name);
    if name.is_empty() {
        number
    } else {
        format!("{number} - {name}")
    }
}

/// Replace characters that are unsafe in file names on common platforms and
/// trim leading/trailing spaces and dots.
pub fn sanitize_file_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    replaced.trim_matches(|c: char| c == ' ' || c == '.').to_string()
}
