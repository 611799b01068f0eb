//! Asking the user for an input file when none was given.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::data::loader::is_supported_file;

/// Keep asking on `output` until a line read from `input` names an existing
/// `.KD` or `.SD` file. Returns `None` at end of input.
pub fn prompt_for_path<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> io::Result<Option<PathBuf>> {
    let mut line = String::new();
    loop {
        write!(output, "Enter a file path: ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let entered = line.trim().trim_matches('"');
        if entered.is_empty() {
            continue;
        }

        let path = PathBuf::from(entered);
        if is_supported_file(&path) {
            return Ok(Some(path));
        }
        writeln!(output, "Invalid file path (must be a .KD or .SD file).")?;
    }
}

/// Native file picker filtered to supported containers.
#[cfg(feature = "dialog")]
fn pick_files() -> Option<Vec<PathBuf>> {
    rfd::FileDialog::new()
        .set_title("Open UV-Vis data")
        .add_filter("ChemStation UV-Vis", &["KD", "SD", "kd", "sd"])
        .add_filter("Multi-spectrum (.KD)", &["KD", "kd"])
        .add_filter("Sample log (.SD)", &["SD", "sd"])
        .pick_files()
        .filter(|paths| !paths.is_empty())
}

#[cfg(not(feature = "dialog"))]
fn pick_files() -> Option<Vec<PathBuf>> {
    None
}

/// Ask for input files: file dialog first (if built in), then the terminal.
pub fn ask_for_inputs() -> io::Result<Vec<PathBuf>> {
    if let Some(paths) = pick_files() {
        return Ok(paths);
    }

    let stdin = io::stdin();
    let path = prompt_for_path(stdin.lock(), io::stdout())?;
    Ok(path.into_iter().collect())
}
