//! External process helpers

use std::path::PathBuf;
use std::process::Output;

/// Resolve a program name against `PATH`
///
/// Names containing a path separator are used as given.
pub fn locate_program(program: &str) -> Result<PathBuf, String> {
    if program.contains(std::path::MAIN_SEPARATOR) || program.contains('/') {
        return Ok(PathBuf::from(program));
    }
    which::which(program).map_err(|e| format!("'{program}' not found in PATH: {e}"))
}

/// Stdout followed by stderr, lossily decoded and trimmed
pub fn combined_output(output: &Output) -> String {
    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    combined.trim().to_string()
}
