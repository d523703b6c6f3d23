//! Where the image path comes from: the command line, or a one-line prompt.

use crate::error::OcrError;
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub const PROMPT: &str = "Please enter the path to the image file: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Argument(PathBuf),
    Interactive,
}

impl InputSource {
    pub fn from_arg(arg: Option<PathBuf>) -> Self {
        match arg {
            Some(path) => Self::Argument(path),
            None => Self::Interactive,
        }
    }

    /// Resolve to a path, prompting on `out` and reading one line from `input`
    /// when no argument was given. Blank input resolves to `None`.
    pub fn resolve<R: BufRead, W: Write>(
        self,
        input: &mut R,
        out: &mut W,
    ) -> Result<Option<PathBuf>, OcrError> {
        let raw = match self {
            Self::Argument(path) => return Ok(non_empty(path)),
            Self::Interactive => {
                write!(out, "{}", PROMPT).map_err(|e| OcrError::InputError(e.to_string()))?;
                out.flush()
                    .map_err(|e| OcrError::InputError(e.to_string()))?;

                let mut line = String::new();
                input
                    .read_line(&mut line)
                    .map_err(|e| OcrError::InputError(e.to_string()))?;
                line
            }
        };

        Ok(non_empty(PathBuf::from(strip_quotes(raw.trim()))))
    }
}

fn non_empty(path: PathBuf) -> Option<PathBuf> {
    if path.as_os_str().is_empty() {
        None
    } else {
        Some(path)
    }
}

/// Drag-and-drop into a terminal wraps paths in quotes
fn strip_quotes(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}
