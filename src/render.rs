//! The external renderer that turns DOT text into an image.

use crate::error::RenderError;
use log::debug;
use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Something that can turn a DOT payload into a file of the requested type.
pub trait Renderer {
    /// Render `payload` as `filetype` into `output`, blocking until done.
    ///
    /// # Errors
    ///
    /// Returns an error if the output could not be produced.
    fn render(&self, payload: &str, filetype: &str, output: &Path) -> Result<(), RenderError>;
}

/// Runs a Graphviz-compatible program as `<program> -T<filetype> -o<output>` with the payload on
/// stdin.
pub struct DotRenderer {
    /// Program to run, `dot` by default.
    pub program: String,
}

impl DotRenderer {
    #[must_use]
    /// A renderer running `program`.
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }
}

impl Default for DotRenderer {
    fn default() -> Self {
        Self::new("dot")
    }
}

impl Renderer for DotRenderer {
    fn render(&self, payload: &str, filetype: &str, output: &Path) -> Result<(), RenderError> {
        let mut output_arg = OsString::from("-o");
        output_arg.push(output);

        debug!("Running {} -T{filetype} -o{}", self.program, output.display());
        let mut child = Command::new(&self.program)
            .arg(format!("-T{filetype}"))
            .arg(output_arg)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|source| RenderError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Dropping stdin at the end of this statement closes the pipe so the child can finish.
        let written = child
            .stdin
            .take()
            .map_or(Ok(()), |mut stdin| stdin.write_all(payload.as_bytes()));

        // Always reap the child, even if the write failed.
        let status = child.wait().map_err(|source| RenderError::Wait {
            program: self.program.clone(),
            source,
        })?;

        if !status.success() {
            return Err(RenderError::Exit {
                program: self.program.clone(),
                status,
            });
        }
        written.map_err(|source| RenderError::Write {
            program: self.program.clone(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "tests/render.rs"]
mod tests;
