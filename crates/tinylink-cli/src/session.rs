use crate::command::{Command, Line};
use crate::form::DraftForm;
use crate::render::Renderer;
use clap::error::ErrorKind;
use serde::Serialize;
use std::io::{self, Write};
use tinylink_core::Clock;
use tinylink_generator::Generator;
use tinylink_registry::{Registry, RegistryError};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The state behind one interactive session: the registry, the draft form
/// being edited, and how results are shown.
pub struct Session<G, C> {
    registry: Registry<G, C>,
    form: DraftForm,
    renderer: Renderer,
}

impl<G: Generator, C: Clock> Session<G, C> {
    pub fn new(registry: Registry<G, C>, form: DraftForm, renderer: Renderer) -> Self {
        Self {
            registry,
            form,
            renderer,
        }
    }

    pub fn registry(&self) -> &Registry<G, C> {
        &self.registry
    }

    pub fn form(&self) -> &DraftForm {
        &self.form
    }

    /// Runs one input line. Only failures writing to `out` are errors;
    /// bad input and refused operations are reported to the user.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        let command = match Line::parse_line(line) {
            Ok(command) => command,
            Err(e) => {
                if !matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                    debug!(kind = ?e.kind(), "unparsable input");
                }
                write!(out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Add {
                url,
                code,
                validity,
            } => match self.form.add(url, code, validity) {
                Ok(row) => writeln!(out, "Added row {row}.")?,
                Err(e) => writeln!(out, "{e}")?,
            },
            Command::Remove { row } => match self.form.remove(row) {
                Ok(_) => writeln!(out, "Removed row {row}.")?,
                Err(e) => writeln!(out, "{e}")?,
            },
            Command::Form => writeln!(out, "{}", self.renderer.form(self.form.rows()))?,
            Command::Clear => {
                self.form.clear();
                writeln!(out, "Form cleared.")?;
            }
            Command::Submit => self.submit(out)?,
            Command::List { json } => {
                let rows = self.registry.list();
                if json {
                    write_json(out, &rows)?;
                } else {
                    let now = self.registry.now();
                    writeln!(out, "{}", self.renderer.listing(&rows, now))?;
                }
            }
            Command::Stats { code, last, json } => match self.registry.get(&code) {
                Ok(detail) if json => write_json(out, &detail)?,
                Ok(detail) => {
                    let now = self.registry.now();
                    writeln!(out, "{}", self.renderer.detail(&detail, now, last))?;
                }
                Err(e) => writeln!(out, "Error: {e}")?,
            },
            Command::Visit { code, referrer } => {
                match self.registry.record_click(&code, referrer.as_deref()) {
                    Ok(navigation) => writeln!(out, "opening {}", navigation.target)?,
                    Err(e) => writeln!(out, "Error: {e}")?,
                }
            }
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn submit<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if self.form.is_empty() {
            return writeln!(out, "The form is empty. Use `add <URL>` first.");
        }

        match self.registry.register(self.form.rows()) {
            Ok(codes) => {
                writeln!(out, "URLs shortened successfully!")?;
                for (draft, code) in self.form.rows().iter().zip(&codes) {
                    writeln!(
                        out,
                        "  {} -> {}",
                        self.renderer.short_url(code),
                        draft.long_url.trim()
                    )?;
                }
                self.form.clear();
            }
            Err(RegistryError::Validation(errors)) => {
                writeln!(out, "Please fix the errors in the form")?;
                writeln!(out, "{}", self.renderer.field_errors(&errors))?;
            }
            Err(e) => writeln!(out, "Error: {e}")?,
        }
        Ok(())
    }
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    writeln!(out, "{json}")
}
