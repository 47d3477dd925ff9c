use crate::session::{Flow, Session};
use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, Write};
use tinylink_core::Clock;
use tinylink_generator::Generator;
use tracing::debug;

const PROMPT: &str = "tinylink> ";

/// Line-editing front end for a [`Session`]. History lives only as long as
/// the process, like the registry itself.
pub struct Repl<G, C> {
    session: Session<G, C>,
    editor: DefaultEditor,
}

impl<G: Generator, C: Clock> Repl<G, C> {
    pub fn new(session: Session<G, C>) -> Result<Self> {
        let editor = DefaultEditor::new().context("Failed to initialize line editor")?;
        Ok(Self { session, editor })
    }

    pub fn run(&mut self) -> Result<()> {
        let stdout = io::stdout();
        {
            let mut out = stdout.lock();
            writeln!(out, "tinylink {}", env!("CARGO_PKG_VERSION"))?;
            writeln!(
                out,
                "Up to {} URLs per batch. Type `help` for commands, `quit` to leave.",
                self.session.form().max_rows()
            )?;
        }

        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if let Err(e) = self.editor.add_history_entry(line) {
                        debug!(error = %e, "history entry dropped");
                    }

                    let mut out = stdout.lock();
                    let flow = self.session.execute(line, &mut out)?;
                    out.flush()?;
                    if flow == Flow::Quit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C drops the current line only
                    println!("^C");
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err).context("Failed to read line"),
            }
        }

        println!(
            "Goodbye! {} URL(s) shortened this session.",
            self.session.registry().len()
        );
        Ok(())
    }
}
