//! The interactive session: one command per line, dispatched onto a
//! [`Session`].
//!
//! Row numbers on the command line are 1-based. A failing command prints one
//! error message and leaves the session as it was.

use std::path::PathBuf;
use std::str::FromStr;

use pdfdeck::error::{PdfDeckError, Result};
use pdfdeck::list::Direction;
use pdfdeck::notice::{self, NoticeReceiver};
use pdfdeck::output::{OutputFormatter, display_merge_summary, display_preview_summary};
use pdfdeck::session::Session;

/// Text printed by `help`.
pub const HELP: &str = "\
Commands (rows are numbered from 1; quote paths that contain spaces):
  load <file|pattern>...   replace the selection
  list [--json]            show the selected files in merge order
  up <row>                 move a file one place up
  down <row>               move a file one place down
  drag <from> <to>         drop file <from> onto file <to>
  touch <row> <over>...    touch-drag a file across rows ('-' = over nothing)
  merge                    merge the files in list order
  preview [dir]            render the merged pages, optionally saving images
  download [dir]           save the merged document
  clear                    empty the selection
  help                     show this help
  quit | exit              leave the session";

/// One parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the selection with the files matching the patterns.
    Load(Vec<String>),
    /// Print the rows.
    List {
        /// Print JSON instead of text.
        json: bool,
    },
    /// Move a row one place.
    Move {
        /// 1-based row.
        row: usize,
        /// Direction of the move.
        direction: Direction,
    },
    /// Drop one row onto another.
    Drag {
        /// 1-based row being dragged.
        from: usize,
        /// 1-based row it is dropped on.
        to: usize,
    },
    /// Replay a touch gesture.
    Touch {
        /// 1-based row being dragged.
        row: usize,
        /// 1-based rows under the finger, sample by sample.
        over: Vec<Option<usize>>,
    },
    /// Merge the current order.
    Merge,
    /// Render the merged document.
    Preview(Option<PathBuf>),
    /// Save the merged document.
    Download(Option<PathBuf>),
    /// Empty the selection.
    Clear,
    /// Print the command summary.
    Help,
    /// End the session.
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines and `#` comments yield `None`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfDeckError::InvalidCommand`] for unknown commands and bad
    /// arguments.
    pub fn parse_line(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        line.parse().map(Some)
    }
}

impl FromStr for Command {
    type Err = PdfDeckError;

    fn from_str(s: &str) -> Result<Self> {
        let words =
            shlex::split(s).ok_or_else(|| PdfDeckError::invalid_command("unbalanced quotes"))?;
        let (name, args) = words
            .split_first()
            .ok_or_else(|| PdfDeckError::invalid_command("empty command"))?;
        let name = name.as_str();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        let command = match name.to_lowercase().as_str() {
            "load" => {
                if args.is_empty() {
                    return Err(PdfDeckError::invalid_command("load needs at least one file"));
                }
                Self::Load(args.iter().map(|a| a.to_string()).collect())
            }
            "list" => match args.as_slice() {
                [] => Self::List { json: false },
                ["--json"] => Self::List { json: true },
                _ => return Err(PdfDeckError::invalid_command("usage: list [--json]")),
            },
            "up" | "down" => {
                let [row] = args.as_slice() else {
                    return Err(PdfDeckError::invalid_command(format!("usage: {name} <row>")));
                };
                let direction = if name.eq_ignore_ascii_case("up") {
                    Direction::Up
                } else {
                    Direction::Down
                };
                Self::Move {
                    row: parse_row(row)?,
                    direction,
                }
            }
            "drag" => {
                let [from, to] = args.as_slice() else {
                    return Err(PdfDeckError::invalid_command("usage: drag <from> <to>"));
                };
                Self::Drag {
                    from: parse_row(from)?,
                    to: parse_row(to)?,
                }
            }
            "touch" => {
                let Some((row, over)) = args.split_first().filter(|(_, over)| !over.is_empty())
                else {
                    return Err(PdfDeckError::invalid_command(
                        "usage: touch <row> <over>...",
                    ));
                };
                Self::Touch {
                    row: parse_row(row)?,
                    over: over
                        .iter()
                        .map(|o| if *o == "-" { Ok(None) } else { parse_row(o).map(Some) })
                        .collect::<Result<_>>()?,
                }
            }
            "merge" => no_args(name, &args, Self::Merge)?,
            "preview" => Self::Preview(optional_dir(name, &args)?),
            "download" => Self::Download(optional_dir(name, &args)?),
            "clear" => no_args(name, &args, Self::Clear)?,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => {
                return Err(PdfDeckError::invalid_command(format!(
                    "unknown command '{other}' (try 'help')"
                )));
            }
        };

        Ok(command)
    }
}

fn parse_row(word: &str) -> Result<usize> {
    match word.parse::<usize>() {
        Ok(row) if row >= 1 => Ok(row),
        _ => Err(PdfDeckError::invalid_command(format!(
            "'{word}' is not a row number"
        ))),
    }
}

fn no_args(name: &str, args: &[&str], command: Command) -> Result<Command> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(PdfDeckError::invalid_command(format!(
            "{name} takes no arguments"
        )))
    }
}

fn optional_dir(name: &str, args: &[&str]) -> Result<Option<PathBuf>> {
    match args {
        [] => Ok(None),
        [dir] => Ok(Some(PathBuf::from(dir))),
        _ => Err(PdfDeckError::invalid_command(format!(
            "usage: {name} [dir]"
        ))),
    }
}

/// Whether the session should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command.
    Continue,
    /// Stop.
    Quit,
}

/// Drives a [`Session`] from text commands.
pub struct Shell {
    session: Session,
    formatter: OutputFormatter,
    notices: NoticeReceiver,
    output_dir: PathBuf,
    last_error: Option<PdfDeckError>,
}

impl Shell {
    /// Create a shell around `session`.
    pub fn new(
        session: Session,
        formatter: OutputFormatter,
        notices: NoticeReceiver,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            session,
            formatter,
            notices,
            output_dir,
            last_error: None,
        }
    }

    /// The underlying session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Error of the most recent failed command, if any.
    pub fn last_error(&self) -> Option<&PdfDeckError> {
        self.last_error.as_ref()
    }

    /// Parse and run one input line, reporting any failure.
    pub async fn run_line(&mut self, line: &str) -> Flow {
        let flow = match Command::parse_line(line) {
            Ok(Some(command)) => self.run(command).await,
            Ok(None) => Flow::Continue,
            Err(err) => {
                self.report(err);
                Flow::Continue
            }
        };
        self.flush_notices();
        flow
    }

    /// Run one command, reporting any failure.
    pub async fn run(&mut self, command: Command) -> Flow {
        log::debug!("Running {command:?}");
        match self.execute(command).await {
            Ok(flow) => flow,
            Err(err) => {
                self.report(err);
                Flow::Continue
            }
        }
    }

    /// Wait for background work and print what it reported.
    pub async fn finish(&mut self) {
        self.session.settle_thumbnails().await;
        self.flush_notices();
    }

    fn report(&mut self, err: PdfDeckError) {
        if err.is_precondition() {
            self.formatter.warning(&err.to_string());
        } else {
            self.formatter.error(&err.to_string());
        }
        self.last_error = Some(err);
    }

    fn flush_notices(&mut self) {
        for notice in notice::drain(&mut self.notices) {
            self.formatter.notice(&notice);
        }
    }

    async fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Load(patterns) => {
                self.session.select_paths(&patterns).await?;
                self.formatter
                    .success(&format!("Selected {} file(s)", self.session.list().len()));
            }
            Command::List { json } => {
                self.session.settle_thumbnails().await;
                let rows = self.session.rows();
                if json {
                    let text = serde_json::to_string_pretty(&rows)
                        .map_err(|e| PdfDeckError::other(e.to_string()))?;
                    println!("{text}");
                } else {
                    self.formatter.rows(&rows);
                }
            }
            Command::Move { row, direction } => {
                let index = self.index_of(row)?;
                if !self.session.move_index(index, direction) {
                    self.formatter
                        .debug(&format!("Row {row} cannot move {direction}"));
                }
            }
            Command::Drag { from, to } => {
                let source = self.row_id(from)?;
                let target = self.row_id(to)?;
                self.session.reorder_by_drag(source, target);
            }
            Command::Touch { row, over } => {
                let id = self.row_id(row)?;
                let mut drag = self
                    .session
                    .begin_touch(id)
                    .ok_or_else(|| PdfDeckError::invalid_command(format!("no row {row}")))?;
                for sample in over {
                    let over_index = sample.map(|r| r - 1);
                    if let Some(direction) = self.session.touch_sample(&mut drag, over_index) {
                        self.formatter.debug(&format!("Touch moved row {direction}"));
                    }
                }
                drag.end();
            }
            Command::Merge => {
                let merged = self.session.merge().await?;
                display_merge_summary(&self.formatter, merged);
            }
            Command::Preview(dir) => {
                let pages = self.session.preview().await?;
                display_preview_summary(&self.formatter, pages);
                if let Some(dir) = dir {
                    let written = self.session.export_preview(&dir).await?;
                    self.formatter.success(&format!(
                        "Saved {} preview image(s) to {}",
                        written.len(),
                        dir.display()
                    ));
                }
            }
            Command::Download(dir) => {
                let dir = dir.unwrap_or_else(|| self.output_dir.clone());
                let path = self.session.download(&dir).await?;
                self.formatter
                    .success(&format!("Saved {}", path.display()));
            }
            Command::Clear => {
                self.session.clear();
                self.formatter.info("Selection cleared");
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn index_of(&self, row: usize) -> Result<usize> {
        let len = self.session.list().len();
        if row == 0 || row > len {
            return Err(PdfDeckError::invalid_command(format!(
                "no row {row} ({len} file(s) selected)"
            )));
        }
        Ok(row - 1)
    }

    fn row_id(&self, row: usize) -> Result<pdfdeck::FileId> {
        let index = self.index_of(row)?;
        self.session
            .list()
            .get(index)
            .map(|entry| entry.id())
            .ok_or_else(|| PdfDeckError::invalid_command(format!("no row {row}")))
    }
}
