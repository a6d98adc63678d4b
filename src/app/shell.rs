use crate::app::report;
use crate::core::loader::parse_decimal;
use crate::core::session::Session;
use crate::utils::error::{BoxmatchError, Result};
use std::io::{BufRead, Write};

const PROMPT: &str = "boxmatch> ";

const HELP: &str = "Commands:
  view                                  catalog, packages and data quality report
  catalog                               list products
  packages                              list packages
  audit                                 data quality report
  register <name> <height> <width> <depth>
                                        add a package (name may contain spaces)
  recommend <code> <quantity>           smallest package for a product quantity
  help                                  show this message
  quit                                  leave the session";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Empty,
    Help,
    View,
    Catalog,
    Packages,
    Audit,
    Register {
        name: String,
        height: f64,
        width: f64,
        depth: f64,
    },
    Recommend {
        code: String,
        quantity: i64,
    },
    Quit,
}

fn usage(value: &str, usage: &str) -> BoxmatchError {
    BoxmatchError::InvalidInput {
        field: "command",
        value: value.to_string(),
        reason: format!("usage: {}", usage),
    }
}

fn parse_dimension(field: &'static str, raw: &str) -> Result<f64> {
    parse_decimal(raw, ',').ok_or_else(|| BoxmatchError::InvalidInput {
        field,
        value: raw.to_string(),
        reason: "expected a number".to_string(),
    })
}

pub fn parse_command(line: &str) -> Result<ShellCommand> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&keyword, args)) = tokens.split_first() else {
        return Ok(ShellCommand::Empty);
    };

    match (keyword.to_lowercase().as_str(), args) {
        ("help" | "?", _) => Ok(ShellCommand::Help),
        ("view", []) => Ok(ShellCommand::View),
        ("catalog", []) => Ok(ShellCommand::Catalog),
        ("packages", []) => Ok(ShellCommand::Packages),
        ("audit", []) => Ok(ShellCommand::Audit),
        ("quit" | "exit", []) => Ok(ShellCommand::Quit),
        ("register", [name @ .., height, width, depth]) => Ok(ShellCommand::Register {
            name: name.join(" "),
            height: parse_dimension("height", height)?,
            width: parse_dimension("width", width)?,
            depth: parse_dimension("depth", depth)?,
        }),
        ("register", _) => Err(usage(line, "register <name> <height> <width> <depth>")),
        ("recommend", [code, quantity]) => Ok(ShellCommand::Recommend {
            code: code.to_string(),
            quantity: quantity
                .parse::<i64>()
                .map_err(|_| BoxmatchError::InvalidInput {
                    field: "quantity",
                    value: quantity.to_string(),
                    reason: "quantity must be a whole number".to_string(),
                })?,
        }),
        ("recommend", _) => Err(usage(line, "recommend <code> <quantity>")),
        _ => Err(BoxmatchError::InvalidInput {
            field: "command",
            value: keyword.to_string(),
            reason: "unknown command, type 'help'".to_string(),
        }),
    }
}

/// Line-oriented front end over a [`Session`].
pub struct Shell {
    session: Session,
}

impl Shell {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Reads commands until `quit` or end of input. Input mistakes are printed
    /// and the loop continues; catalog loading failures end the session.
    pub async fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            let outcome = match parse_command(&line) {
                Ok(command) => self.execute(command, out).await,
                Err(e) => Err(e),
            };

            match outcome {
                Ok(false) => return Ok(()),
                Ok(true) => {}
                Err(e) if e.is_user_error() => {
                    tracing::debug!("Rejected input '{}': {}", line, e);
                    writeln!(out, "ERROR  {}", e.user_friendly_message())?;
                }
                Err(e) => return Err(e),
            }

            write!(out, "{}", PROMPT)?;
            out.flush()?;
        }

        writeln!(out)?;
        Ok(())
    }

    /// Runs one command; returns `false` when the session should end.
    pub async fn execute<W: Write>(&mut self, command: ShellCommand, out: &mut W) -> Result<bool> {
        match command {
            ShellCommand::Empty => {}
            ShellCommand::Help => writeln!(out, "{}", HELP)?,
            ShellCommand::View => {
                let catalog = self.session.catalog().await?;
                writeln!(out, "{}", report::render_catalog(catalog))?;
                writeln!(out, "{}", report::render_packages(self.session.registry()))?;
                let audit = self.session.audit().await?;
                writeln!(out, "{}", report::render_audit(catalog, &audit))?;
            }
            ShellCommand::Catalog => {
                let catalog = self.session.catalog().await?;
                writeln!(out, "{}", report::render_catalog(catalog))?;
            }
            ShellCommand::Packages => {
                writeln!(out, "{}", report::render_packages(self.session.registry()))?;
            }
            ShellCommand::Audit => {
                let audit = self.session.audit().await?;
                let catalog = self.session.catalog().await?;
                writeln!(out, "{}", report::render_audit(catalog, &audit))?;
            }
            ShellCommand::Register {
                name,
                height,
                width,
                depth,
            } => {
                let package = self.session.register_package(&name, height, width, depth)?;
                writeln!(out, "{}", report::render_registered(package))?;
                writeln!(out, "{}", report::render_packages(self.session.registry()))?;
            }
            ShellCommand::Recommend { code, quantity } => {
                let recommendation = self.session.recommend(&code, quantity).await?;
                writeln!(out, "{}", report::render_recommendation(&recommendation))?;
            }
            ShellCommand::Quit => return Ok(false),
        }
        Ok(true)
    }
}
