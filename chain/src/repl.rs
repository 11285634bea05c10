//! REPL (Read-Eval-Print Loop) for the interactive session
//!
//! Plain lines go to the current target. Slash commands manage the session,
//! `@name text` addresses one target for a single message.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::app::AgentApp;

const HELP: &str = "\
Commands:
  /agents        List agents and chains
  /use <name>    Send subsequent messages to <name>
  /clear         Reset every agent's conversation
  /help          Show this help
  @<name> <text> Send one message to <name>
  exit | quit | STOP
";

/// A parsed line of input
#[derive(Debug, PartialEq)]
enum Input<'a> {
    Empty,
    Exit,
    Agents,
    Use(&'a str),
    Clear,
    Help,
    UnknownCommand(&'a str),
    Direct { target: &'a str, message: &'a str },
    Message(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    if matches!(line, "exit" | "quit" | "STOP") {
        return Input::Exit;
    }

    if let Some(command) = line.strip_prefix('/') {
        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map(|(n, a)| (n, a.trim()))
            .unwrap_or((command, ""));
        return match name {
            "agents" => Input::Agents,
            "use" if !arg.is_empty() => Input::Use(arg),
            "clear" => Input::Clear,
            "help" => Input::Help,
            _ => Input::UnknownCommand(line),
        };
    }

    if let Some(rest) = line.strip_prefix('@') {
        if let Some((target, message)) = rest.split_once(char::is_whitespace) {
            let message = message.trim();
            if !target.is_empty() && !message.is_empty() {
                return Input::Direct { target, message };
            }
        }
    }

    Input::Message(line)
}

/// Interactive session over any line source and sink
pub struct Repl<'a, R, W> {
    app: &'a mut AgentApp,
    input: R,
    output: W,
    target: String,
}

impl<'a, R: BufRead, W: Write> Repl<'a, R, W> {
    pub fn new(app: &'a mut AgentApp, target: impl Into<String>, input: R, output: W) -> Self {
        Self {
            app,
            input,
            output,
            target: target.into(),
        }
    }

    /// Current target
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Run until exit or end of input
    pub async fn run(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "{}. Sending to '{}'. Type /help for commands, 'quit' to exit.",
            self.app.name(),
            self.target
        )?;

        loop {
            write!(self.output, "{}> ", self.target)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }

            match parse_input(&line) {
                Input::Empty => continue,
                Input::Exit => break,
                Input::Agents => self.list_targets()?,
                Input::Use(name) => {
                    if self.app.has_target(name) {
                        self.target = name.to_string();
                        writeln!(self.output, "Now sending to '{}'", self.target)?;
                    } else {
                        writeln!(self.output, "Error: no agent or chain named '{}'", name)?;
                    }
                }
                Input::Clear => {
                    self.app.clear_histories();
                    writeln!(self.output, "Conversation history cleared")?;
                }
                Input::Help => write!(self.output, "{}", HELP)?,
                Input::UnknownCommand(command) => {
                    writeln!(self.output, "Unknown command: {} (try /help)", command)?
                }
                Input::Direct { target, message } => self.dispatch(target, message).await?,
                Input::Message(message) => {
                    let target = self.target.clone();
                    self.dispatch(&target, message).await?
                }
            }
        }

        Ok(())
    }

    async fn dispatch(&mut self, target: &str, message: &str) -> Result<()> {
        match self.app.send(target, message).await {
            Ok(response) => writeln!(self.output, "\n{}\n", response)?,
            Err(e) => {
                tracing::debug!("Send to '{}' failed: {:?}", target, e);
                writeln!(self.output, "Error: {:#}", e)?
            }
        }
        Ok(())
    }

    fn list_targets(&mut self) -> Result<()> {
        writeln!(self.output, "Agents:")?;
        for name in self.app.agent_names() {
            let marker = if *name == self.target { "*" } else { " " };
            writeln!(self.output, " {} {}", marker, name)?;
        }
        writeln!(self.output, "Chains:")?;
        for chain in self.app.chains() {
            let marker = if chain.name() == self.target { "*" } else { " " };
            writeln!(
                self.output,
                " {} {} ({})",
                marker,
                chain.name(),
                chain.sequence().join(" -> ")
            )?;
        }
        Ok(())
    }
}
