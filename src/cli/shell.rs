use std::{
    fmt,
    io::{self, BufRead},
};

use gagyebu_domain::{CategoryRegistry, EntryKind};
use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::cli::context::{CliMode, LoopControl, ShellContext};
use crate::cli::errors::{CliError, CommandError};
use crate::cli::output;
use crate::cli::registry::{Arg, Param};

/// Presence switches the shell to non-interactive line-by-line stdin processing.
pub const SCRIPT_ENV: &str = "GAGYEBU_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<LedgerHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(LedgerHelper::new(context)));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    output::info(format!(
        "가계부 `{}` ({}). Type `help` to list commands.",
        context.config.ledger_name, context.config.backend
    ));

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                if run_line(context, trimmed) == LoopControl::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => match context.confirm_exit() {
                Ok(true) => break,
                Ok(false) => {}
                Err(err) => context.report_error(err),
            },
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for line in io::stdin().lock().lines() {
        if !context.running || run_line(context, &line?) == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

/// Runs one line and reports its failure. A failed command never ends the session.
fn run_line(context: &mut ShellContext, line: &str) -> LoopControl {
    match handle_line(context, line) {
        Ok(control) => control,
        Err(err) => {
            context.report_error(err);
            LoopControl::Continue
        }
    }
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(&err.message);
            return Ok(LoopControl::Continue);
        }
    };
    let Some(raw) = tokens.first() else {
        return Ok(LoopControl::Continue);
    };

    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
    tracing::debug!(command = %command, args = args.len(), "dispatching");

    let control = context.dispatch(&command, raw, &args)?;
    if control == LoopControl::Exit {
        context.running = false;
    }
    Ok(control)
}

/// Completes command names, then each argument by its declared type: entry kinds,
/// the registry's categories for the kind already typed, and command names for `help`.
struct LedgerHelper {
    commands: Vec<(&'static str, &'static [Param])>,
    categories: CategoryRegistry,
}

impl LedgerHelper {
    fn new(context: &ShellContext) -> Self {
        Self {
            commands: context
                .registry
                .list()
                .iter()
                .map(|entry| (entry.name, entry.params))
                .collect(),
            categories: context.config.categories.clone(),
        }
    }

    fn params(&self, command: &str) -> Option<&'static [Param]> {
        let command = command.to_lowercase();
        self.commands
            .iter()
            .find(|(name, _)| *name == command)
            .map(|(_, params)| *params)
    }

    fn candidates(&self, words: &[String]) -> Vec<String> {
        let Some((command, args)) = words.split_first() else {
            return self.commands.iter().map(|(name, _)| name.to_string()).collect();
        };
        let Some(params) = self.params(command) else {
            return Vec::new();
        };
        let arg = match params.get(args.len()) {
            Some(param) => param.arg,
            None => return Vec::new(),
        };

        match arg {
            Arg::Kind => EntryKind::ALL.iter().map(|kind| kind.to_string()).collect(),
            Arg::Category => {
                let typed_kind = params
                    .iter()
                    .zip(args)
                    .find(|(param, _)| param.arg == Arg::Kind)
                    .and_then(|(_, value)| value.parse::<EntryKind>().ok());
                let kinds = match typed_kind {
                    Some(kind) => vec![kind],
                    None => EntryKind::ALL.to_vec(),
                };
                kinds
                    .into_iter()
                    .flat_map(|kind| self.categories.canonical(kind).to_vec())
                    .collect()
            }
            Arg::Command => self.commands.iter().map(|(name, _)| name.to_string()).collect(),
            Arg::Confirm => vec![Arg::Confirm.placeholder().to_string()],
            Arg::Amount | Arg::Date | Arg::Month | Arg::EntryId | Arg::Memo => Vec::new(),
        }
    }
}

impl Helper for LedgerHelper {}

impl Completer for LedgerHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (words, start, partial) = split_for_completion(&line[..pos]);
        let needle = partial.to_lowercase();
        let matches = self
            .candidates(&words)
            .into_iter()
            .filter(|candidate| candidate.to_lowercase().starts_with(&needle))
            .map(|candidate| Pair {
                replacement: quote_if_spaced(&candidate),
                display: candidate,
            })
            .collect();
        Ok((start, matches))
    }
}

impl Hinter for LedgerHelper {
    type Hint = String;
}

impl Highlighter for LedgerHelper {}

impl Validator for LedgerHelper {}

/// Splits the text before the cursor into finished words, the byte offset where the
/// word under the cursor starts, and that word's unquoted text so far.
fn split_for_completion(prefix: &str) -> (Vec<String>, usize, String) {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut start = prefix.len();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for (index, ch) in prefix.char_indices() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => current.push(ch),
            None if ch.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                if !in_word {
                    start = index;
                    in_word = true;
                }
                if ch == '"' || ch == '\'' {
                    quote = Some(ch);
                } else {
                    current.push(ch);
                }
            }
        }
    }

    if !in_word {
        start = prefix.len();
    }
    (words, start, current)
}

fn quote_if_spaced(candidate: &str) -> String {
    if candidate.contains(char::is_whitespace) {
        format!("\"{candidate}\"")
    } else {
        candidate.to_string()
    }
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
