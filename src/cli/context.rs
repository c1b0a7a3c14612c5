//! Shell state, command dispatch, and argument resolution shared by handlers.

use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Confirm};
use gagyebu_config::{default_base_dir, Config, ConfigManager, StoreBackend};
use gagyebu_core::{
    format::{parse_date, AmountStyle},
    Clock, EntryStore, MemoryEntryStore, SystemClock,
};
use gagyebu_domain::{EntryKind, YearMonth};
use gagyebu_storage_json::JsonEntryStore;
use strsim::levenshtein;

use crate::cli::commands;
use crate::cli::errors::{CliError, CommandError};
use crate::cli::output::{self, OutputPreferences};
use crate::cli::registry::{CommandEntry, CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config: Config,
    pub style: AmountStyle,
    pub store: Box<dyn EntryStore>,
    pub clock: Box<dyn Clock>,
    pub running: bool,
}

impl ShellContext {
    /// Loads configuration from the base directory and opens the configured store.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let manager = ConfigManager::with_base_dir(default_base_dir())?;
        let config = manager.load()?;
        let store: Box<dyn EntryStore> = match config.backend {
            StoreBackend::Json => {
                let data_dir = config.resolve_data_dir(manager.base_dir());
                Box::new(JsonEntryStore::open(&data_dir, &config.ledger_name)?)
            }
            StoreBackend::Memory => Box::new(MemoryEntryStore::new()),
        };
        tracing::info!(backend = %config.backend, ledger = %config.ledger_name, "shell starting");

        output::set_preferences(OutputPreferences {
            plain_output: !config.ui_color_enabled || mode == CliMode::Script,
        });

        Ok(Self::with_parts(mode, config, store, Box::new(SystemClock)))
    }

    pub fn with_parts(
        mode: CliMode,
        config: Config,
        store: Box<dyn EntryStore>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        let style = AmountStyle::new(config.grouping_separator, config.currency_suffix.clone());
        Self {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            config,
            style,
            store,
            clock,
            running: true,
        }
    }

    pub fn prompt(&self) -> String {
        format!("{} ⮞ ", self.config.ledger_name)
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn usage_error(&self, name: &str) -> CommandError {
        match self.registry.get(name) {
            Some(entry) => entry.invalid_usage(),
            None => CommandError::InvalidArguments(format!("usage: {name}")),
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        self.ask("종료할까요?", true)
    }

    /// Asks before a destructive change. Script mode never blocks on input.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        self.ask(prompt, false)
    }

    fn ask(&self, prompt: &str, default: bool) -> Result<bool, CommandError> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(CommandError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help <command>` for usage details.");
            }
            other => output::error(other),
        }
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub(crate) fn current_month(&self) -> YearMonth {
        YearMonth::from_date(self.today())
    }

    /// Resolves `YYYY-MM`, a signed month offset such as `-1`, or nothing
    /// (the current month).
    pub(crate) fn resolve_month(&self, arg: Option<&str>) -> Result<YearMonth, CommandError> {
        let Some(raw) = arg.map(str::trim).filter(|value| !value.is_empty()) else {
            return Ok(self.current_month());
        };
        if let Ok(year_month) = raw.parse::<YearMonth>() {
            return Ok(year_month);
        }
        raw.parse::<i32>()
            .map(|step| self.current_month().shift(step))
            .map_err(|_| {
                CommandError::InvalidArguments(format!(
                    "`{raw}` is neither YYYY-MM nor a month offset like -1"
                ))
            })
    }

    pub(crate) fn resolve_date(&self, arg: Option<&str>) -> Result<NaiveDate, CommandError> {
        match arg {
            None => Ok(self.today()),
            Some(raw) => {
                parse_date(raw).map_err(|err| CommandError::InvalidArguments(err.to_string()))
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = crate::cli::shell::parse_command_line(line)
            .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
        let Some(first) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let command = first.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, first, &args)
    }
}

pub(crate) fn parse_kind(raw: &str) -> Result<EntryKind, CommandError> {
    raw.parse::<EntryKind>().map_err(CommandError::InvalidArguments)
}
