use crate::cli::context::ShellContext;
use crate::cli::errors::CommandError;

pub type CommandResult = Result<(), CommandError>;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// What a positional argument holds. Drives usage text and tab completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg {
    Kind,
    Category,
    Amount,
    Date,
    Month,
    EntryId,
    Memo,
    Command,
    Confirm,
}

impl Arg {
    pub fn placeholder(self) -> &'static str {
        match self {
            Arg::Kind => "income|expense",
            Arg::Category => "category",
            Arg::Amount => "amount",
            Arg::Date => "YYYY-MM-DD",
            Arg::Month => "YYYY-MM|+N|-N",
            Arg::EntryId => "id",
            Arg::Memo => "memo",
            Arg::Command => "command",
            Arg::Confirm => "--yes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub arg: Arg,
    pub required: bool,
}

impl Param {
    pub const fn required(arg: Arg) -> Self {
        Self {
            arg,
            required: true,
        }
    }

    pub const fn optional(arg: Arg) -> Self {
        Self {
            arg,
            required: false,
        }
    }
}

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [Param],
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        params: &'static [Param],
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            params,
            handler,
        }
    }

    /// `add <income|expense> <category> <amount> [YYYY-MM-DD] [memo]` style synopsis.
    pub fn usage(&self) -> String {
        self.params
            .iter()
            .fold(self.name.to_string(), |mut usage, param| {
                let (open, close) = if param.required { ('<', '>') } else { ('[', ']') };
                usage.push(' ');
                usage.push(open);
                usage.push_str(param.arg.placeholder());
                usage.push(close);
                usage
            })
    }

    /// Parameter at a zero-based argument position. Trailing memo text spans every
    /// remaining position.
    pub fn param_at(&self, index: usize) -> Option<Param> {
        match self.params.get(index) {
            Some(param) => Some(*param),
            None => self
                .params
                .last()
                .filter(|param| param.arg == Arg::Memo)
                .copied(),
        }
    }

    pub fn invalid_usage(&self) -> CommandError {
        CommandError::InvalidArguments(format!("usage: {}", self.usage()))
    }
}

/// Commands in registration order. Help lists them in that order.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a command, replacing an earlier one with the same name in place.
    pub fn register(&mut self, entry: CommandEntry) {
        match self.commands.iter_mut().find(|known| known.name == entry.name) {
            Some(slot) => *slot = entry,
            None => self.commands.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.iter().find(|entry| entry.name == name)
    }

    pub fn list(&self) -> &[CommandEntry] {
        &self.commands
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|entry| entry.name)
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }
}
