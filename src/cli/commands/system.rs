use crate::cli::context::ShellContext;
use crate::cli::errors::CommandError;
use crate::cli::help;
use crate::cli::registry::{Arg, CommandEntry, CommandResult, Param};

const HELP_PARAMS: &[Param] = &[Param::optional(Arg::Command)];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("help", "Show available commands", HELP_PARAMS, cmd_help),
        CommandEntry::new("exit", "Exit the shell", &[], cmd_exit),
        CommandEntry::new("quit", "Exit the shell", &[], cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(command) = args.first().map(|name| name.to_lowercase()) {
        if let Some(command) = context.command(&command) {
            help::print_command(command);
        } else {
            context.suggest_command(args[0]);
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
