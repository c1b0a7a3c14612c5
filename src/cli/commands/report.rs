use gagyebu_core::{
    format::{date_heading, year_month_label},
    ChartService, EntryStore, HistoryService, SummaryService,
};
use gagyebu_domain::EntryKind;

use crate::cli::context::{parse_kind, ShellContext};
use crate::cli::output;
use crate::cli::registry::{Arg, CommandEntry, CommandResult, Param};
use crate::cli::render;

const DAY_PARAMS: &[Param] = &[Param::optional(Arg::Date)];
const MONTH_PARAMS: &[Param] = &[Param::optional(Arg::Month)];
const CHART_PARAMS: &[Param] = &[Param::optional(Arg::Kind), Param::optional(Arg::Month)];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "today",
            "Show income and expense for a day",
            DAY_PARAMS,
            cmd_today,
        ),
        CommandEntry::new(
            "month",
            "Show monthly totals and category breakdown",
            MONTH_PARAMS,
            cmd_month,
        ),
        CommandEntry::new(
            "chart",
            "Show category shares for one entry type",
            CHART_PARAMS,
            cmd_chart,
        ),
        CommandEntry::new(
            "history",
            "List a month's entries by date, newest first",
            MONTH_PARAMS,
            cmd_history,
        ),
        CommandEntry::new(
            "categories",
            "List registered categories and their colors",
            &[],
            cmd_categories,
        ),
    ]
}

fn cmd_today(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let date = context.resolve_date(args.first().copied())?;
    let entries = context.store.query_by_date(date)?;
    let totals = SummaryService::daily(date, &entries);

    output::section(date_heading(date));
    for line in render::daily_lines(&totals, &context.style) {
        output::info(line);
    }
    if entries.is_empty() {
        output::info(render::EMPTY_NOTICE);
    }
    for entry in &entries {
        output::info(format!("  {}", render::entry_row(entry, &context.style)));
    }
    Ok(())
}

fn cmd_month(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let year_month = context.resolve_month(args.first().copied())?;
    let entries = context.store.query_by_month(year_month)?;
    let summary = SummaryService::monthly(year_month, &entries);

    output::section(render::month_title(&summary));
    for line in render::month_lines(&summary, &context.style) {
        output::info(line);
    }
    if summary.is_empty() {
        output::info(render::EMPTY_NOTICE);
    }
    Ok(())
}

fn cmd_chart(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (kind, month_arg) = match args {
        [] => (EntryKind::Expense, None),
        [first, rest @ ..] => match parse_kind(first) {
            Ok(kind) => (kind, rest.first().copied()),
            Err(_) if rest.is_empty() => (EntryKind::Expense, Some(*first)),
            Err(err) => return Err(err),
        },
    };
    if args.len() > CHART_PARAMS.len() {
        return Err(context.usage_error("chart"));
    }
    let year_month = context.resolve_month(month_arg)?;
    let entries = context.store.query_by_month(year_month)?;
    let summary = SummaryService::monthly(year_month, &entries);
    let slices = ChartService::slices_for(&summary, kind, &context.config.categories);

    output::section(render::chart_title(&summary, kind));
    if slices.is_empty() {
        output::info(render::EMPTY_NOTICE);
        return Ok(());
    }
    for item in ChartService::legend(&slices, summary.total(kind)) {
        output::info(format!(
            "{} {}",
            output::swatch(&item.slice.color),
            render::legend_row(&item, &context.style)
        ));
    }
    Ok(())
}

fn cmd_history(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let year_month = context.resolve_month(args.first().copied())?;
    let entries = context.store.query_by_month(year_month)?;
    let groups = HistoryService::group(&entries);

    output::section(year_month_label(year_month));
    if groups.is_empty() {
        output::info(render::EMPTY_NOTICE);
        return Ok(());
    }
    for line in render::history_lines(&groups, &context.style) {
        output::info(line);
    }
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    for kind in EntryKind::ALL {
        output::section(render::kind_label(kind));
        for (name, color) in render::category_lines(&context.config.categories, kind) {
            output::info(format!("{} {name}  {color}", output::swatch(&color)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gagyebu_config::Config;
    use gagyebu_core::{FixedClock, MemoryEntryStore};

    use crate::cli::context::CliMode;

    fn context() -> ShellContext {
        ShellContext::with_parts(
            CliMode::Script,
            Config::default(),
            Box::new(MemoryEntryStore::new()),
            Box::new(FixedClock::at_date(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())),
        )
    }

    #[test]
    fn report_commands_accept_empty_ledgers() {
        let mut context = context();
        cmd_today(&mut context, &[]).unwrap();
        cmd_month(&mut context, &["-1"]).unwrap();
        cmd_chart(&mut context, &[]).unwrap();
        cmd_history(&mut context, &["2024-02"]).unwrap();
        cmd_categories(&mut context, &[]).unwrap();
    }

    #[test]
    fn chart_arguments_resolve_kind_then_month() {
        let mut context = context();
        cmd_chart(&mut context, &["income", "2024-12"]).unwrap();
        cmd_chart(&mut context, &["-1"]).unwrap();
        assert!(cmd_chart(&mut context, &["salary", "2024-12"]).is_err());
        assert!(cmd_chart(&mut context, &["expense", "2024-12", "extra"]).is_err());
        assert!(cmd_chart(&mut context, &["bogus"]).is_err());
    }
}
