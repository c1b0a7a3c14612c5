use gagyebu_core::{format::entry_line, CoreError, EntryService, EntryStore};
use gagyebu_domain::{EntryDraft, EntryId};

use crate::cli::context::{parse_kind, ShellContext};
use crate::cli::errors::CommandError;
use crate::cli::output;
use crate::cli::registry::{Arg, CommandEntry, CommandResult, Param};

const ADD_PARAMS: &[Param] = &[
    Param::required(Arg::Kind),
    Param::required(Arg::Category),
    Param::required(Arg::Amount),
    Param::optional(Arg::Date),
    Param::optional(Arg::Memo),
];

const EDIT_PARAMS: &[Param] = &[
    Param::required(Arg::EntryId),
    Param::required(Arg::Kind),
    Param::required(Arg::Category),
    Param::required(Arg::Amount),
    Param::required(Arg::Date),
    Param::optional(Arg::Memo),
];

const DELETE_PARAMS: &[Param] = &[Param::required(Arg::EntryId), Param::optional(Arg::Confirm)];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an income or expense", ADD_PARAMS, cmd_add),
        CommandEntry::new("edit", "Rewrite an existing entry", EDIT_PARAMS, cmd_edit),
        CommandEntry::new("delete", "Remove an entry", DELETE_PARAMS, cmd_delete),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, category, amount, rest @ ..] = args else {
        return Err(context.usage_error("add"));
    };
    let kind = parse_kind(kind)?;
    let amount = parse_amount(amount)?;

    // a date-shaped token comes first; anything else is memo text
    let (date, memo) = match rest.split_first() {
        Some((first, tail)) if looks_like_date(first) => {
            (context.resolve_date(Some(*first))?, tail.join(" "))
        }
        _ => (context.today(), rest.join(" ")),
    };

    let draft = EntryDraft::new(date, kind, *category, amount).with_memo(memo);
    let entry = EntryService::create(context.store.as_ref(), context.clock.as_ref(), draft)?;
    output::success(format!(
        "저장했습니다: {} [{}]",
        entry_line(&entry, &context.style),
        entry.id
    ));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id, kind, category, amount, date, memo @ ..] = args else {
        return Err(context.usage_error("edit"));
    };
    let draft = EntryDraft::new(
        context.resolve_date(Some(*date))?,
        parse_kind(kind)?,
        *category,
        parse_amount(amount)?,
    )
    .with_memo(memo.join(" "));

    let entry = EntryService::update(context.store.as_ref(), &EntryId::new(*id), draft)?;
    output::success(format!("수정했습니다: {}", entry_line(&entry, &context.style)));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mut id = None;
    let mut assume_yes = false;
    for arg in args {
        match *arg {
            "--yes" | "-y" => assume_yes = true,
            value if id.is_none() => id = Some(EntryId::new(value)),
            _ => return Err(context.usage_error("delete")),
        }
    }
    let id = id.ok_or_else(|| context.usage_error("delete"))?;

    let entry = context
        .store
        .get(&id)?
        .ok_or_else(|| CommandError::Core(CoreError::EntryNotFound(id.clone())))?;
    let description = entry_line(&entry, &context.style);

    if !assume_yes && !context.confirm(&format!("삭제할까요? {description}"))? {
        output::info("삭제를 취소했습니다");
        return Ok(());
    }

    EntryService::delete(context.store.as_ref(), &id)?;
    output::success(format!("삭제했습니다: {description}"));
    Ok(())
}

/// Accepts grouped input such as `12,000` or `12,000원`. Sign is left to validation.
pub(crate) fn parse_amount(raw: &str) -> Result<i64, CommandError> {
    let cleaned: String = raw
        .trim()
        .trim_end_matches('원')
        .chars()
        .filter(|c| !matches!(c, ',' | '_'))
        .collect();
    cleaned.parse::<i64>().map_err(|_| {
        CommandError::InvalidArguments(format!("`{raw}` is not a whole amount"))
    })
}

/// `dddd-dd-dd`. Such a token is always read as a date, so an impossible calendar
/// day is an error rather than memo text.
fn looks_like_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gagyebu_config::Config;
    use gagyebu_core::{FixedClock, MemoryEntryStore};
    use gagyebu_domain::EntryKind;

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
    fn amounts_accept_grouping_and_suffix() {
        assert_eq!(parse_amount("12,000").unwrap(), 12_000);
        assert_eq!(parse_amount("12,000원").unwrap(), 12_000);
        assert_eq!(parse_amount("-5").unwrap(), -5);
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn add_defaults_date_and_joins_memo() {
        let mut context = context();
        cmd_add(&mut context, &["expense", "식비", "8,000", "동네", "마트"]).unwrap();

        let entries = context.store.all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date.to_string(), "2025-01-15");
        assert_eq!(entries[0].memo, "동네 마트");
        assert_eq!(entries[0].amount, 8_000);
    }

    #[test]
    fn add_takes_explicit_date() {
        let mut context = context();
        cmd_add(&mut context, &["수입", "엄마 월급여", "300000", "2024-12-25"]).unwrap();
        let entries = context.store.all().unwrap();
        assert_eq!(entries[0].date.to_string(), "2024-12-25");
        assert_eq!(entries[0].kind, EntryKind::Income);
        assert!(entries[0].memo.is_empty());
    }

    #[test]
    fn add_rejects_bad_input_without_writing() {
        let mut context = context();
        assert!(matches!(
            cmd_add(&mut context, &["expense", "식비"]),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(cmd_add(&mut context, &["expense", "식비", "0"]).is_err());
        assert!(cmd_add(&mut context, &["transfer", "식비", "10"]).is_err());
        assert!(cmd_add(&mut context, &["expense", "식비", "10", "2025-02-30"]).is_err());
        assert!(context.store.all().unwrap().is_empty());
    }

    #[test]
    fn dashed_memo_text_is_not_a_date() {
        let mut context = context();
        cmd_add(&mut context, &["expense", "기타", "500", "abcd-ef-gh"]).unwrap();
        cmd_add(&mut context, &["expense", "기타", "700", "2025-01-03", "ab12-34-56"]).unwrap();

        let entries = context.store.all().unwrap();
        assert_eq!(entries[0].date.to_string(), "2025-01-15");
        assert_eq!(entries[0].memo, "abcd-ef-gh");
        assert_eq!(entries[1].date.to_string(), "2025-01-03");
        assert_eq!(entries[1].memo, "ab12-34-56");

        assert!(looks_like_date("2025-01-03"));
        assert!(!looks_like_date("2025/01/03"));
        assert!(!looks_like_date("abcd-ef-gh"));
    }

    #[test]
    fn usage_errors_show_the_synopsis() {
        let context = context();
        match context.usage_error("edit") {
            CommandError::InvalidArguments(message) => assert_eq!(
                message,
                "usage: edit <id> <income|expense> <category> <amount> <YYYY-MM-DD> [memo]"
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn edit_and_delete_by_id() {
        let mut context = context();
        cmd_add(&mut context, &["expense", "식비", "1000"]).unwrap();
        let id = context.store.all().unwrap()[0].id.to_string();
        let id = id.as_str();

        cmd_edit(&mut context, &[id, "expense", "의료비", "2500", "2025-01-14", "약국"]).unwrap();
        let entries = context.store.all().unwrap();
        let edited = &entries[0];
        assert_eq!(edited.category, "의료비");
        assert_eq!(edited.memo, "약국");

        cmd_delete(&mut context, &[id, "--yes"]).unwrap();
        assert!(context.store.all().unwrap().is_empty());
        assert!(cmd_delete(&mut context, &[id]).is_err());
    }
}
