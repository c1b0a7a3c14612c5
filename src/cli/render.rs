//! Plain-text views over engine results. Callers decide how lines are styled.

use gagyebu_core::{
    format::{
        date_heading, format_amount, format_balance, format_signed, year_month_label, AmountStyle,
    },
    SummaryService,
};
use gagyebu_domain::{
    CategoryRegistry, DailyTotals, Entry, EntryKind, HistoryGroup, LegendItem, MonthlySummary,
};

pub const EMPTY_NOTICE: &str = "내역이 없습니다";

pub fn kind_label(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Income => "수입",
        EntryKind::Expense => "지출",
    }
}

pub fn daily_lines(totals: &DailyTotals, style: &AmountStyle) -> Vec<String> {
    vec![
        format!("{}  {}", kind_label(EntryKind::Income), format_amount(totals.income, style)),
        format!("{}  {}", kind_label(EntryKind::Expense), format_amount(totals.expense, style)),
    ]
}

/// One line per entry: id, category, signed amount and memo when present.
pub fn entry_row(entry: &Entry, style: &AmountStyle) -> String {
    let mut row = format!(
        "[{}] {}  {}",
        entry.id,
        entry.category,
        format_signed(entry.kind, entry.amount, style)
    );
    if !entry.memo.is_empty() {
        row.push_str("  · ");
        row.push_str(&entry.memo);
    }
    row
}

pub fn month_title(summary: &MonthlySummary) -> String {
    year_month_label(summary.year_month)
}

/// Totals block followed by per-kind category breakdowns, largest first.
pub fn month_lines(summary: &MonthlySummary, style: &AmountStyle) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{}  {}",
            kind_label(EntryKind::Income),
            format_amount(summary.income_total, style)
        ),
        format!(
            "{}  {}",
            kind_label(EntryKind::Expense),
            format_amount(summary.expense_total, style)
        ),
        format!("잔액  {}", format_balance(summary.balance, style)),
    ];
    for kind in EntryKind::ALL {
        let breakdown = SummaryService::breakdown(summary.by_category(kind));
        if breakdown.is_empty() {
            continue;
        }
        lines.push(format!("[{}]", kind_label(kind)));
        for (category, amount) in breakdown {
            lines.push(format!("  {category}  {}", format_amount(amount, style)));
        }
    }
    lines
}

pub fn chart_title(summary: &MonthlySummary, kind: EntryKind) -> String {
    format!("{} {} 비율", year_month_label(summary.year_month), kind_label(kind))
}

/// Legend row without the color glyph: `식비  50,000원  (62%)  #3f51b5`.
pub fn legend_row(item: &LegendItem, style: &AmountStyle) -> String {
    format!(
        "{}  {}  ({}%)  {}",
        item.slice.label,
        format_amount(item.slice.value, style),
        item.percent,
        item.slice.color
    )
}

pub fn history_heading(group: &HistoryGroup) -> String {
    date_heading(group.date)
}

pub fn history_lines(groups: &[HistoryGroup], style: &AmountStyle) -> Vec<String> {
    let mut lines = Vec::new();
    for group in groups {
        lines.push(history_heading(group));
        lines.extend(group.entries.iter().map(|entry| format!("  {}", entry_row(entry, style))));
    }
    lines
}

pub fn category_lines(registry: &CategoryRegistry, kind: EntryKind) -> Vec<(String, String)> {
    registry
        .canonical(kind)
        .iter()
        .enumerate()
        .map(|(position, name)| {
            let color = registry.color_at(position).unwrap_or_default().to_string();
            (name.clone(), color)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use gagyebu_core::{ChartService, HistoryService};
    use gagyebu_domain::EntryId;

    fn entry(
        id: &str,
        day: u32,
        kind: EntryKind,
        category: &str,
        amount: u64,
        memo: &str,
    ) -> Entry {
        Entry {
            id: EntryId::new(id),
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            kind,
            category: category.into(),
            amount,
            memo: memo.into(),
            created_at: Utc.timestamp_millis_opt(day as i64).unwrap(),
        }
    }

    fn sample() -> Vec<Entry> {
        vec![
            entry("a1", 5, EntryKind::Expense, "식비", 30_000, "장보기"),
            entry("a2", 5, EntryKind::Expense, "식비", 20_000, ""),
            entry("a3", 10, EntryKind::Income, "아빠 월급여", 500_000, ""),
        ]
    }

    #[test]
    fn month_view_lists_totals_and_breakdowns() {
        let summary = SummaryService::monthly("2025-01".parse().unwrap(), &sample());
        let lines = month_lines(&summary, &AmountStyle::default());
        assert_eq!(month_title(&summary), "2025년 1월");
        assert_eq!(
            lines,
            vec![
                "수입  500,000원",
                "지출  50,000원",
                "잔액  +450,000원",
                "[수입]",
                "  아빠 월급여  500,000원",
                "[지출]",
                "  식비  50,000원",
            ]
        );
    }

    #[test]
    fn deficit_month_shows_negative_balance() {
        let entries = vec![entry("x", 2, EntryKind::Expense, "세금", 1_200, "")];
        let summary = SummaryService::monthly("2025-01".parse().unwrap(), &entries);
        let lines = month_lines(&summary, &AmountStyle::default());
        assert_eq!(lines[2], "잔액  -1,200원");
    }

    #[test]
    fn legend_rows_carry_percent_and_color() {
        let registry = CategoryRegistry::default();
        let mut entries = sample();
        entries.push(entry("a4", 7, EntryKind::Expense, "보험", 50_000, ""));
        let summary = SummaryService::monthly("2025-01".parse().unwrap(), &entries);
        let slices = ChartService::slices_for(&summary, EntryKind::Expense, &registry);
        let legend = ChartService::legend(&slices, summary.expense_total);

        let rows: Vec<_> = legend
            .iter()
            .map(|item| legend_row(item, &AmountStyle::default()))
            .collect();
        assert_eq!(
            rows,
            vec!["식비  50,000원  (50%)  #3f51b5", "보험  50,000원  (50%)  #ff9800"]
        );
        assert_eq!(chart_title(&summary, EntryKind::Expense), "2025년 1월 지출 비율");
    }

    #[test]
    fn history_lines_group_by_day_with_ids() {
        let groups = HistoryService::group(&sample());
        let lines = history_lines(&groups, &AmountStyle::default());
        assert_eq!(
            lines,
            vec![
                "1월 10일 (금)",
                "  [a3] 아빠 월급여  +500,000원",
                "1월 5일 (일)",
                "  [a1] 식비  -30,000원  · 장보기",
                "  [a2] 식비  -20,000원",
            ]
        );
    }

    #[test]
    fn daily_lines_show_both_kinds() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let entries: Vec<_> = sample().into_iter().filter(|e| e.date == day).collect();
        let totals = SummaryService::daily(day, &entries);
        assert_eq!(
            daily_lines(&totals, &AmountStyle::default()),
            vec!["수입  0원", "지출  50,000원"]
        );
    }

    #[test]
    fn categories_pair_names_with_palette_colors() {
        let registry = CategoryRegistry::default();
        let rows = category_lines(&registry, EntryKind::Expense);
        assert_eq!(rows[0], ("식비".to_string(), "#3f51b5".to_string()));
        assert_eq!(rows.len(), 7);
    }
}
