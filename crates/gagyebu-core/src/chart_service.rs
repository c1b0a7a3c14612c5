//! Chart slice allocation for the category breakdown view.

use gagyebu_domain::{
    cycle_color, CategoryRegistry, CategorySums, EntryKind, LegendItem, MonthlySummary, Slice,
};

/// Converts category sums into ordered, colored chart slices.
pub struct ChartService;

impl ChartService {
    /// Allocates slices for one entry kind.
    ///
    /// Canonical categories are colored by their registry position and sorted by value,
    /// largest first, with ties kept in registry order. Categories missing from the
    /// registry are appended afterwards in mapping order, each taking the palette slot
    /// matching the number of slices already emitted. Only positive sums produce slices.
    pub fn allocate_slices(
        sums: &CategorySums,
        canonical: &[String],
        palette: &[String],
    ) -> Vec<Slice> {
        let mut slices: Vec<Slice> = canonical
            .iter()
            .enumerate()
            .filter_map(|(position, category)| {
                let value = *sums.get(category.as_str())?;
                (value > 0).then(|| Slice {
                    label: category.clone(),
                    value,
                    color: cycle_color(palette, position).unwrap_or_default().to_string(),
                })
            })
            .collect();

        // stable: equal values stay in registry order
        slices.sort_by(|a, b| b.value.cmp(&a.value));

        for (category, value) in sums {
            if *value == 0 || canonical.iter().any(|name| name == category) {
                continue;
            }
            let color = cycle_color(palette, slices.len())
                .unwrap_or_default()
                .to_string();
            slices.push(Slice {
                label: category.clone(),
                value: *value,
                color,
            });
        }

        slices
    }

    /// Slices for `kind` using the summary's sums and the registry's canonical list.
    pub fn slices_for(
        summary: &MonthlySummary,
        kind: EntryKind,
        registry: &CategoryRegistry,
    ) -> Vec<Slice> {
        Self::allocate_slices(
            summary.by_category(kind),
            registry.canonical(kind),
            &registry.palette,
        )
    }

    /// Annotates slices with their share of `total`, rounded half-up to whole percent.
    pub fn legend(slices: &[Slice], total: u64) -> Vec<LegendItem> {
        slices
            .iter()
            .map(|slice| LegendItem {
                slice: slice.clone(),
                percent: rounded_percent(slice.value, total),
            })
            .collect()
    }
}

fn rounded_percent(value: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    let (value, total) = (value as u128, total as u128);
    ((value * 200 + total) / (total * 2)) as u32
}
