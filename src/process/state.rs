//! Statewide aggregation.

use crate::types::{Grade, Level, Subgroup, WideRow};

use super::add_opt;

/// Sum all district rows into a single synthetic state-level row.
///
/// Missing values are ignored under summation (a suppressed district count
/// does not make the state count missing); a field stays missing only when no
/// district reported it at all. Returns `None` for empty input; callers must
/// handle a year with no district rows.
pub fn aggregate_state(district_rows: &[WideRow], end_year: i32) -> Option<WideRow> {
    if district_rows.is_empty() {
        return None;
    }

    let mut state = WideRow::new(end_year, Level::State);
    state.district_name = Some("Statewide".to_string());

    for row in district_rows {
        state.row_total = add_opt(state.row_total, row.row_total);
        for grade in Grade::ALL {
            let slot = state.grade_mut(grade);
            *slot = add_opt(*slot, row.grade(grade));
        }
        for subgroup in Subgroup::RACES.into_iter().chain(Subgroup::GENDERS) {
            let slot = state.demographic_mut(subgroup);
            *slot = add_opt(*slot, row.demographic(subgroup));
        }
    }
    Some(state)
}
