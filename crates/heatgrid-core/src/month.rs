use crate::model::MonthIndex;
use chrono::Month;

/// Formats a month index the way `%B` does in the default locale.
pub fn long_month_name(month: MonthIndex) -> &'static str {
    // `MonthIndex` is always in 0..=11, which covers every `chrono::Month`.
    Month::try_from(month.get() + 1)
        .map(|m| m.name())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_index_order() {
        let names = MonthIndex::all().map(long_month_name).collect::<Vec<_>>();
        assert_eq!(names.len(), 12);
        assert_eq!(names.first().copied(), Some("January"));
        assert_eq!(names[5], "June");
        assert_eq!(names.last().copied(), Some("December"));
    }
}
