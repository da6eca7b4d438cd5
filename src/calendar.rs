use chrono::{Datelike, NaiveDate};

pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One cell of a month matrix. Blank cells pad the first and last week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: Option<NaiveDate>,
}

impl DayCell {
    pub const BLANK: Self = Self { date: None };

    pub fn iso(&self) -> Option<String> {
        self.date.map(iso)
    }
}

pub fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Builds the Monday-first matrix for `month` of `year`, flattened row by row.
/// The length is always a multiple of 7; an invalid month yields no cells.
pub fn month_grid(year: i32, month: u32) -> Vec<DayCell> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let leading = first.weekday().num_days_from_monday() as usize;
    let mut cells = vec![DayCell::BLANK; leading];
    cells.extend(
        first
            .iter_days()
            .take_while(|date| date.month() == month)
            .map(|date| DayCell { date: Some(date) }),
    );
    while cells.len() % 7 != 0 {
        cells.push(DayCell::BLANK);
    }
    cells
}

/// The month currently shown by the date picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthView {
    first: NaiveDate,
}

impl MonthView {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn label(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    pub fn cells(&self) -> Vec<DayCell> {
        month_grid(self.year(), self.month())
    }

    pub fn previous(&mut self) {
        let (year, month) = match self.month() {
            1 => (self.year() - 1, 12),
            month => (self.year(), month - 1),
        };
        if let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) {
            self.first = first;
        }
    }

    pub fn next(&mut self) {
        let (year, month) = match self.month() {
            12 => (self.year() + 1, 1),
            month => (self.year(), month + 1),
        };
        if let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) {
            self.first = first;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{iso, month_grid, MonthView};
    use chrono::{Datelike, NaiveDate};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    #[test]
    fn grid_length_is_multiple_of_seven_with_monday_first_columns() {
        for year in [1999, 2000, 2024, 2026, 2100] {
            for month in 1..=12 {
                let cells = month_grid(year, month);
                assert_eq!(cells.len() % 7, 0, "{year}-{month}");
                for (index, cell) in cells.iter().enumerate() {
                    if let Some(day) = cell.date {
                        assert_eq!(
                            index % 7,
                            day.weekday().num_days_from_monday() as usize,
                            "{day}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn october_2026_starts_on_thursday() {
        let cells = month_grid(2026, 10);
        assert_eq!(cells.len(), 35);
        assert!(cells[..3].iter().all(|cell| cell.date.is_none()));
        assert_eq!(cells[3].date.map(|d| d.day()), Some(1));
        assert_eq!(cells[33].iso().as_deref(), Some("2026-10-31"));
        assert!(cells[34].date.is_none());
    }

    #[test]
    fn month_starting_monday_with_four_weeks_has_no_blanks() {
        let cells = month_grid(2021, 2);
        assert_eq!(cells.len(), 28);
        assert!(cells.iter().all(|cell| cell.date.is_some()));
    }

    #[test]
    fn leap_february_includes_twenty_ninth() {
        let days: Vec<u32> = month_grid(2024, 2)
            .iter()
            .filter_map(|cell| cell.date.map(|d| d.day()))
            .collect();
        assert_eq!(days.len(), 29);
        assert_eq!(days.last(), Some(&29));
    }

    #[test]
    fn invalid_month_yields_empty_grid() {
        assert!(month_grid(2026, 13).is_empty());
        assert!(month_grid(2026, 0).is_empty());
    }

    #[test]
    fn month_view_wraps_across_years() {
        let mut view = MonthView::containing(date(2026, 12, 17));
        view.next();
        assert_eq!((view.year(), view.month()), (2027, 1));
        view.previous();
        view.previous();
        assert_eq!((view.year(), view.month()), (2026, 11));
        assert_eq!(view.label(), "November 2026");
    }

    #[test]
    fn iso_pads_month_and_day() {
        assert_eq!(iso(date(2026, 3, 7)), "2026-03-07");
    }
}
