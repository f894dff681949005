//! Hover tooltip content and visibility.

use crate::ticks;
use heatgrid_core::{MonthIndex, Offset};
use serde::{Deserialize, Serialize};

/// Line separator inside the tooltip markup.
pub const LINE_BREAK: &str = "<br>";

/// What a tooltip says about one cell. `temperature` is the cell's absolute temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub year: i32,
    pub month: MonthIndex,
    pub temperature: f64,
}

impl TooltipContent {
    pub fn new(year: i32, month: MonthIndex, temperature: f64) -> Self {
        Self {
            year,
            month,
            temperature,
        }
    }

    pub fn lines(&self) -> [String; 3] {
        [
            format!("Year: {}", self.year),
            format!("Month: {}", self.month.name()),
            format!("Temp: {}\u{2103}", ticks::to_fixed(self.temperature, 2)),
        ]
    }

    /// `Year: 1753<br>Month: January<br>Temp: 2.56℃`
    pub fn html(&self) -> String {
        self.lines().join(LINE_BREAK)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum TooltipState {
    #[default]
    Hidden,
    Visible {
        x: f64,
        y: f64,
        html: String,
        year: i32,
    },
}

impl TooltipState {
    /// Shows the tooltip near `pointer`, replacing any previous content.
    pub fn on_pointer_enter(&mut self, content: &TooltipContent, pointer: (f64, f64), offset: Offset) {
        *self = TooltipState::Visible {
            x: pointer.0 + offset.x,
            y: pointer.1 + offset.y,
            html: content.html(),
            year: content.year,
        };
    }

    pub fn on_pointer_leave(&mut self) {
        *self = TooltipState::Hidden;
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, TooltipState::Visible { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn january() -> MonthIndex {
        MonthIndex::from_zero_based(0).unwrap()
    }

    #[test]
    fn html_matches_reference_observation() {
        let c = TooltipContent::new(1753, january(), 8.66 + -6.1);
        assert_eq!(c.html(), "Year: 1753<br>Month: January<br>Temp: 2.56\u{2103}");
    }

    #[test]
    fn temperature_rounds_like_to_fixed() {
        let c = TooltipContent::new(1753, january(), 8.66 + -6.535);
        assert_eq!(c.lines()[2], "Temp: 2.13\u{2103}");
        let c = TooltipContent::new(1753, january(), 8.66 + -6.035);
        assert_eq!(c.lines()[2], "Temp: 2.63\u{2103}");
    }

    #[test]
    fn enter_replaces_and_leave_hides() {
        let offset = Offset { x: 5.0, y: -28.0 };
        let mut state = TooltipState::default();
        assert!(!state.is_visible());

        state.on_pointer_enter(&TooltipContent::new(1753, january(), 2.0), (100.0, 100.0), offset);
        state.on_pointer_enter(
            &TooltipContent::new(1900, MonthIndex::from_zero_based(6).unwrap(), 9.123),
            (10.0, 40.0),
            offset,
        );
        assert_eq!(
            state,
            TooltipState::Visible {
                x: 15.0,
                y: 12.0,
                html: "Year: 1900<br>Month: July<br>Temp: 9.12\u{2103}".to_string(),
                year: 1900,
            }
        );

        state.on_pointer_leave();
        assert_eq!(state, TooltipState::Hidden);
    }
}
