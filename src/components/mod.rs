pub mod day_view;
pub mod import_prompt;
pub mod month_view;
pub mod notification;
pub mod picker;
pub mod status_bar;

pub use day_view::DayView;
pub use import_prompt::ImportPrompt;
pub use month_view::MonthView;
pub use notification::Notification;
pub use picker::Picker;
pub use status_bar::StatusBar;

use ratatui::layout::Rect;

/// A `width` x `height` rectangle centred in `area`, shrunk to fit.
pub fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width - w) / 2;
    let y = area.y + (area.height - h) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_area_is_centred() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(popup_area(area, 50, 10), Rect::new(25, 15, 50, 10));
    }

    #[test]
    fn test_popup_area_shrinks_to_fit() {
        let area = Rect::new(2, 3, 20, 5);
        assert_eq!(popup_area(area, 50, 10), Rect::new(2, 3, 20, 5));
    }
}
