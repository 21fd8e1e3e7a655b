pub mod event;
pub mod grid;
pub mod import;
pub mod month;
pub mod placement;

pub use event::CalendarEvent;
pub use grid::MonthGrid;
pub use import::ImportError;
pub use month::ReferenceMonth;
pub use placement::{DayCell, PlacedEvent};
