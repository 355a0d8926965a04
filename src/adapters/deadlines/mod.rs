//! Deadline calendar adapters.

mod in_memory_calendar;

pub use in_memory_calendar::{parse_deadline, InMemoryDeadlineCalendar};
