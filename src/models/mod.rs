//! Domain model types for availability tracking.

pub mod page;
pub mod recurrence;
pub mod slot;
pub mod user;


pub use page::{Page, PageRequest};
pub use recurrence::{IntervalUnit, RecurringSlot};
pub use slot::{Overlap, SlotId, StoredSlot, TimeSlot, UserId};
pub use user::User;
