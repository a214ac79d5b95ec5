// Ubermap Event Handling
// Event records, resync filtering and the main loop

pub mod r#loop;
pub mod record;
pub mod resync;

pub use r#loop::{poll_timeout, EventLoop, EventSource};
pub use record::{InputRecord, TimeVal};
pub use resync::{Disposition, ResyncHandler};
