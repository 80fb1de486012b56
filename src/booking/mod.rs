//! Booking portal domain: session, appointment search and window
//! evaluation over the types the portal speaks on the wire.

pub mod appointments;
pub mod session;
pub mod types;
pub mod window;

pub use types::{AuthToken, Credentials, SearchCriteria, SessionMeta, Slot};
pub use window::DateWindow;
