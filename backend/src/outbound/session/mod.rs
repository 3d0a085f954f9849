//! Session store adapters.
//!
//! - [`FileSessionStore`]: JSON file in a capability directory, used by the
//!   operator console so a login survives between invocations.
//! - [`InMemorySessionStore`]: process-local slot for tests.

mod file;
mod memory;

pub use file::FileSessionStore;
pub use memory::InMemorySessionStore;
