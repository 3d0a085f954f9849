//! Error shared by every entity repository port.

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by entity repository adapters.
    pub enum RepositoryError {
        /// The document store could not be reached.
        Connection { message: String } => "repository connection failed: {message}",
        /// A read or write failed during execution.
        Query { message: String } => "repository query failed: {message}",
        /// A stored document does not have the expected shape.
        Decode { message: String } => "stored document could not be decoded: {message}",
        /// The targeted record does not exist.
        NotFound { collection: String, id: String } => "{collection} record {id} not found",
    }
}
