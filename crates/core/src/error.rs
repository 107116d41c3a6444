//! Domain errors surfaced by the rental service and record codecs.

use thiserror::Error;

/// Failures of rental-desk operations.
///
/// Every variant renders as the human-readable notice shown at the
/// prompt; callers that need to branch can match on the variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RentalError {
    /// No car in the fleet matches the given identifier.
    #[error("no car with id {0} in the fleet")]
    UnknownCar(String),
    /// The car exists but is already rented out.
    #[error("car {0} is not available for rent")]
    CarUnavailable(String),
    /// Rental duration must be at least one whole day.
    #[error("rental duration of {0} days is not valid")]
    InvalidDuration(u32),
    /// A persisted line did not match the expected record format.
    #[error("malformed {kind} record: {line:?}")]
    MalformedRecord {
        /// Record kind the line was parsed as (`car` or `customer`).
        kind: &'static str,
        /// Offending line as read from the store.
        line: String,
    },
}
