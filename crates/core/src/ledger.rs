//! Active-rental ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One active rental. References the car and customer by id; the
/// records themselves live in the fleet store and outlive the rental.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rental {
    /// Id of the rented car.
    pub car_id: String,
    /// Id of the renting customer.
    pub customer_id: String,
    /// Agreed rental length in whole days.
    pub days: u32,
    /// When the rental was opened. Not persisted; the ledger only
    /// exists while the rental is active.
    pub rented_at: DateTime<Utc>,
}

/// Insertion-ordered collection of active rentals.
///
/// The ledger does not own the records it references; it holds
/// transient associations keyed by car and customer id.
#[derive(Debug, Default)]
pub struct RentalLedger {
    rentals: Vec<Rental>,
}

impl RentalLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new active rental.
    pub fn open(&mut self, car_id: impl Into<String>, customer_id: impl Into<String>, days: u32) {
        self.rentals.push(Rental {
            car_id: car_id.into(),
            customer_id: customer_id.into(),
            days,
            rented_at: Utc::now(),
        });
    }

    /// Remove and return the earliest entry for the given car id.
    ///
    /// The per-car invariant means at most one entry should match, but
    /// when several do the earliest-inserted one wins.
    pub fn close(&mut self, car_id: &str) -> Option<Rental> {
        let index = self
            .rentals
            .iter()
            .position(|rental| rental.car_id == car_id)?;
        Some(self.rentals.remove(index))
    }

    /// Active rentals in insertion order. Restartable; each call
    /// iterates the ledger from the start.
    pub fn entries(&self) -> impl Iterator<Item = &Rental> {
        self.rentals.iter()
    }

    /// True when no rentals are active.
    pub fn is_empty(&self) -> bool {
        self.rentals.is_empty()
    }

    /// Number of active rentals.
    pub fn len(&self) -> usize {
        self.rentals.len()
    }

    /// True when an active rental references the given car id.
    pub fn references_car(&self, car_id: &str) -> bool {
        self.rentals.iter().any(|rental| rental.car_id == car_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_and_close_keep_insertion_order() {
        let mut ledger = RentalLedger::new();
        ledger.open("C001", "CUS1", 3);
        ledger.open("C002", "CUS2", 5);
        assert_eq!(ledger.len(), 2);

        let ids: Vec<&str> = ledger.entries().map(|r| r.car_id.as_str()).collect();
        assert_eq!(ids, ["C001", "C002"]);

        let closed = ledger.close("C001").unwrap();
        assert_eq!(closed.customer_id, "CUS1");
        assert_eq!(closed.days, 3);
        assert!(!ledger.references_car("C001"));
        assert!(ledger.references_car("C002"));
    }

    #[test]
    fn close_unknown_car_leaves_ledger_alone() {
        let mut ledger = RentalLedger::new();
        ledger.open("C001", "CUS1", 2);
        assert!(ledger.close("C009").is_none());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn close_picks_earliest_matching_entry() {
        // Should not occur under the one-rental-per-car invariant, but
        // the tie-break is defined anyway.
        let mut ledger = RentalLedger::new();
        ledger.open("C001", "CUS1", 1);
        ledger.open("C001", "CUS2", 9);
        let closed = ledger.close("C001").unwrap();
        assert_eq!(closed.customer_id, "CUS1");
        assert_eq!(ledger.len(), 1);
    }
}
