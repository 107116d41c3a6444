//! Rental service: the composition root owning the store and ledger.

use tracing::{info, warn};

use crate::{
    config::AppConfig,
    error::RentalError,
    ledger::{Rental, RentalLedger},
    models::{Car, Customer},
    store::FleetStore,
};

/// Summary of a committed rental, for display at the desk.
#[derive(Debug, Clone, PartialEq)]
pub struct RentalReceipt {
    /// Canonical id of the rented car.
    pub car_id: String,
    /// Brand and model of the rented car.
    pub car_label: String,
    /// Id of the renting customer.
    pub customer_id: String,
    /// Display name of the renting customer.
    pub customer_name: String,
    /// Agreed rental length in whole days.
    pub days: u32,
    /// Total price including any long-rental discount.
    pub total_price: f64,
}

/// Result of returning a car.
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnOutcome {
    /// A matching ledger entry was closed and the car store persisted.
    Closed {
        /// The closed ledger entry.
        rental: Rental,
        /// Display name of the customer who held the rental.
        customer_name: String,
    },
    /// The car was marked available but no ledger entry referenced it;
    /// nothing was persisted.
    NotOnLedger,
}

/// One row of the active-rental listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalSummary {
    /// Brand and model of the rented car.
    pub car_label: String,
    /// Display name of the renting customer.
    pub customer_name: String,
    /// Agreed rental length in whole days.
    pub days: u32,
}

/// Owns all fleet, roster, and ledger state for the process and
/// exposes the rent/return/list operations to the presentation layer.
pub struct RentalService {
    store: FleetStore,
    ledger: RentalLedger,
}

impl RentalService {
    /// Build a service over the configured data directory and load the
    /// durable stores.
    pub fn bootstrap(config: &AppConfig) -> Self {
        let mut store = FleetStore::new(&config.data_dir);
        store.load();
        Self {
            store,
            ledger: RentalLedger::new(),
        }
    }

    /// Seed the fixed starter fleet when the loaded fleet is empty.
    /// In-memory only; the next save persists it.
    pub fn seed_default_fleet(&mut self) {
        if !self.store.cars().is_empty() {
            return;
        }
        self.store.add_car(Car::new("C001", "Toyota", "Camry", 60.0));
        self.store.add_car(Car::new("C002", "Honda", "Accord", 70.0));
        self.store
            .add_car(Car::new("C003", "Mahindra", "Thar", 150.0));
        info!("Seeded default fleet of {} cars", self.store.cars().len());
    }

    /// Reuse the first customer whose name matches (ignoring case), or
    /// mint a `CUS{n+1}` record and add it to the roster.
    pub fn resolve_customer(&mut self, name: &str) -> Customer {
        if let Some(existing) = self.store.customer_by_name(name) {
            return existing.clone();
        }
        let customer = Customer::new(format!("CUS{}", self.store.customers().len() + 1), name);
        self.store.add_customer(customer.clone());
        customer
    }

    /// Cars currently available for rent, in fleet order.
    pub fn available_cars(&self) -> impl Iterator<Item = &Car> {
        self.store.available_cars()
    }

    /// First available car matching the id, ignoring case.
    pub fn find_available_car(&self, id: &str) -> Option<&Car> {
        self.store.find_available_car(id)
    }

    /// First rented-out car matching the id, ignoring case.
    pub fn find_rented_car(&self, id: &str) -> Option<&Car> {
        self.store.find_rented_car(id)
    }

    /// Rent a car to a customer for the given number of days.
    ///
    /// Fails without mutating anything when the duration is zero, the
    /// car id is unknown, or the car is already rented. On success the
    /// car is flipped unavailable, a ledger entry is opened, and both
    /// stores are persisted.
    pub fn rent_car(
        &mut self,
        car_id: &str,
        customer_id: &str,
        days: u32,
    ) -> Result<RentalReceipt, RentalError> {
        if days == 0 {
            return Err(RentalError::InvalidDuration(days));
        }
        let car = self
            .store
            .find_car_mut(car_id)
            .ok_or_else(|| RentalError::UnknownCar(car_id.to_string()))?;
        if !car.available {
            return Err(RentalError::CarUnavailable(car.id.clone()));
        }

        car.rent();
        let canonical_id = car.id.clone();
        let car_label = car.display_name();
        let total_price = car.calculate_price(days);

        self.ledger.open(canonical_id.clone(), customer_id, days);
        let receipt = RentalReceipt {
            car_id: canonical_id,
            car_label,
            customer_id: customer_id.to_string(),
            customer_name: self.customer_name(customer_id),
            days,
            total_price,
        };

        if let Err(err) = self.store.save() {
            warn!("Failed to persist stores after rent: {err:#}");
        }
        Ok(receipt)
    }

    /// Return a car by id.
    ///
    /// The car is marked available unconditionally, matching the
    /// long-standing desk behavior; when no ledger entry references it
    /// the outcome is [`ReturnOutcome::NotOnLedger`] and nothing is
    /// persisted.
    pub fn return_car(&mut self, car_id: &str) -> Result<ReturnOutcome, RentalError> {
        let car = self
            .store
            .find_car_mut(car_id)
            .ok_or_else(|| RentalError::UnknownCar(car_id.to_string()))?;
        car.return_vehicle();
        let canonical_id = car.id.clone();

        match self.ledger.close(&canonical_id) {
            Some(rental) => {
                let customer_name = self.customer_name(&rental.customer_id);
                if let Err(err) = self.store.save_cars() {
                    warn!("Failed to persist car store after return: {err:#}");
                }
                Ok(ReturnOutcome::Closed {
                    rental,
                    customer_name,
                })
            }
            None => Ok(ReturnOutcome::NotOnLedger),
        }
    }

    /// Active rentals in ledger insertion order. Lazy and restartable;
    /// each call walks the ledger from the start.
    pub fn active_rentals(&self) -> impl Iterator<Item = RentalSummary> + '_ {
        self.ledger.entries().map(|rental| RentalSummary {
            car_label: self
                .store
                .cars()
                .iter()
                .find(|car| car.id == rental.car_id)
                .map_or_else(|| "?".to_string(), Car::display_name),
            customer_name: self.customer_name(&rental.customer_id),
            days: rental.days,
        })
    }

    /// True when at least one rental is active.
    pub fn has_active_rentals(&self) -> bool {
        !self.ledger.is_empty()
    }

    /// Final persistence pass, run once at exit.
    pub fn persist_all(&self) -> anyhow::Result<()> {
        self.store.save()
    }

    fn customer_name(&self, customer_id: &str) -> String {
        self.store
            .customer_by_id(customer_id)
            .map_or_else(|| "?".to_string(), |customer| customer.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    use crate::store::CARS_FILE;

    fn service_in(dir: &Path) -> RentalService {
        let config = AppConfig {
            data_dir: dir.to_path_buf(),
        };
        let mut service = RentalService::bootstrap(&config);
        service.seed_default_fleet();
        service
    }

    fn car_line(dir: &Path, car_id: &str) -> String {
        let contents = fs::read_to_string(dir.join(CARS_FILE)).expect("car store missing");
        contents
            .lines()
            .find(|line| line.starts_with(car_id))
            .expect("car record missing")
            .to_string()
    }

    #[test]
    fn rent_scenario_discounts_flips_and_persists() {
        let dir = tempdir().unwrap();
        let mut service = service_in(dir.path());

        let customer = service.resolve_customer("Asha");
        assert_eq!(customer.id, "CUS1");

        let receipt = service.rent_car("C001", &customer.id, 10).unwrap();
        assert_eq!(receipt.total_price, 540.0);
        assert_eq!(receipt.car_label, "Toyota Camry");
        assert_eq!(receipt.customer_name, "Asha");

        assert!(service.find_available_car("C001").is_none());
        assert_eq!(service.active_rentals().count(), 1);
        assert_eq!(car_line(dir.path(), "C001"), "C001,Toyota,Camry,60,false");
    }

    #[test]
    fn return_scenario_restores_availability_and_empties_ledger() {
        let dir = tempdir().unwrap();
        let mut service = service_in(dir.path());
        let customer = service.resolve_customer("Asha");
        service.rent_car("C001", &customer.id, 10).unwrap();

        let outcome = service.return_car("c001").unwrap();
        match outcome {
            ReturnOutcome::Closed { customer_name, .. } => assert_eq!(customer_name, "Asha"),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(service.find_available_car("C001").is_some());
        assert!(!service.has_active_rentals());
        assert_eq!(car_line(dir.path(), "C001"), "C001,Toyota,Camry,60,true");
    }

    #[test]
    fn second_rent_attempt_is_rejected() {
        let dir = tempdir().unwrap();
        let mut service = service_in(dir.path());
        let asha = service.resolve_customer("Asha");
        let noor = service.resolve_customer("Noor");

        service.rent_car("C001", &asha.id, 3).unwrap();
        let err = service.rent_car("C001", &noor.id, 2).unwrap_err();
        assert_eq!(err, RentalError::CarUnavailable("C001".to_string()));
        assert_eq!(service.active_rentals().count(), 1);
    }

    #[test]
    fn availability_tracks_ledger_references() {
        let dir = tempdir().unwrap();
        let mut service = service_in(dir.path());
        let customer = service.resolve_customer("Asha");
        service.rent_car("C002", &customer.id, 4).unwrap();

        for car in service.store.cars() {
            let referenced = service.ledger.references_car(&car.id);
            assert_eq!(car.available, !referenced, "invariant broken for {}", car.id);
        }
    }

    #[test]
    fn zero_day_rentals_are_rejected_before_any_mutation() {
        let dir = tempdir().unwrap();
        let mut service = service_in(dir.path());
        let customer = service.resolve_customer("Asha");

        let err = service.rent_car("C001", &customer.id, 0).unwrap_err();
        assert_eq!(err, RentalError::InvalidDuration(0));
        assert!(service.find_available_car("C001").is_some());
        assert!(!service.has_active_rentals());
    }

    #[test]
    fn unknown_car_is_reported_not_crashed() {
        let dir = tempdir().unwrap();
        let mut service = service_in(dir.path());
        let customer = service.resolve_customer("Asha");
        let err = service.rent_car("C999", &customer.id, 2).unwrap_err();
        assert_eq!(err, RentalError::UnknownCar("C999".to_string()));
    }

    #[test]
    fn customers_are_reused_case_insensitively() {
        let dir = tempdir().unwrap();
        let mut service = service_in(dir.path());

        let first = service.resolve_customer("Asha");
        let again = service.resolve_customer("ASHA");
        assert_eq!(first, again);

        let second = service.resolve_customer("Noor");
        assert_eq!(second.id, "CUS2");
    }

    #[test]
    fn return_without_ledger_entry_flips_flag_but_persists_nothing() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CARS_FILE),
            "C001,Toyota,Camry,60,false\n",
        )
        .unwrap();
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
        };
        let mut service = RentalService::bootstrap(&config);

        assert!(service.find_rented_car("C001").is_some());
        let outcome = service.return_car("C001").unwrap();
        assert_eq!(outcome, ReturnOutcome::NotOnLedger);
        assert!(service.find_available_car("C001").is_some());
        // The durable store still shows the stale flag.
        assert_eq!(car_line(dir.path(), "C001"), "C001,Toyota,Camry,60,false");
    }

    #[test]
    fn active_rental_listing_is_restartable_and_ordered() {
        let dir = tempdir().unwrap();
        let mut service = service_in(dir.path());
        let asha = service.resolve_customer("Asha");
        let noor = service.resolve_customer("Noor");
        service.rent_car("C001", &asha.id, 3).unwrap();
        service.rent_car("C003", &noor.id, 9).unwrap();

        let first: Vec<RentalSummary> = service.active_rentals().collect();
        let second: Vec<RentalSummary> = service.active_rentals().collect();
        assert_eq!(first, second);
        assert_eq!(first[0].car_label, "Toyota Camry");
        assert_eq!(first[1].customer_name, "Noor");
        assert_eq!(first[1].days, 9);
    }

    #[test]
    fn fleet_reloads_between_runs() {
        let dir = tempdir().unwrap();
        {
            let mut service = service_in(dir.path());
            let customer = service.resolve_customer("Asha");
            service.rent_car("C002", &customer.id, 2).unwrap();
        }

        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
        };
        let mut service = RentalService::bootstrap(&config);
        service.seed_default_fleet();
        // The loaded fleet is non-empty, so no second seeding happens.
        assert_eq!(service.store.cars().len(), 3);
        assert!(service.find_rented_car("C002").is_some());
        assert_eq!(service.store.customers().len(), 1);
    }
}
