//! Flat-file fleet and roster store.
//!
//! Two line-oriented text files back the in-memory collections:
//! `cars.txt` (`id,brand,model,rate,available`) and `customers.txt`
//! (`id,name`). Saves overwrite the whole file and are not
//! crash-atomic; a failed save leaves the durable copy stale until the
//! next successful one.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::{
    error::RentalError,
    models::{Car, Customer},
};

/// File name of the durable car store inside the data directory.
pub const CARS_FILE: &str = "cars.txt";
/// File name of the durable customer store inside the data directory.
pub const CUSTOMERS_FILE: &str = "customers.txt";

/// Owns the canonical car and customer collections for the process
/// lifetime and persists them to the data directory.
pub struct FleetStore {
    cars: Vec<Car>,
    customers: Vec<Customer>,
    cars_path: PathBuf,
    customers_path: PathBuf,
}

impl FleetStore {
    /// Create an empty store rooted at the given data directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            cars: Vec::new(),
            customers: Vec::new(),
            cars_path: data_dir.join(CARS_FILE),
            customers_path: data_dir.join(CUSTOMERS_FILE),
        }
    }

    /// Read both stores from disk, replacing the in-memory collections.
    ///
    /// An absent or unreadable file is not an error: the collection
    /// starts empty and an informational notice is logged. Malformed
    /// lines are skipped with a warning.
    pub fn load(&mut self) {
        self.cars = read_records(&self.cars_path, "car", Car::from_line);
        self.customers = read_records(&self.customers_path, "customer", Customer::from_line);
    }

    /// Overwrite the durable car store with the current collection.
    pub fn save_cars(&self) -> Result<()> {
        write_records(&self.cars_path, self.cars.iter().map(Car::to_line))
    }

    /// Overwrite the durable customer store with the current collection.
    pub fn save_customers(&self) -> Result<()> {
        write_records(
            &self.customers_path,
            self.customers.iter().map(Customer::to_line),
        )
    }

    /// Persist both stores.
    pub fn save(&self) -> Result<()> {
        self.save_cars()?;
        self.save_customers()
    }

    /// Append a car to the fleet. Persistence is the caller's call.
    pub fn add_car(&mut self, car: Car) {
        self.cars.push(car);
    }

    /// Append a customer to the roster. Persistence is the caller's call.
    pub fn add_customer(&mut self, customer: Customer) {
        self.customers.push(customer);
    }

    /// All cars in insertion order.
    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    /// All customers in insertion order.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Cars currently available for rent, in fleet order.
    pub fn available_cars(&self) -> impl Iterator<Item = &Car> {
        self.cars.iter().filter(|car| car.available)
    }

    /// First available car whose id matches, ignoring case.
    pub fn find_available_car(&self, id: &str) -> Option<&Car> {
        self.cars
            .iter()
            .find(|car| car.available && car.id.eq_ignore_ascii_case(id))
    }

    /// First rented-out car whose id matches, ignoring case.
    pub fn find_rented_car(&self, id: &str) -> Option<&Car> {
        self.cars
            .iter()
            .find(|car| !car.available && car.id.eq_ignore_ascii_case(id))
    }

    /// Mutable access to the first car whose id matches, ignoring case.
    pub fn find_car_mut(&mut self, id: &str) -> Option<&mut Car> {
        self.cars
            .iter_mut()
            .find(|car| car.id.eq_ignore_ascii_case(id))
    }

    /// Look up a customer by exact id.
    pub fn customer_by_id(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|customer| customer.id == id)
    }

    /// First customer whose display name matches, ignoring case.
    pub fn customer_by_name(&self, name: &str) -> Option<&Customer> {
        self.customers
            .iter()
            .find(|customer| customer.name.eq_ignore_ascii_case(name))
    }
}

fn read_records<T>(
    path: &Path,
    kind: &str,
    parse: impl Fn(&str) -> Result<T, RentalError>,
) -> Vec<T> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            info!("No existing {kind} data at {} ({err}); starting fresh", path.display());
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for line in contents.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse(line) {
            Ok(record) => records.push(record),
            Err(err) => warn!("Skipping line in {}: {err}", path.display()),
        }
    }
    records
}

fn write_records(path: &Path, lines: impl Iterator<Item = String>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let mut contents = String::new();
    for line in lines {
        contents.push_str(&line);
        contents.push('\n');
    }
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
