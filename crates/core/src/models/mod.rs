//! Fleet and roster records.

use serde::{Deserialize, Serialize};

use crate::error::RentalError;

/// Rentals longer than this many days earn the flat discount.
pub const DISCOUNT_THRESHOLD_DAYS: u32 = 7;
/// Multiplier applied to long rentals (10% off).
pub const LONG_RENTAL_DISCOUNT: f64 = 0.9;

/// One car in the fleet together with its availability flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    /// Unique identifier (e.g. `C001`). Immutable after creation.
    pub id: String,
    /// Manufacturer name.
    pub brand: String,
    /// Model name.
    pub model: String,
    /// Base rate charged per rental day.
    pub base_price_per_day: f64,
    /// True while no active rental references this car.
    pub available: bool,
}

impl Car {
    /// Create a new, available car.
    pub fn new(
        id: impl Into<String>,
        brand: impl Into<String>,
        model: impl Into<String>,
        base_price_per_day: f64,
    ) -> Self {
        Self {
            id: id.into(),
            brand: brand.into(),
            model: model.into(),
            base_price_per_day,
            available: true,
        }
    }

    /// Mark the car as rented out. Callers check availability first;
    /// nothing is enforced here.
    pub fn rent(&mut self) {
        self.available = false;
    }

    /// Mark the car as back in the fleet, unconditionally.
    pub fn return_vehicle(&mut self) {
        self.available = true;
    }

    /// Total price for a rental of the given length. Rentals longer
    /// than [`DISCOUNT_THRESHOLD_DAYS`] get 10% off. Pure; duration
    /// validation happens at the service boundary.
    pub fn calculate_price(&self, rental_days: u32) -> f64 {
        let price = self.base_price_per_day * f64::from(rental_days);
        if rental_days > DISCOUNT_THRESHOLD_DAYS {
            price * LONG_RENTAL_DISCOUNT
        } else {
            price
        }
    }

    /// User-facing label combining brand and model.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    /// Encode as one line of the durable car store.
    pub fn to_line(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.id, self.brand, self.model, self.base_price_per_day, self.available
        )
    }

    /// Decode a line of the durable car store.
    ///
    /// A record persisted as unavailable is routed through [`Car::rent`]
    /// so a previously-rented car reloads as rented, not merely flagged.
    pub fn from_line(line: &str) -> Result<Self, RentalError> {
        let malformed = || RentalError::MalformedRecord {
            kind: "car",
            line: line.to_string(),
        };

        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() != 5 {
            return Err(malformed());
        }
        let rate: f64 = parts[3].parse().map_err(|_| malformed())?;

        let mut car = Car::new(parts[0], parts[1], parts[2], rate);
        if !parts[4].trim().eq_ignore_ascii_case("true") {
            car.rent();
        }
        Ok(car)
    }
}

/// One renter identity in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier (e.g. `CUS4`). Immutable after creation.
    pub id: String,
    /// Display name as entered at the desk.
    pub name: String,
}

impl Customer {
    /// Create a new customer record.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Encode as one line of the durable customer store.
    pub fn to_line(&self) -> String {
        format!("{},{}", self.id, self.name)
    }

    /// Decode a line of the durable customer store. Only the first
    /// comma separates fields, so names containing commas round-trip.
    pub fn from_line(line: &str) -> Result<Self, RentalError> {
        let mut parts = line.splitn(2, ',');
        match (parts.next(), parts.next()) {
            (Some(id), Some(name)) if !id.is_empty() => Ok(Customer::new(id, name)),
            _ => Err(RentalError::MalformedRecord {
                kind: "customer",
                line: line.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camry() -> Car {
        Car::new("C001", "Toyota", "Camry", 60.0)
    }

    #[test]
    fn no_discount_at_seven_days() {
        assert_eq!(camry().calculate_price(7), 60.0 * 7.0);
    }

    #[test]
    fn discount_applies_from_eight_days() {
        assert_eq!(camry().calculate_price(8), 60.0 * 8.0 * 0.9);
    }

    #[test]
    fn price_calculation_leaves_availability_alone() {
        let car = camry();
        let first = car.calculate_price(10);
        let second = car.calculate_price(10);
        assert_eq!(first, second);
        assert!(car.available);
    }

    #[test]
    fn car_line_round_trip_preserves_availability() -> Result<(), RentalError> {
        let mut car = camry();
        car.rent();
        let reloaded = Car::from_line(&car.to_line())?;
        assert_eq!(reloaded, car);
        assert!(!reloaded.available);
        Ok(())
    }

    #[test]
    fn car_decodes_available_record() -> Result<(), RentalError> {
        let car = Car::from_line("C002,Honda,Accord,70,true")?;
        assert_eq!(car.id, "C002");
        assert_eq!(car.display_name(), "Honda Accord");
        assert_eq!(car.base_price_per_day, 70.0);
        assert!(car.available);
        Ok(())
    }

    #[test]
    fn car_rejects_malformed_lines() {
        assert!(Car::from_line("C001,Toyota,Camry").is_err());
        assert!(Car::from_line("C001,Toyota,Camry,not-a-rate,true").is_err());
    }

    #[test]
    fn customer_line_round_trip() -> Result<(), RentalError> {
        let customer = Customer::new("CUS1", "Asha");
        assert_eq!(Customer::from_line(&customer.to_line())?, customer);
        Ok(())
    }

    #[test]
    fn customer_name_may_contain_comma() -> Result<(), RentalError> {
        let reloaded = Customer::from_line("CUS2,Riley, Jr.")?;
        assert_eq!(reloaded.name, "Riley, Jr.");
        Ok(())
    }

    #[test]
    fn customer_rejects_missing_name_field() {
        assert!(Customer::from_line("CUS3").is_err());
        assert!(Customer::from_line(",Nameless").is_err());
    }
}
