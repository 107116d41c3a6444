//! Line-oriented interactive menu over the rental service.
//!
//! Generic over the input/output handles so sessions can be scripted
//! in tests; `main` passes locked stdin/stdout.

use std::io::{BufRead, Write};

use anyhow::Result;
use rentdesk_core::{RentalService, ReturnOutcome};

/// Run the menu loop until the user exits or input ends.
pub fn run<R: BufRead, W: Write>(
    service: &mut RentalService,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    loop {
        writeln!(out)?;
        writeln!(out, "===== Car Rental System =====")?;
        writeln!(out, "1. Rent a Car")?;
        writeln!(out, "2. Return a Car")?;
        writeln!(out, "3. View Active Rentals")?;
        writeln!(out, "4. Exit")?;

        let Some(line) = prompt(input, out, "Enter your choice: ")? else {
            // EOF behaves like the exit choice.
            return exit(service, out);
        };
        let choice: u32 = match line.trim().parse() {
            Ok(choice) => choice,
            Err(_) => {
                writeln!(out, "Invalid input. Please enter a number.")?;
                continue;
            }
        };

        match choice {
            1 => rent_menu(service, input, out)?,
            2 => return_menu(service, input, out)?,
            3 => view_active_rentals(service, out)?,
            4 => return exit(service, out),
            _ => writeln!(out, "Invalid choice. Try again.")?,
        }
    }
}

fn rent_menu<R: BufRead, W: Write>(
    service: &mut RentalService,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let Some(name) = prompt(input, out, "Enter your name: ")? else {
        return Ok(());
    };
    let customer = service.resolve_customer(name.trim());

    writeln!(out, "\nAvailable Cars:")?;
    for car in service.available_cars() {
        writeln!(out, "{} - {}", car.id, car.display_name())?;
    }

    let Some(car_id) = prompt(input, out, "\nEnter the car ID you want to rent: ")? else {
        return Ok(());
    };
    let Some(car) = service.find_available_car(car_id.trim()) else {
        writeln!(out, "Invalid car ID or car not available.")?;
        return Ok(());
    };

    let Some(days_line) = prompt(input, out, "Enter rental days: ")? else {
        return Ok(());
    };
    let days: u32 = match days_line.trim().parse() {
        Ok(days) if days > 0 => days,
        _ => {
            writeln!(out, "Invalid number of days.")?;
            return Ok(());
        }
    };

    let total_price = car.calculate_price(days);
    let selected_id = car.id.clone();
    let car_label = car.display_name();

    writeln!(out, "\n== Rental Information ==\n")?;
    writeln!(out, "Customer ID: {}", customer.id)?;
    writeln!(out, "Customer Name: {}", customer.name)?;
    writeln!(out, "Car: {car_label}")?;
    writeln!(out, "Rental Days: {days}")?;
    writeln!(out, "Total Price: ${total_price:.2}")?;

    let Some(confirm) = prompt(input, out, "\nConfirm rental (Y/N): ")? else {
        return Ok(());
    };
    if confirm.trim().eq_ignore_ascii_case("y") {
        match service.rent_car(&selected_id, &customer.id, days) {
            Ok(_) => writeln!(out, "Car rented successfully!")?,
            Err(err) => writeln!(out, "{err}")?,
        }
    } else {
        writeln!(out, "Rental cancelled.")?;
    }
    Ok(())
}

fn return_menu<R: BufRead, W: Write>(
    service: &mut RentalService,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let Some(car_id) = prompt(input, out, "Enter car ID to return: ")? else {
        return Ok(());
    };
    let Some(car) = service.find_rented_car(car_id.trim()) else {
        writeln!(out, "Invalid car ID or car is not rented.")?;
        return Ok(());
    };
    let selected_id = car.id.clone();

    match service.return_car(&selected_id) {
        Ok(ReturnOutcome::Closed { customer_name, .. }) => {
            writeln!(out, "Car returned successfully by {customer_name}")?;
        }
        Ok(ReturnOutcome::NotOnLedger) => {
            writeln!(out, "Car rental record not found.")?;
        }
        Err(err) => writeln!(out, "{err}")?,
    }
    Ok(())
}

fn view_active_rentals<W: Write>(service: &RentalService, out: &mut W) -> Result<()> {
    if !service.has_active_rentals() {
        writeln!(out, "No active rentals.")?;
        return Ok(());
    }

    writeln!(out, "\n== Active Rentals ==\n")?;
    for rental in service.active_rentals() {
        writeln!(
            out,
            "Car: {} | Customer: {} | Days: {}",
            rental.car_label, rental.customer_name, rental.days
        )?;
    }
    Ok(())
}

fn exit<W: Write>(service: &RentalService, out: &mut W) -> Result<()> {
    if let Err(err) = service.persist_all() {
        writeln!(out, "Error saving rental data: {err:#}")?;
    }
    writeln!(out, "Thank you for using the Car Rental System!")?;
    Ok(())
}

/// Print a prompt and read one line. `None` means end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> Result<Option<String>> {
    write!(out, "{text}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
