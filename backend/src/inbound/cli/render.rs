//! Plain-text rendering of console results.

use std::io::{self, Write};

use crate::domain::import::{ImportKind, ImportReport};
use crate::domain::{
    AdminUser, DemoSeedOutcome, PlateLookup, ReferenceFinding, RegistryStats, Resident,
    VehicleMatch,
};

pub(super) fn stats<W: Write>(out: &mut W, stats: &RegistryStats) -> io::Result<()> {
    writeln!(out, "Blocks:     {}", stats.blocks)?;
    writeln!(out, "Apartments: {}", stats.apartments)?;
    writeln!(out, "Residents:  {}", stats.residents)?;
    writeln!(out, "Vehicles:   {}", stats.vehicles)
}

pub(super) fn vehicle_matches<W: Write>(out: &mut W, matches: &[VehicleMatch]) -> io::Result<()> {
    if matches.is_empty() {
        return writeln!(out, "No vehicles found.");
    }
    for found in matches {
        writeln!(
            out,
            "{plate}  {kind}  {owner}  {apartment} (block {block})",
            plate = found.vehicle.plate_number,
            kind = found.vehicle.vehicle_type,
            owner = found.resident_name(),
            apartment = found.apartment_code(),
            block = found.block_code(),
        )?;
    }
    Ok(())
}

pub(super) fn plate_lookup<W: Write>(
    out: &mut W,
    plate: &str,
    lookup: &PlateLookup,
) -> io::Result<()> {
    let Some(vehicle) = lookup.vehicle.as_ref() else {
        return writeln!(out, "No active vehicle registered for '{plate}'.");
    };
    writeln!(out, "Plate:     {}", vehicle.plate_number)?;
    writeln!(out, "Type:      {}", vehicle.vehicle_type)?;
    let description = [&vehicle.brand, &vehicle.model, &vehicle.color]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    if !description.is_empty() {
        writeln!(out, "Vehicle:   {description}")?;
    }
    match lookup.resident.as_ref() {
        Some(resident) => writeln!(out, "Owner:     {} ({})", resident.full_name, resident.phone)?,
        None => writeln!(out, "Owner:     {} (record missing)", vehicle.resident_name)?,
    }
    match lookup.apartment.as_ref() {
        Some(apartment) => writeln!(out, "Apartment: {}", apartment.code)?,
        None => writeln!(out, "Apartment: {} (record missing)", vehicle.apartment_code)?,
    }
    match lookup.block.as_ref() {
        Some(block) => writeln!(out, "Block:     {} ({})", block.code, block.name)?,
        None => writeln!(out, "Block:     {} (record missing)", vehicle.block_code)?,
    }
    if let Some(slot) = vehicle.parking_slot.as_deref() {
        writeln!(out, "Parking:   {slot}")?;
    }
    Ok(())
}

pub(super) fn residents<W: Write>(out: &mut W, residents: &[Resident]) -> io::Result<()> {
    if residents.is_empty() {
        return writeln!(out, "No residents found.");
    }
    for resident in residents {
        let role = if resident.is_owner { "owner" } else { "tenant" };
        writeln!(
            out,
            "{name}  {phone}  {apartment}  {role}",
            name = resident.full_name,
            phone = resident.phone,
            apartment = resident.apartment_code,
        )?;
    }
    Ok(())
}

pub(super) fn import_report<W: Write>(
    out: &mut W,
    kind: ImportKind,
    report: &ImportReport,
) -> io::Result<()> {
    writeln!(
        out,
        "Imported {kind}: {} succeeded, {} failed.",
        report.success, report.failed
    )?;
    for error in &report.errors {
        writeln!(out, "  {error}")?;
    }
    Ok(())
}

pub(super) fn findings<W: Write>(out: &mut W, findings: &[ReferenceFinding]) -> io::Result<()> {
    if findings.is_empty() {
        return writeln!(out, "No reference problems found.");
    }
    for finding in findings {
        writeln!(out, "{finding}")?;
    }
    writeln!(out, "{} problem(s) found.", findings.len())
}

pub(super) fn seed_outcome<W: Write>(out: &mut W, outcome: &DemoSeedOutcome) -> io::Result<()> {
    writeln!(
        out,
        "Seeded {} blocks, {} apartments, {} residents, {} vehicles and {} admin accounts.",
        outcome.blocks, outcome.apartments, outcome.residents, outcome.vehicles, outcome.admins
    )
}

pub(super) fn signed_in<W: Write>(out: &mut W, user: &AdminUser) -> io::Result<()> {
    writeln!(out, "Signed in as {} ({}).", user.display_name, user.role)
}

pub(super) fn admin<W: Write>(out: &mut W, user: &AdminUser) -> io::Result<()> {
    writeln!(
        out,
        "{} <{}> signed in as {} ({})",
        user.display_name, user.email, user.username, user.role
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecordKind;
    use crate::test_support::registry::{apartment, block, resident, vehicle};
    use rstest::rstest;

    fn rendered(write: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        write(&mut buffer).expect("write to buffer");
        String::from_utf8(buffer).expect("utf-8 output")
    }

    #[rstest]
    fn stats_lists_every_collection() {
        let text = rendered(|out| {
            stats(
                out,
                &RegistryStats {
                    blocks: 3,
                    apartments: 60,
                    residents: 10,
                    vehicles: 10,
                },
            )
        });
        assert_eq!(
            text,
            "Blocks:     3\nApartments: 60\nResidents:  10\nVehicles:   10\n"
        );
    }

    #[rstest]
    fn lookup_marks_missing_parents() {
        let block_a = block("b1", "A");
        let unit = apartment("a1", &block_a, "101");
        let owner = resident("r1", "Nguyen Van An", "0901234567", &unit);
        let car = vehicle("v1", "51A-12345", &owner, &unit);
        let lookup = PlateLookup {
            vehicle: Some(car),
            resident: None,
            apartment: Some(unit),
            block: Some(block_a),
        };

        let text = rendered(|out| plate_lookup(out, "51A12345", &lookup));

        assert!(text.contains("Plate:     51A12345"));
        assert!(text.contains("Owner:     Nguyen Van An (record missing)"));
        assert!(text.contains("Apartment: A-101"));
        assert!(text.contains("Block:     A (Block A)"));
    }

    #[rstest]
    fn lookup_without_vehicle_reports_no_match() {
        let text = rendered(|out| plate_lookup(out, "99Z", &PlateLookup::default()));
        assert_eq!(text, "No active vehicle registered for '99Z'.\n");
    }

    #[rstest]
    fn import_report_lists_row_errors() {
        let report = ImportReport {
            success: 1,
            failed: 1,
            errors: vec!["Row 2: Block Z does not exist".to_owned()],
        };
        let text = rendered(|out| import_report(out, ImportKind::Apartments, &report));
        assert_eq!(
            text,
            "Imported apartments: 1 succeeded, 1 failed.\n  Row 2: Block Z does not exist\n"
        );
    }

    #[rstest]
    fn findings_summarise_count() {
        let finding = ReferenceFinding::Dangling {
            record: RecordKind::Vehicle,
            record_id: "v1".to_owned(),
            field: "residentId",
            target: RecordKind::Resident,
            target_id: "r9".to_owned(),
        };
        let text = rendered(|out| findings(out, &[finding]));
        assert!(text.ends_with("1 problem(s) found.\n"));
        assert_eq!(
            rendered(|out| findings(out, &[])),
            "No reference problems found.\n"
        );
    }
}
