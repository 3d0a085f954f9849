//! Read-only detection of reference drift.
//!
//! Children reference parents by id and cache the parents' natural keys.
//! Nothing keeps either in sync, so after a parent is edited or deleted the
//! cached key can go stale and the id can dangle. [`ReferenceAudit`] reports
//! both conditions against a snapshot. It never writes.

use std::fmt;

use serde::Serialize;

use super::RegistrySnapshot;

/// Kind of record a finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Block,
    Apartment,
    Resident,
    Vehicle,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Block => "block",
            Self::Apartment => "apartment",
            Self::Resident => "resident",
            Self::Vehicle => "vehicle",
        };
        f.write_str(label)
    }
}

/// One drift condition found by the audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReferenceFinding {
    /// A parent id does not resolve (deleted parent or unresolved import).
    #[serde(rename_all = "camelCase")]
    Dangling {
        record: RecordKind,
        record_id: String,
        field: &'static str,
        target: RecordKind,
        target_id: String,
    },
    /// A cached natural key differs from the live parent value.
    #[serde(rename_all = "camelCase")]
    Stale {
        record: RecordKind,
        record_id: String,
        field: &'static str,
        cached: String,
        live: String,
    },
}

impl fmt::Display for ReferenceFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dangling {
                record,
                record_id,
                field,
                target,
                target_id,
            } => write!(
                f,
                "{record} {record_id}: {field} points at missing {target} '{target_id}'"
            ),
            Self::Stale {
                record,
                record_id,
                field,
                cached,
                live,
            } => write!(
                f,
                "{record} {record_id}: {field} caches '{cached}' but parent has '{live}'"
            ),
        }
    }
}

/// Walks a snapshot and collects drift findings in collection order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceAudit;

impl ReferenceAudit {
    /// Audit apartments, then residents, then vehicles.
    pub fn run(self, snapshot: &RegistrySnapshot) -> Vec<ReferenceFinding> {
        let mut findings = Vec::new();
        let mut report = Recorder {
            findings: &mut findings,
        };

        for apartment in snapshot.apartments() {
            let id = apartment.id.as_ref();
            match snapshot.block(&apartment.block_id) {
                Some(block) => report.compare(
                    RecordKind::Apartment,
                    id,
                    "blockCode",
                    apartment.block_code.as_ref(),
                    block.code.as_ref(),
                ),
                None => report.dangling(
                    RecordKind::Apartment,
                    id,
                    "blockId",
                    RecordKind::Block,
                    apartment.block_id.as_ref(),
                ),
            }
        }

        for resident in snapshot.residents() {
            let id = resident.id.as_ref();
            match snapshot.apartment(&resident.apartment_id) {
                Some(apartment) => report.compare(
                    RecordKind::Resident,
                    id,
                    "apartmentCode",
                    resident.apartment_code.as_ref(),
                    apartment.code.as_ref(),
                ),
                None => report.dangling(
                    RecordKind::Resident,
                    id,
                    "apartmentId",
                    RecordKind::Apartment,
                    resident.apartment_id.as_ref(),
                ),
            }
            match snapshot.block(&resident.block_id) {
                Some(block) => report.compare(
                    RecordKind::Resident,
                    id,
                    "blockCode",
                    resident.block_code.as_ref(),
                    block.code.as_ref(),
                ),
                None => report.dangling(
                    RecordKind::Resident,
                    id,
                    "blockId",
                    RecordKind::Block,
                    resident.block_id.as_ref(),
                ),
            }
        }

        for vehicle in snapshot.vehicles() {
            let id = vehicle.id.as_ref();
            match snapshot.resident(&vehicle.resident_id) {
                Some(resident) => report.compare(
                    RecordKind::Vehicle,
                    id,
                    "residentName",
                    vehicle.resident_name.as_ref(),
                    &resident.full_name,
                ),
                None => report.dangling(
                    RecordKind::Vehicle,
                    id,
                    "residentId",
                    RecordKind::Resident,
                    vehicle.resident_id.as_ref(),
                ),
            }
            match snapshot.apartment(&vehicle.apartment_id) {
                Some(apartment) => report.compare(
                    RecordKind::Vehicle,
                    id,
                    "apartmentCode",
                    vehicle.apartment_code.as_ref(),
                    apartment.code.as_ref(),
                ),
                None => report.dangling(
                    RecordKind::Vehicle,
                    id,
                    "apartmentId",
                    RecordKind::Apartment,
                    vehicle.apartment_id.as_ref(),
                ),
            }
            match snapshot.block(&vehicle.block_id) {
                Some(block) => report.compare(
                    RecordKind::Vehicle,
                    id,
                    "blockCode",
                    vehicle.block_code.as_ref(),
                    block.code.as_ref(),
                ),
                None => report.dangling(
                    RecordKind::Vehicle,
                    id,
                    "blockId",
                    RecordKind::Block,
                    vehicle.block_id.as_ref(),
                ),
            }
        }

        findings
    }
}

struct Recorder<'a> {
    findings: &'a mut Vec<ReferenceFinding>,
}

impl Recorder<'_> {
    fn compare(
        &mut self,
        record: RecordKind,
        record_id: &str,
        field: &'static str,
        cached: &str,
        live: &str,
    ) {
        if cached != live {
            self.findings.push(ReferenceFinding::Stale {
                record,
                record_id: record_id.to_owned(),
                field,
                cached: cached.to_owned(),
                live: live.to_owned(),
            });
        }
    }

    fn dangling(
        &mut self,
        record: RecordKind,
        record_id: &str,
        field: &'static str,
        target: RecordKind,
        target_id: &str,
    ) {
        self.findings.push(ReferenceFinding::Dangling {
            record,
            record_id: record_id.to_owned(),
            field,
            target,
            target_id: target_id.to_owned(),
        });
    }
}

#[cfg(test)]
mod tests {
    //! Drift scenarios built from hand-assembled snapshots.

    use super::*;
    use crate::domain::{BlockCode, Denormalized};
    use crate::test_support::registry::{apartment, block, resident, vehicle};
    use rstest::rstest;

    #[rstest]
    fn consistent_snapshot_has_no_findings() {
        let block_a = block("b-a", "A");
        let a101 = apartment("ap-1", &block_a, "101");
        let an = resident("r-1", "An", "0901", &a101);
        let snapshot = RegistrySnapshot::new(
            vec![block_a],
            vec![a101.clone()],
            vec![an.clone()],
            vec![vehicle("v-1", "51A-12345", &an, &a101)],
        );

        assert!(ReferenceAudit.run(&snapshot).is_empty());
    }

    #[rstest]
    fn renamed_block_leaves_stale_codes() {
        let block_a = block("b-a", "A");
        let a101 = apartment("ap-1", &block_a, "101");
        let an = resident("r-1", "An", "0901", &a101);
        let mut renamed = block_a.clone();
        renamed.code = BlockCode::new("Z");
        let snapshot = RegistrySnapshot::new(vec![renamed], vec![a101], vec![an], Vec::new());

        let findings = ReferenceAudit.run(&snapshot);

        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|finding| matches!(
            finding,
            ReferenceFinding::Stale { field: "blockCode", live, .. } if live == "Z"
        )));
    }

    #[rstest]
    fn deleted_block_leaves_dangling_apartment() {
        let block_a = block("b-a", "A");
        let a101 = apartment("ap-1", &block_a, "101");
        let snapshot = RegistrySnapshot::new(Vec::new(), vec![a101], Vec::new(), Vec::new());

        let findings = ReferenceAudit.run(&snapshot);

        assert_eq!(
            findings,
            vec![ReferenceFinding::Dangling {
                record: RecordKind::Apartment,
                record_id: "ap-1".to_owned(),
                field: "blockId",
                target: RecordKind::Block,
                target_id: "b-a".to_owned(),
            }]
        );
        assert_eq!(
            findings[0].to_string(),
            "apartment ap-1: blockId points at missing block 'b-a'"
        );
    }

    #[rstest]
    fn renamed_resident_leaves_stale_vehicle_name() {
        let block_a = block("b-a", "A");
        let a101 = apartment("ap-1", &block_a, "101");
        let an = resident("r-1", "An", "0901", &a101);
        let mut plate = vehicle("v-1", "51A-12345", &an, &a101);
        plate.resident_name = Denormalized::captured("An (old)".to_owned());
        let snapshot = RegistrySnapshot::new(vec![block_a], vec![a101], vec![an], vec![plate]);

        let findings = ReferenceAudit.run(&snapshot);

        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].to_string(),
            "vehicle v-1: residentName caches 'An (old)' but parent has 'An'"
        );
    }
}
