//! Bulk import of blocks, apartments, residents or vehicles.
//!
//! One run targets one record kind. The block and apartment collections are
//! read once before the first row and turned into code lookup maps; rows
//! created during the run are not added to those maps, so a row can only
//! reference parents that existed when the run started. Import blocks,
//! apartments, residents and vehicles as separate runs in that order.
//!
//! Rows are processed sequentially in input order. A failing row is
//! recorded and the run moves on to the next one.

mod parse;
mod row;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

pub use parse::{PayloadError, PayloadFormat, parse_csv, parse_json};
pub use row::ImportRow;

use super::ports::{
    ApartmentRepository, BlockRepository, RepositoryError, ResidentRepository, VehicleRepository,
};
use super::{
    Apartment, ApartmentCode, Block, BlockCode, BlockId, NewApartment, NewBlock,
    NewResident, NewVehicle, PlateNumber, ResidentId, VehicleType,
};

/// Floor count given to a block row without a usable `totalFloors`.
pub const DEFAULT_TOTAL_FLOORS: u32 = 20;
/// Floor given to an apartment row without a usable `floor`.
pub const DEFAULT_FLOOR: u32 = 1;

/// Record kind targeted by an import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKind {
    Blocks,
    Apartments,
    Residents,
    Vehicles,
}

impl ImportKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blocks => "blocks",
            Self::Apartments => "apartments",
            Self::Residents => "residents",
            Self::Vehicles => "vehicles",
        }
    }

    /// CSV header line expected for this kind.
    pub const fn csv_template(self) -> &'static str {
        match self {
            Self::Blocks => "code,name,totalFloors,description",
            Self::Apartments => "blockCode,roomNumber,floor,type,area",
            Self::Residents => "fullName,phone,email,apartmentCode,isOwner",
            Self::Vehicles => {
                "plateNumber,residentName,apartmentCode,vehicleType,brand,model,color"
            }
        }
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`ImportKind`] label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown import kind '{0}'")]
pub struct UnknownImportKind(pub String);

impl FromStr for ImportKind {
    type Err = UnknownImportKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "blocks" => Ok(Self::Blocks),
            "apartments" => Ok(Self::Apartments),
            "residents" => Ok(Self::Residents),
            "vehicles" => Ok(Self::Vehicles),
            other => Err(UnknownImportKind(other.to_owned())),
        }
    }
}

/// Outcome of an import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub success: usize,
    pub failed: usize,
    /// One message per failed row, prefixed with its 1-based position.
    pub errors: Vec<String>,
}

impl ImportReport {
    /// Report for a payload that could not be read at all.
    pub fn rejected(message: impl fmt::Display) -> Self {
        Self {
            success: 0,
            failed: 0,
            errors: vec![format!("Error: {message}")],
        }
    }
}

/// Errors that abort an import run before any row is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("failed to preload reference data: {0}")]
    Preload(#[from] RepositoryError),
}

#[derive(Debug, Error)]
enum RowError {
    #[error("Block {code} does not exist")]
    UnknownBlock { code: String },
    #[error("Apartment {code} does not exist")]
    UnknownApartment { code: String },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Code lookup maps captured once per run.
struct ReferenceMaps {
    blocks: HashMap<String, Block>,
    apartments: HashMap<String, Apartment>,
}

impl ReferenceMaps {
    fn block(&self, code: &str) -> Option<&Block> {
        self.blocks.get(&code.to_uppercase())
    }

    fn apartment(&self, code: &str) -> Option<&Apartment> {
        self.apartments.get(&ApartmentCode::lookup_key(code))
    }
}

/// Replays import rows as create operations.
#[derive(Clone)]
pub struct BulkImporter {
    blocks: Arc<dyn BlockRepository>,
    apartments: Arc<dyn ApartmentRepository>,
    residents: Arc<dyn ResidentRepository>,
    vehicles: Arc<dyn VehicleRepository>,
}

impl BulkImporter {
    pub fn new(
        blocks: Arc<dyn BlockRepository>,
        apartments: Arc<dyn ApartmentRepository>,
        residents: Arc<dyn ResidentRepository>,
        vehicles: Arc<dyn VehicleRepository>,
    ) -> Self {
        Self {
            blocks,
            apartments,
            residents,
            vehicles,
        }
    }

    /// Parse a file by name and import its rows.
    ///
    /// An unsupported extension or unreadable payload produces a report
    /// with zero counts and a single error instead of failing.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Preload`] when the reference maps cannot be
    /// loaded.
    pub async fn import_file(
        &self,
        kind: ImportKind,
        file_name: &str,
        contents: &str,
    ) -> Result<ImportReport, ImportError> {
        let rows = match PayloadFormat::from_file_name(file_name)
            .and_then(|format| format.parse(contents))
        {
            Ok(rows) => rows,
            Err(error) => {
                warn!(%kind, file_name, %error, "import payload rejected");
                return Ok(ImportReport::rejected(error));
            }
        };
        self.import(kind, rows).await
    }

    /// Import parsed rows in order.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Preload`] when the reference maps cannot be
    /// loaded. Row failures are recorded in the report instead.
    pub async fn import(
        &self,
        kind: ImportKind,
        rows: Vec<ImportRow>,
    ) -> Result<ImportReport, ImportError> {
        let maps = self.preload().await?;
        let mut report = ImportReport::default();

        for row in rows {
            match self.import_row(kind, &row, &maps).await {
                Ok(()) => report.success += 1,
                Err(error) => {
                    report.failed += 1;
                    let position = report.success + report.failed;
                    warn!(%kind, row = position, %error, "import row failed");
                    report.errors.push(format!("Row {position}: {error}"));
                }
            }
        }

        info!(
            %kind,
            success = report.success,
            failed = report.failed,
            "import finished"
        );
        Ok(report)
    }

    async fn preload(&self) -> Result<ReferenceMaps, RepositoryError> {
        let (blocks, apartments) = tokio::try_join!(self.blocks.list(), self.apartments.list())?;
        Ok(ReferenceMaps {
            blocks: blocks
                .into_iter()
                .map(|block| (block.code.as_ref().to_uppercase(), block))
                .collect(),
            apartments: apartments
                .into_iter()
                .map(|apartment| (ApartmentCode::lookup_key(apartment.code.as_ref()), apartment))
                .collect(),
        })
    }

    async fn import_row(
        &self,
        kind: ImportKind,
        row: &ImportRow,
        maps: &ReferenceMaps,
    ) -> Result<(), RowError> {
        match kind {
            ImportKind::Blocks => {
                self.blocks.create(block_from_row(row)).await?;
            }
            ImportKind::Apartments => {
                let code = row.text("blockCode");
                let block = maps
                    .block(&code)
                    .ok_or(RowError::UnknownBlock { code })?;
                self.apartments.create(apartment_from_row(row, block)).await?;
            }
            ImportKind::Residents => {
                let (apartment, block_id) = resolve_apartment(row, maps)?;
                self.residents
                    .create(resident_from_row(row, apartment, block_id))
                    .await?;
            }
            ImportKind::Vehicles => {
                let (apartment, block_id) = resolve_apartment(row, maps)?;
                self.vehicles
                    .create(vehicle_from_row(row, apartment, block_id))
                    .await?;
            }
        }
        Ok(())
    }
}

/// Resolve the row's apartment code and the id of that apartment's block.
///
/// The block id is empty when the apartment's cached block code no longer
/// matches any block.
fn resolve_apartment<'m>(
    row: &ImportRow,
    maps: &'m ReferenceMaps,
) -> Result<(&'m Apartment, BlockId), RowError> {
    let code = row.text("apartmentCode");
    let apartment = maps
        .apartment(&code)
        .ok_or(RowError::UnknownApartment { code })?;
    let block_id = maps
        .block(apartment.block_code.as_ref())
        .map_or_else(|| BlockId::new(""), |block| block.id.clone());
    Ok((apartment, block_id))
}

fn block_from_row(row: &ImportRow) -> NewBlock {
    NewBlock {
        code: BlockCode::new(row.text("code")),
        name: row.text("name"),
        total_floors: row.count_or("totalFloors", DEFAULT_TOTAL_FLOORS),
        description: row.optional_text("description"),
    }
}

fn apartment_from_row(row: &ImportRow, block: &Block) -> NewApartment {
    NewApartment {
        block_id: block.id.clone(),
        block_code: block.code.clone(),
        floor: row.count_or("floor", DEFAULT_FLOOR),
        room_number: row.text("roomNumber"),
        apartment_type: row.optional_text("type"),
        area: Some(row.number_or("area", 0.0)),
    }
}

fn resident_from_row(row: &ImportRow, apartment: &Apartment, block_id: BlockId) -> NewResident {
    NewResident {
        full_name: row.text("fullName"),
        phone: row.text("phone"),
        email: row.optional_text("email"),
        id_number: row.optional_text("idNumber"),
        apartment_id: apartment.id.clone(),
        apartment_code: apartment.code.clone(),
        block_id,
        block_code: apartment.block_code.cached().clone(),
        is_owner: row.is_true("isOwner"),
        notes: row.optional_text("notes"),
    }
}

fn vehicle_from_row(row: &ImportRow, apartment: &Apartment, block_id: BlockId) -> NewVehicle {
    NewVehicle {
        plate_number: PlateNumber::new(row.text("plateNumber")),
        resident_id: ResidentId::new(row.text("residentId")),
        resident_name: row.text("residentName"),
        apartment_id: apartment.id.clone(),
        apartment_code: apartment.code.clone(),
        block_id,
        block_code: apartment.block_code.cached().clone(),
        vehicle_type: VehicleType::from_label(&row.text("vehicleType")).unwrap_or_default(),
        brand: row.optional_text("brand"),
        model: row.optional_text("model"),
        color: row.optional_text("color"),
        parking_slot: row.optional_text("parkingSlot"),
        notes: row.optional_text("notes"),
        is_active: Some(row.is_not_false("isActive")),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for row mapping and preload failure handling.

    use super::*;
    use crate::domain::ApartmentId;
    use crate::domain::ports::{
        MockApartmentRepository, MockBlockRepository, MockResidentRepository,
        MockVehicleRepository,
    };
    use crate::test_support::registry::block;
    use rstest::rstest;

    fn importer(blocks: MockBlockRepository, apartments: MockApartmentRepository) -> BulkImporter {
        BulkImporter::new(
            Arc::new(blocks),
            Arc::new(apartments),
            Arc::new(MockResidentRepository::new()),
            Arc::new(MockVehicleRepository::new()),
        )
    }

    #[rstest]
    #[case("blocks", ImportKind::Blocks)]
    #[case("vehicles", ImportKind::Vehicles)]
    fn kinds_parse_from_labels(#[case] label: &str, #[case] expected: ImportKind) {
        assert_eq!(label.parse::<ImportKind>(), Ok(expected));
        assert_eq!(expected.to_string(), label);
    }

    #[rstest]
    fn unknown_kind_is_rejected() {
        assert_eq!(
            "plates".parse::<ImportKind>(),
            Err(UnknownImportKind("plates".to_owned()))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn preload_failure_aborts_run() {
        let mut blocks = MockBlockRepository::new();
        blocks
            .expect_list()
            .return_once(|| Err(RepositoryError::connection("offline")));
        blocks.expect_create().never();
        let mut apartments = MockApartmentRepository::new();
        apartments.expect_list().returning(|| Ok(Vec::new()));

        let rows = parse_csv("code,name\nA,Orchid");
        let result = importer(blocks, apartments)
            .import(ImportKind::Blocks, rows)
            .await;

        assert_eq!(
            result,
            Err(ImportError::Preload(RepositoryError::connection("offline")))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn unsupported_file_is_folded_into_report() {
        let mut blocks = MockBlockRepository::new();
        blocks.expect_list().never();
        let report = importer(blocks, MockApartmentRepository::new())
            .import_file(ImportKind::Blocks, "blocks.xlsx", "")
            .await
            .expect("report returned");

        assert_eq!(
            report,
            ImportReport {
                success: 0,
                failed: 0,
                errors: vec!["Error: only CSV or JSON files are supported".to_owned()],
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn block_rows_apply_defaults() {
        let mut blocks = MockBlockRepository::new();
        blocks.expect_list().returning(|| Ok(Vec::new()));
        blocks
            .expect_create()
            .withf(|block| {
                block.code.as_ref() == "D"
                    && block.total_floors == DEFAULT_TOTAL_FLOORS
                    && block.description.is_none()
            })
            .times(1)
            .return_once(|_| Ok(BlockId::new("b-d")));
        let mut apartments = MockApartmentRepository::new();
        apartments.expect_list().returning(|| Ok(Vec::new()));

        let rows = parse_csv("code,name,totalFloors,description\nd,Daisy,lots,");
        let report = importer(blocks, apartments)
            .import(ImportKind::Blocks, rows)
            .await
            .expect("run completes");

        assert_eq!(report.success, 1);
        assert!(report.errors.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn store_failure_on_one_row_does_not_stop_batch() {
        let mut blocks = MockBlockRepository::new();
        blocks.expect_list().returning(|| Ok(Vec::new()));
        let mut sequence = mockall::Sequence::new();
        blocks
            .expect_create()
            .times(1)
            .in_sequence(&mut sequence)
            .return_once(|_| Err(RepositoryError::query("write rejected")));
        blocks
            .expect_create()
            .times(1)
            .in_sequence(&mut sequence)
            .return_once(|_| Ok(BlockId::new("b-2")));
        let mut apartments = MockApartmentRepository::new();
        apartments.expect_list().returning(|| Ok(Vec::new()));

        let rows = parse_csv("code,name\nA,Orchid\nB,Lotus");
        let report = importer(blocks, apartments)
            .import(ImportKind::Blocks, rows)
            .await
            .expect("run completes");

        assert_eq!(report.success, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(
            report.errors,
            vec!["Row 1: repository query failed: write rejected".to_owned()]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn reference_maps_load_once_per_run() {
        let mut blocks = MockBlockRepository::new();
        blocks
            .expect_list()
            .times(1)
            .return_once(|| Ok(vec![block("b-a", "A")]));
        let mut apartments = MockApartmentRepository::new();
        apartments
            .expect_list()
            .times(1)
            .return_once(|| Ok(Vec::new()));
        apartments
            .expect_create()
            .withf(|apartment| apartment.block_id == BlockId::new("b-a"))
            .times(3)
            .returning(|_| Ok(ApartmentId::new("ap-new")));

        let rows = parse_csv("blockCode,floor,roomNumber\nA,1,101\na,1,102\nA,2,201");
        let report = importer(blocks, apartments)
            .import(ImportKind::Apartments, rows)
            .await
            .expect("run completes");

        assert_eq!(report.success, 3);
        assert!(report.errors.is_empty());
    }
}
