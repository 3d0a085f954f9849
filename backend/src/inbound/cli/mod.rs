//! Operator console.
//!
//! A thin `clap` front end over the domain services. Parsing lives in
//! [`Cli`]; [`Console`] executes a parsed [`Command`] and writes plain text
//! to any writer so the binary and the tests share one code path.

mod render;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use clap::{Parser, Subcommand};
use mockable::Clock;
use thiserror::Error;
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::import::{BulkImporter, ImportError, ImportKind};
use crate::domain::ports::{RepositoryError, SessionStore};
use crate::domain::{
    AdminUser, AuthService, DemoDataSeeder, Error, ReferenceAudit, RegistryService,
};
use crate::example_data::{
    ExampleDataSettings, StartupSeedingError, load_demo_dataset, seed_demo_data_on_startup,
};
use crate::outbound::persistence::Repositories;

/// Message returned by commands that need a signed-in admin.
pub const SIGN_IN_REQUIRED_MESSAGE: &str = "Sign in first with `platesnap-admin login`.";

/// `platesnap-admin` command line.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "platesnap-admin",
    about = "Operator console for the PlateSnap condominium registry",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Console subcommands.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Write the demo dataset into an empty registry.
    Seed,
    /// Count blocks, apartments, residents and vehicles.
    Stats,
    /// Find vehicles by plate, owner name or owner phone.
    Search {
        /// Free-text query.
        query: String,
    },
    /// Resolve one active vehicle by plate number.
    Lookup {
        /// Plate number in any formatting.
        plate: String,
    },
    /// Find residents by name, phone or apartment code.
    Residents {
        /// Free-text query.
        query: String,
    },
    /// Import a CSV or JSON file of one record kind.
    Import {
        /// Record kind: blocks, apartments, residents or vehicles.
        kind: ImportKind,
        /// File to import; the extension selects the format.
        #[arg(value_name = "path")]
        file: PathBuf,
    },
    /// Print the CSV header expected for a record kind.
    Template {
        /// Record kind: blocks, apartments, residents or vehicles.
        kind: ImportKind,
    },
    /// Report dangling references and stale cached keys.
    Audit,
    /// Sign in and keep the session for 24 hours.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// End the current session.
    Logout,
    /// Show the signed-in admin.
    Whoami,
}

impl Command {
    const fn requires_session(&self) -> bool {
        !matches!(
            self,
            Self::Seed | Self::Template { .. } | Self::Login { .. } | Self::Logout | Self::Whoami
        )
    }
}

/// Errors surfaced by console commands.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// A domain service rejected the request.
    #[error("{}", .0.message())]
    Domain(#[from] Error),
    /// A repository failed.
    #[error("registry unavailable: {0}")]
    Repository(#[from] RepositoryError),
    /// An import run could not start.
    #[error(transparent)]
    Import(#[from] ImportError),
    /// Demo data could not be loaded or written.
    #[error(transparent)]
    Seeding(#[from] StartupSeedingError),
    /// An input file could not be read.
    #[error("failed to read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Domain services wired for one console invocation.
pub struct Console {
    auth: AuthService,
    registry: RegistryService,
    importer: BulkImporter,
    seeder: DemoDataSeeder,
    example_data: ExampleDataSettings,
}

impl Console {
    pub fn new(
        repositories: Repositories,
        sessions: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
        example_data: ExampleDataSettings,
    ) -> Self {
        let Repositories {
            admins,
            blocks,
            apartments,
            residents,
            vehicles,
        } = repositories;
        Self {
            auth: AuthService::new(Arc::clone(&admins), sessions, clock),
            registry: RegistryService::new(
                Arc::clone(&blocks),
                Arc::clone(&apartments),
                Arc::clone(&residents),
                Arc::clone(&vehicles),
            ),
            importer: BulkImporter::new(
                Arc::clone(&blocks),
                Arc::clone(&apartments),
                Arc::clone(&residents),
                Arc::clone(&vehicles),
            ),
            seeder: DemoDataSeeder::new(admins, blocks, apartments, residents, vehicles),
            example_data,
        }
    }

    /// Seed an empty registry when demo seeding is switched on.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Seeding`] when the dataset cannot be applied.
    pub async fn prepare(&self) -> Result<(), ConsoleError> {
        if let Some(outcome) = seed_demo_data_on_startup(&self.example_data, &self.seeder).await? {
            debug!(blocks = outcome.blocks, "startup seeding applied");
        }
        Ok(())
    }

    /// Execute one command, writing its output to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] when the command fails; nothing about the
    /// failure is written to `out`.
    pub async fn run<W: Write>(
        &self,
        command: Command,
        out: &mut W,
    ) -> Result<(), ConsoleError> {
        let state = self.auth.restore().await;
        if command.requires_session() && state.user().is_none() {
            return Err(Error::unauthorized(SIGN_IN_REQUIRED_MESSAGE).into());
        }

        match command {
            Command::Seed => {
                let dataset = load_demo_dataset(&self.example_data)?;
                let outcome = self
                    .seeder
                    .seed(&dataset)
                    .await
                    .map_err(StartupSeedingError::from)?;
                render::seed_outcome(out, &outcome)?;
            }
            Command::Stats => {
                let stats = self.registry.stats().await?;
                render::stats(out, &stats)?;
            }
            Command::Search { query } => {
                let snapshot = self.registry.load_snapshot().await?;
                render::vehicle_matches(out, &snapshot.search_vehicles(&query))?;
            }
            Command::Lookup { plate } => {
                let lookup = self.registry.lookup_plate(&plate).await?;
                render::plate_lookup(out, &plate, &lookup)?;
            }
            Command::Residents { query } => {
                let snapshot = self.registry.load_snapshot().await?;
                render::residents(out, &snapshot.search_residents(&query))?;
            }
            Command::Import { kind, file } => {
                let contents = read_input(&file)?;
                let file_name = file
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let report = self.importer.import_file(kind, &file_name, &contents).await?;
                render::import_report(out, kind, &report)?;
            }
            Command::Template { kind } => writeln!(out, "{}", kind.csv_template())?,
            Command::Audit => {
                let snapshot = self.registry.load_snapshot().await?;
                render::findings(out, &ReferenceAudit.run(&snapshot))?;
            }
            Command::Login { username, password } => {
                let password = Zeroizing::new(password);
                let user = self.auth.login(&username, &password).await?;
                render::signed_in(out, &user)?;
            }
            Command::Logout => {
                self.auth.logout().await?;
                writeln!(out, "Signed out.")?;
            }
            Command::Whoami => self.whoami(out).await?,
        }
        Ok(())
    }

    async fn whoami<W: Write>(&self, out: &mut W) -> Result<(), ConsoleError> {
        match self.auth.current_user() {
            Some(user) => render::admin(out, &user)?,
            None if self.auth.needs_setup().await? => {
                writeln!(out, "Not signed in. No admin accounts exist yet; run `seed`.")?;
            }
            None => writeln!(out, "Not signed in.")?,
        }
        Ok(())
    }

    /// The signed-in admin after the last command.
    pub fn current_user(&self) -> Option<AdminUser> {
        self.auth.current_user()
    }
}

fn read_input(path: &Path) -> Result<String, ConsoleError> {
    let read_error = |source: io::Error| ConsoleError::ReadInput {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "input path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    dir.read_to_string(Path::new(file_name)).map_err(read_error)
}
