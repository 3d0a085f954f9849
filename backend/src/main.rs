//! `platesnap-admin` entry point: loads settings, opens the on-disk registry
//! and runs one console command.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::info;

use platesnap_admin::AppSettings;
use platesnap_admin::example_data::ExampleDataSettings;
use platesnap_admin::inbound::cli::{Cli, Console};
use platesnap_admin::outbound::persistence::Repositories;
use platesnap_admin::outbound::session::FileSessionStore;
use platesnap_admin::outbound::store::DirectoryDocumentStore;
use platesnap_admin::telemetry::init_tracing;

const APP_NAME: &str = "platesnap-admin";

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let settings = AppSettings::load_from_iter([OsString::from(APP_NAME)])
        .context("load console settings")?;
    let example_data = ExampleDataSettings::load_from_iter([OsString::from(APP_NAME)])
        .context("load example data settings")?;
    init_tracing(settings.json_logs);

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .context("create Tokio runtime")?;
    runtime.block_on(run(cli, &settings, example_data))
}

async fn run(cli: Cli, settings: &AppSettings, example_data: ExampleDataSettings) -> Result<()> {
    let data_dir = settings.data_dir();
    let store = DirectoryDocumentStore::open(&data_dir)
        .with_context(|| format!("open registry at {}", data_dir.display()))?;
    let session_file = settings.session_file();
    let sessions = FileSessionStore::open(&session_file)
        .with_context(|| format!("open session file {}", session_file.display()))?;
    info!(data_dir = %data_dir.display(), "registry opened");

    let console = Console::new(
        Repositories::over(Arc::new(store), Arc::new(DefaultClock)),
        Arc::new(sessions),
        Arc::new(DefaultClock),
        example_data,
    );
    console.prepare().await?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    console.run(cli.command, &mut out).await?;
    Ok(())
}
