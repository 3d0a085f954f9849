//! Operator console commands run against an in-memory registry.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};

use platesnap_admin::domain::ErrorCode;
use platesnap_admin::domain::import::ImportKind;
use platesnap_admin::example_data::ExampleDataSettings;
use platesnap_admin::inbound::cli::{Command, Console, ConsoleError};
use platesnap_admin::outbound::session::InMemorySessionStore;
use platesnap_admin::test_support::{FixtureClock, in_memory_repositories};
use rstest::{fixture, rstest};

fn console(seed_on_start: bool) -> Console {
    let clock = Arc::new(FixtureClock::default());
    Console::new(
        in_memory_repositories(clock.clone()),
        Arc::new(InMemorySessionStore::new()),
        clock,
        ExampleDataSettings {
            enabled: seed_on_start,
            registry_path: None,
        },
    )
}

async fn run(console: &Console, command: Command) -> Result<String, ConsoleError> {
    let mut out = Vec::new();
    console.run(command, &mut out).await?;
    Ok(String::from_utf8(out).expect("utf-8 output"))
}

async fn sign_in(console: &Console) {
    run(
        console,
        Command::Login {
            username: "admin".to_owned(),
            password: "admin123".to_owned(),
        },
    )
    .await
    .expect("demo admin signs in");
}

#[fixture]
async fn seeded_console() -> Console {
    let console = console(true);
    console.prepare().await.expect("startup seeding");
    console
}

#[rstest]
#[tokio::test]
async fn registry_commands_require_sign_in(#[future] seeded_console: Console) {
    let console = seeded_console.await;

    let error = run(&console, Command::Stats)
        .await
        .expect_err("anonymous stats refused");

    match error {
        ConsoleError::Domain(error) => assert_eq!(error.code(), ErrorCode::Unauthorized),
        other => panic!("expected unauthorized, got {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn signed_in_admin_sees_stats_and_lookups(#[future] seeded_console: Console) {
    let console = seeded_console.await;
    sign_in(&console).await;

    let stats = run(&console, Command::Stats).await.expect("stats");
    assert!(stats.contains("Apartments: 60"));

    let lookup = run(
        &console,
        Command::Lookup {
            plate: "51c-22222".to_owned(),
        },
    )
    .await
    .expect("lookup");
    assert!(lookup.contains("Apartment: B-101"), "got {lookup}");
    assert!(lookup.contains("Vehicle:   Mazda CX5 Red"), "got {lookup}");

    let whoami = run(&console, Command::Whoami).await.expect("whoami");
    assert_eq!(
        whoami,
        "Administrator <admin@platesnap.com> signed in as admin (superadmin)\n"
    );
}

#[rstest]
#[tokio::test]
async fn wrong_password_uses_the_generic_message(#[future] seeded_console: Console) {
    let console = seeded_console.await;

    let error = run(
        &console,
        Command::Login {
            username: "admin".to_owned(),
            password: "nope".to_owned(),
        },
    )
    .await
    .expect_err("login refused");

    assert_eq!(error.to_string(), "Invalid username or password.");
    assert!(console.current_user().is_none());
}

#[rstest]
#[tokio::test]
async fn logout_ends_the_session(#[future] seeded_console: Console) {
    let console = seeded_console.await;
    sign_in(&console).await;

    assert_eq!(
        run(&console, Command::Logout).await.expect("logout"),
        "Signed out.\n"
    );
    assert_eq!(
        run(&console, Command::Whoami).await.expect("whoami"),
        "Not signed in.\n"
    );
    assert!(run(&console, Command::Audit).await.is_err());
}

#[rstest]
#[tokio::test]
async fn empty_registry_prompts_for_seeding() {
    let console = console(false);

    let whoami = run(&console, Command::Whoami).await.expect("whoami");
    assert!(whoami.contains("No admin accounts exist yet"));

    let seeded = run(&console, Command::Seed).await.expect("seed");
    assert_eq!(
        seeded,
        "Seeded 3 blocks, 60 apartments, 10 residents, 10 vehicles and 2 admin accounts.\n"
    );
    assert!(run(&console, Command::Seed).await.is_err());
}

#[rstest]
#[tokio::test]
async fn import_reads_the_file_and_reports_rows(#[future] seeded_console: Console) {
    let console = seeded_console.await;
    sign_in(&console).await;
    let dir = tempfile::tempdir().expect("temp dir");
    Dir::open_ambient_dir(dir.path(), ambient_authority())
        .expect("open temp dir")
        .write(
            "apartments.csv",
            "blockCode,roomNumber,floor,type,area\nA,601,6,Studio,45\nQ,101,1,Studio,45\n",
        )
        .expect("write import file");
    let file = dir.path().join("apartments.csv");

    let report = run(
        &console,
        Command::Import {
            kind: ImportKind::Apartments,
            file,
        },
    )
    .await
    .expect("import");

    assert_eq!(
        report,
        "Imported apartments: 1 succeeded, 1 failed.\n  Row 2: Block Q does not exist\n"
    );
}

#[rstest]
#[tokio::test]
async fn audit_of_seeded_registry_is_clean(#[future] seeded_console: Console) {
    let console = seeded_console.await;
    sign_in(&console).await;

    let audit = run(&console, Command::Audit).await.expect("audit");

    assert_eq!(audit, "No reference problems found.\n");
}

#[rstest]
#[tokio::test]
async fn template_needs_no_session() {
    let output = run(
        &console(false),
        Command::Template {
            kind: ImportKind::Residents,
        },
    )
    .await
    .expect("template");

    assert_eq!(output, "fullName,phone,email,apartmentCode,isOwner\n");
}
