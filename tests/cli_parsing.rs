//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use bluecarbon::cli::{Cli, Commands};

#[test]
fn test_verify_with_deadline() {
    let cli = Cli::try_parse_from([
        "bluecarbon",
        "verify",
        "mangrove-01",
        "--deadline-secs",
        "30",
    ])
    .unwrap();

    match cli.command {
        Commands::Verify(args) => {
            assert_eq!(args.project_id, "mangrove-01");
            assert_eq!(args.deadline_secs, Some(30));
        }
        other => panic!("unexpected command: {other:?}"),
    }
    assert!(!cli.json);
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "bluecarbon",
        "history",
        "kelp-7",
        "--json",
        "--config",
        "custom.yaml",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
    match cli.command {
        Commands::History(args) => {
            assert_eq!(args.project_id, "kelp-7");
            assert_eq!(args.limit, 20);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_init_defaults() {
    let cli = Cli::try_parse_from(["bluecarbon", "init"]).unwrap();
    match cli.command {
        Commands::Init(args) => {
            assert!(!args.force);
            assert_eq!(args.path, PathBuf::from("."));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_import_requires_file() {
    assert!(Cli::try_parse_from(["bluecarbon", "import"]).is_err());

    let cli = Cli::try_parse_from(["bluecarbon", "import", "projects.json"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Import(ref args) if args.file == PathBuf::from("projects.json")
    ));
}

#[test]
fn test_verify_requires_project() {
    assert!(Cli::try_parse_from(["bluecarbon", "verify"]).is_err());
}

#[test]
fn test_projects_listing() {
    let cli = Cli::try_parse_from(["bluecarbon", "projects", "--json"]).unwrap();
    assert!(matches!(cli.command, Commands::Projects(_)));
    assert!(cli.json);
}
