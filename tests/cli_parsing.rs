use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use taskrank::cli::{Cli, Commands};

#[test]
fn test_parse_analyze_defaults() {
    let cli = Cli::try_parse_from(["taskrank", "analyze"]).unwrap();

    assert!(!cli.json);
    assert!(cli.config.is_none());
    match cli.command {
        Commands::Analyze(args) => {
            assert!(args.file.is_none());
            assert!(args.strategy.is_none());
            assert!(args.today.is_none());
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_analyze_with_options() {
    let cli = Cli::try_parse_from([
        "taskrank",
        "--json",
        "analyze",
        "tasks.json",
        "--strategy",
        "deadline_driven",
        "--today",
        "2025-03-10",
    ])
    .unwrap();

    assert!(cli.json);
    match cli.command {
        Commands::Analyze(args) => {
            assert_eq!(args.file, Some(PathBuf::from("tasks.json")));
            assert_eq!(args.strategy.as_deref(), Some("deadline_driven"));
            assert_eq!(args.today, NaiveDate::from_ymd_opt(2025, 3, 10));
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_rejects_bad_today() {
    assert!(Cli::try_parse_from(["taskrank", "analyze", "--today", "10/03/2025"]).is_err());
}

#[test]
fn test_parse_suggest_limit() {
    let cli = Cli::try_parse_from(["taskrank", "suggest", "-", "--limit", "5", "--json"]).unwrap();

    assert!(cli.json, "--json is global");
    match cli.command {
        Commands::Suggest(args) => {
            assert_eq!(args.file, Some(PathBuf::from("-")));
            assert_eq!(args.limit, Some(5));
        }
        _ => panic!("Wrong top-level command"),
    }

    assert!(Cli::try_parse_from(["taskrank", "suggest", "--limit", "0"]).is_err());
}

#[test]
fn test_parse_cycles() {
    let cli = Cli::try_parse_from(["taskrank", "cycles", "batch.json"]).unwrap();
    match cli.command {
        Commands::Cycles(args) => assert_eq!(args.file, Some(PathBuf::from("batch.json"))),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_serve_with_config() {
    let cli = Cli::try_parse_from([
        "taskrank",
        "--config",
        "custom.yaml",
        "serve",
        "--host",
        "0.0.0.0",
        "--port",
        "9000",
    ])
    .unwrap();

    assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
    match cli.command {
        Commands::Serve(args) => {
            assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
            assert_eq!(args.port, Some(9000));
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_unknown_subcommand_fails() {
    assert!(Cli::try_parse_from(["taskrank", "prioritize"]).is_err());
}
