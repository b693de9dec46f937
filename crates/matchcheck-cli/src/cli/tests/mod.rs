//! CLI parse tests.

use super::{Cli, CliCommand, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

#[test]
fn cli_parse_checksums_generate() {
    match parse(&["matchcheck", "checksums"]) {
        CliCommand::Checksums { check } => assert!(!check),
        _ => panic!("expected Checksums"),
    }
}

#[test]
fn cli_parse_checksums_check() {
    match parse(&["matchcheck", "checksums", "--check"]) {
        CliCommand::Checksums { check } => assert!(check),
        _ => panic!("expected Checksums with --check"),
    }
}

#[test]
fn cli_parse_validate_defaults_to_text() {
    match parse(&["matchcheck", "validate"]) {
        CliCommand::Validate { format } => assert_eq!(format, OutputFormat::Text),
        _ => panic!("expected Validate"),
    }
}

#[test]
fn cli_parse_validate_json() {
    match parse(&["matchcheck", "validate", "--format", "json"]) {
        CliCommand::Validate { format } => assert_eq!(format, OutputFormat::Json),
        _ => panic!("expected Validate with --format json"),
    }
}

#[test]
fn cli_parse_global_root_and_config() {
    let cli = Cli::try_parse_from([
        "matchcheck",
        "checksums",
        "--root",
        "/srv/football",
        "--config",
        "/etc/matchcheck.toml",
    ])
    .unwrap();
    assert_eq!(cli.root, Some(PathBuf::from("/srv/football")));
    assert_eq!(cli.config, Some(PathBuf::from("/etc/matchcheck.toml")));
    assert!(matches!(cli.command, CliCommand::Checksums { check: false }));
}

#[test]
fn cli_parse_completions() {
    match parse(&["matchcheck", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, clap_complete::Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_rejects_unknown_flag() {
    assert!(Cli::try_parse_from(["matchcheck", "validate", "--fix"]).is_err());
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
