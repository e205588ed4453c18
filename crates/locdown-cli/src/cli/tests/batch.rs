//! Tests for fetch and check subcommands.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use locdown_core::ids::IdKind;
use std::path::Path;

#[test]
fn cli_parse_fetch() {
    match parse(&[
        "locdown",
        "fetch",
        "https://example.com/r/{id}",
        "10",
        "20-25",
        "random3",
    ]) {
        CliCommand::Fetch {
            template,
            ids,
            kind,
            jobs,
            dest,
        } => {
            assert_eq!(template, "https://example.com/r/{id}");
            assert_eq!(ids, vec!["10", "20-25", "random3"]);
            assert_eq!(kind, IdKind::Recording);
            assert!(jobs.is_none());
            assert!(dest.is_none());
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_options() {
    match parse(&[
        "locdown",
        "fetch",
        "https://example.com/a/{id}",
        "--kind",
        "artists",
        "--jobs",
        "4",
        "--dest",
        "/tmp/out",
        "7",
    ]) {
        CliCommand::Fetch {
            ids,
            kind,
            jobs,
            dest,
            ..
        } => {
            assert_eq!(ids, vec!["7"]);
            assert_eq!(kind, IdKind::Artist);
            assert_eq!(jobs, Some(4));
            assert_eq!(dest.as_deref(), Some(Path::new("/tmp/out")));
        }
        _ => panic!("expected Fetch with options"),
    }
}

#[test]
fn cli_parse_fetch_requires_ids() {
    let res = Cli::try_parse_from(["locdown", "fetch", "https://example.com/{id}"]);
    assert!(res.is_err());
}

#[test]
fn cli_parse_check() {
    match parse(&[
        "locdown",
        "check",
        "https://example.com/{id}",
        "1-3",
        "--jobs",
        "2",
    ]) {
        CliCommand::Check {
            template,
            ids,
            jobs,
        } => {
            assert_eq!(template, "https://example.com/{id}");
            assert_eq!(ids, vec!["1-3"]);
            assert_eq!(jobs, Some(2));
        }
        _ => panic!("expected Check"),
    }
}

#[test]
fn cli_parse_unknown_subcommand_fails() {
    assert!(Cli::try_parse_from(["locdown", "status"]).is_err());
}
