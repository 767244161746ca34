//! Tests for add and user.

use super::parse;
use crate::cli::{Cli, CliCommand, UserAction};
use clap::Parser;

#[test]
fn cli_parse_add() {
    match parse(&[
        "pinmark",
        "add",
        "--owner",
        "alice",
        "--title",
        "My Vacation Photo!",
        "--url",
        "https://example.com/pic.jpg",
    ]) {
        CliCommand::Add {
            owner,
            title,
            url,
            description,
            slug,
        } => {
            assert_eq!(owner, "alice");
            assert_eq!(title, "My Vacation Photo!");
            assert_eq!(url, "https://example.com/pic.jpg");
            assert_eq!(description, "");
            assert!(slug.is_none());
        }
        _ => panic!("expected Add"),
    }
}

#[test]
fn cli_parse_add_with_description_and_slug() {
    match parse(&[
        "pinmark",
        "add",
        "--owner",
        "alice",
        "--title",
        "Cat",
        "--url",
        "https://example.com/cat.png",
        "--description",
        "on a mat",
        "--slug",
        "my-cat",
    ]) {
        CliCommand::Add {
            description, slug, ..
        } => {
            assert_eq!(description, "on a mat");
            assert_eq!(slug.as_deref(), Some("my-cat"));
        }
        _ => panic!("expected Add"),
    }
}

#[test]
fn cli_add_requires_owner() {
    assert!(Cli::try_parse_from([
        "pinmark",
        "add",
        "--title",
        "Cat",
        "--url",
        "https://example.com/cat.png"
    ])
    .is_err());
}

#[test]
fn cli_parse_user_add() {
    match parse(&["pinmark", "user", "add", "bob", "--email", "bob@example.com"]) {
        CliCommand::User {
            action: UserAction::Add { username, email },
        } => {
            assert_eq!(username, "bob");
            assert_eq!(email.as_deref(), Some("bob@example.com"));
        }
        _ => panic!("expected User Add"),
    }
}

#[test]
fn cli_parse_user_remove() {
    match parse(&["pinmark", "user", "remove", "bob"]) {
        CliCommand::User {
            action: UserAction::Remove { username },
        } => assert_eq!(username, "bob"),
        _ => panic!("expected User Remove"),
    }
}
