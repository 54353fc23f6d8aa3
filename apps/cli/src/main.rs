// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ArchForge CLI - run pushbuttons outside a BIM host.
//!
//! Documents are read from and written to JSON snapshots. Dialog answers
//! come from flags; see `archforge run --help`.
//!
//! # Commands
//!
//! - `archforge list` - Available pushbuttons
//! - `archforge run <button> --document <path> [--output <path>]` - Run one pushbutton

use std::fs;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use archforge_buttons::{find, launch, registry, Outcome, Session, Settings};
use archforge_model::Document;

mod cli;
mod config;

use cli::{Cli, Command, RunArgs};
use config::Config;

fn main() -> Result<()> {
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::List { json } => list(json),
        Command::Run(args) => run(&args, &config),
    }
}

fn list(json: bool) -> Result<()> {
    let buttons = registry();
    if json {
        let entries: Vec<_> = buttons
            .iter()
            .map(|b| serde_json::json!({ "id": b.id(), "title": b.title() }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for button in &buttons {
            println!("{:<28} {}", button.id(), button.title());
        }
    }
    Ok(())
}

fn run(args: &RunArgs, config: &Config) -> Result<()> {
    let button = find(&args.button)
        .with_context(|| format!("unknown pushbutton {:?}, see `archforge list`", args.button))?;

    let text = fs::read_to_string(&args.document)
        .with_context(|| format!("failed to read {}", args.document.display()))?;
    let mut doc = Document::from_json(&text)
        .with_context(|| format!("failed to load document {}", args.document.display()))?;

    tracing::info!(
        button = button.id(),
        document = %doc.title(),
        elements = doc.element_count(),
        views = doc.view_count(),
        "Loaded document"
    );

    let settings = Settings { highlight_color: config.highlight, ..Settings::default() };
    let mut prompt = args.prompt(config.assume_yes);
    let (outcome, selection) = {
        let mut session = Session::new(&mut doc, &mut prompt, &settings);
        let outcome = launch(button.as_ref(), &mut session);
        (outcome, session.selection)
    };

    for notice in prompt.notices() {
        println!("[{:?}] {}: {}", notice.level, notice.title, notice.message);
    }
    if !selection.is_empty() {
        let ids: Vec<String> = selection.iter().map(ToString::to_string).collect();
        println!("Selected: {}", ids.join(", "));
    }

    if let Outcome::Failed(message) = &outcome {
        bail!("{} failed: {}", button.id(), message);
    }

    match &args.output {
        Some(path) => {
            fs::write(path, doc.to_json_pretty()?).with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Saved document");
        }
        None if outcome.is_completed() => {
            tracing::warn!("No --output given, changes were not saved");
        }
        None => {}
    }
    Ok(())
}
