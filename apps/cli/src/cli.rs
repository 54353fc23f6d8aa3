// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command line arguments.

use std::path::PathBuf;

use archforge_buttons::{Answer, CaseTransform, GridOrder, GridSide, LevelChoice, PurgeTarget, ScriptedPrompt};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run ArchForge pushbuttons against a JSON document snapshot", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the available pushbuttons
    List {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run one pushbutton
    Run(RunArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Id of the pushbutton (see `archforge list`)
    pub button: String,

    /// Path to the document snapshot to load
    #[arg(long)]
    pub document: PathBuf,

    /// Path to write the edited document to (nothing is written when omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Answer Yes to every confirmation
    #[arg(long, conflicts_with = "no")]
    pub yes: bool,

    /// Answer No to every confirmation
    #[arg(long)]
    pub no: bool,

    /// Prefix for renaming buttons
    #[arg(long)]
    pub prefix: Option<String>,

    /// Suffix for renaming buttons
    #[arg(long)]
    pub suffix: Option<String>,

    /// Letter case for the case buttons (lower, upper, sentence, title, camel)
    #[arg(long)]
    pub case: Option<CaseTransform>,

    /// Annotation types to purge, comma separated (text-notes, room-tags, window-tags, door-tags, wall-tags)
    #[arg(long, value_delimiter = ',')]
    pub targets: Vec<PurgeTarget>,

    /// Level names to create plans for, comma separated
    #[arg(long, value_delimiter = ',')]
    pub levels: Vec<String>,

    /// Grid numbering direction, e.g. `right-to-left,bottom-to-top`
    #[arg(long)]
    pub grid_order: Option<GridOrder>,

    /// Grid bubble sides to change, comma separated (top, bottom, left, right)
    #[arg(long, value_delimiter = ',')]
    pub sides: Vec<GridSide>,

    /// Hide the bubbles on `--sides` instead of showing them
    #[arg(long)]
    pub hide_bubbles: bool,
}

impl RunArgs {
    /// Answers the dialogs of a run from the flags.
    ///
    /// Confirmations without a flag fall back to `assume_yes`, then to the
    /// default answer of each question.
    pub fn prompt(&self, assume_yes: bool) -> ScriptedPrompt {
        let mut prompt = ScriptedPrompt::new();
        if self.no {
            prompt = prompt.assume(Answer::No);
        } else if self.yes || assume_yes {
            prompt = prompt.assume(Answer::Yes);
        }
        if self.prefix.is_some() || self.suffix.is_some() {
            prompt = prompt.affixes(
                self.prefix.clone().unwrap_or_default(),
                self.suffix.clone().unwrap_or_default(),
            );
        }
        if let Some(case) = self.case {
            prompt = prompt.case(case);
        }
        if !self.targets.is_empty() {
            prompt = prompt.targets(self.targets.clone());
        }
        if !self.levels.is_empty() {
            prompt = prompt.levels(self.levels.iter().cloned().map(LevelChoice::Name).collect());
        }
        if let Some(order) = self.grid_order {
            prompt = prompt.grid_order(order);
        }
        if !self.sides.is_empty() {
            prompt = prompt.bubbles(self.sides.clone(), !self.hide_bubbles);
        }
        prompt
    }
}
