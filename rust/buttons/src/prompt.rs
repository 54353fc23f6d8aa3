// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! User interaction seam.
//!
//! Pushbuttons never talk to a UI directly. They ask a [`Prompt`] for
//! confirmations and choices and hand it notices to display. Hosts plug in
//! their own dialogs; [`ScriptedPrompt`] answers from queues and records what
//! it was shown.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use archforge_model::{Category, ElementId};

use crate::case::CaseTransform;
use crate::error::ButtonError;

/// Answer to a yes/no/cancel question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Cancel,
}

/// A yes/no/cancel question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub title: String,
    pub message: String,
    /// Answer suggested to the user.
    pub default: Answer,
    /// Whether `Cancel` is offered in addition to yes and no.
    pub cancellable: bool,
}

impl Confirmation {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            default: Answer::Yes,
            cancellable: false,
        }
    }

    pub fn default_answer(mut self, answer: Answer) -> Self {
        self.default = answer;
        self
    }

    pub fn cancellable(mut self) -> Self {
        self.cancellable = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, title: title.into(), message: message.into() }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, title: title.into(), message: message.into() }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, title: title.into(), message: message.into() }
    }
}

/// Prefix and suffix entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Affixes {
    pub prefix: String,
    pub suffix: String,
}

impl Affixes {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), suffix: suffix.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty() && self.suffix.is_empty()
    }
}

/// Annotation groups the overkill purge can process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PurgeTarget {
    TextNotes,
    RoomTags,
    WindowTags,
    DoorTags,
    WallTags,
}

impl PurgeTarget {
    pub const ALL: &'static [PurgeTarget] = &[
        PurgeTarget::TextNotes,
        PurgeTarget::RoomTags,
        PurgeTarget::WindowTags,
        PurgeTarget::DoorTags,
        PurgeTarget::WallTags,
    ];

    pub fn category(&self) -> Category {
        match self {
            PurgeTarget::TextNotes => Category::TextNotes,
            PurgeTarget::RoomTags => Category::RoomTags,
            PurgeTarget::WindowTags => Category::WindowTags,
            PurgeTarget::DoorTags => Category::DoorTags,
            PurgeTarget::WallTags => Category::WallTags,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PurgeTarget::TextNotes => "text-notes",
            PurgeTarget::RoomTags => "room-tags",
            PurgeTarget::WindowTags => "window-tags",
            PurgeTarget::DoorTags => "door-tags",
            PurgeTarget::WallTags => "wall-tags",
        }
    }
}

impl fmt::Display for PurgeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PurgeTarget {
    type Err = ButtonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PurgeTarget::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ButtonError::InvalidInput(format!("unknown purge target {s:?}")))
    }
}

/// Numbering direction for grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOrder {
    /// Number vertical grids from left to right, else from right to left.
    pub left_to_right: bool,
    /// Letter horizontal grids from top to bottom, else from bottom to top.
    pub top_to_bottom: bool,
}

impl Default for GridOrder {
    fn default() -> Self {
        Self { left_to_right: true, top_to_bottom: true }
    }
}

impl fmt::Display for GridOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = if self.left_to_right { "left-to-right" } else { "right-to-left" };
        let y = if self.top_to_bottom { "top-to-bottom" } else { "bottom-to-top" };
        write!(f, "{x},{y}")
    }
}

/// Parses a comma separated list of directions; directions left out keep
/// their default.
impl FromStr for GridOrder {
    type Err = ButtonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut order = GridOrder::default();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part {
                "left-to-right" => order.left_to_right = true,
                "right-to-left" => order.left_to_right = false,
                "top-to-bottom" => order.top_to_bottom = true,
                "bottom-to-top" => order.top_to_bottom = false,
                other => return Err(ButtonError::InvalidInput(format!("unknown grid order {other:?}"))),
            }
        }
        Ok(order)
    }
}

/// Side of the view a grid bubble sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl GridSide {
    pub const ALL: &'static [GridSide] = &[GridSide::Top, GridSide::Bottom, GridSide::Left, GridSide::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            GridSide::Top => "top",
            GridSide::Bottom => "bottom",
            GridSide::Left => "left",
            GridSide::Right => "right",
        }
    }
}

impl fmt::Display for GridSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GridSide {
    type Err = ButtonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GridSide::ALL
            .iter()
            .copied()
            .find(|side| side.as_str() == s)
            .ok_or_else(|| ButtonError::InvalidInput(format!("unknown grid side {s:?}")))
    }
}

/// Grid bubbles to show or hide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BubbleRequest {
    pub sides: Vec<GridSide>,
    /// Show the bubbles on `sides`, else hide them.
    pub show: bool,
}

/// Dialogs a pushbutton may open.
///
/// Every method that asks for input returns `None` (or [`Answer::Cancel`])
/// when the user dismisses the dialog.
pub trait Prompt {
    fn confirm(&mut self, question: &Confirmation) -> Answer;

    fn notify(&mut self, notice: &Notice);

    fn ask_affixes(&mut self, title: &str) -> Option<Affixes>;

    fn choose_case(&mut self, title: &str, options: &[CaseTransform]) -> Option<CaseTransform>;

    fn choose_purge_targets(&mut self, options: &[PurgeTarget]) -> Option<Vec<PurgeTarget>>;

    fn choose_grid_order(&mut self) -> Option<GridOrder>;

    fn choose_grid_bubbles(&mut self) -> Option<BubbleRequest>;

    /// Chooses among `(level id, level name)` pairs.
    fn choose_levels(&mut self, levels: &[(ElementId, String)]) -> Option<Vec<ElementId>>;
}

/// Level picked by name or by id in a scripted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelChoice {
    Id(ElementId),
    Name(String),
}

/// A [`Prompt`] answering from pre-filled queues.
///
/// Questions with an empty queue get the fallback answer: the question's own
/// default for confirmations (unless `assume` is set), the default order for
/// grid numbering, cancel for everything else. Every question and notice is
/// recorded.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<Answer>,
    affixes: VecDeque<Affixes>,
    cases: VecDeque<CaseTransform>,
    targets: VecDeque<Vec<PurgeTarget>>,
    grid_orders: VecDeque<GridOrder>,
    bubbles: VecDeque<BubbleRequest>,
    levels: VecDeque<Vec<LevelChoice>>,
    assume: Option<Answer>,
    questions: Vec<Confirmation>,
    notices: Vec<Notice>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, answer: Answer) -> Self {
        self.answers.push_back(answer);
        self
    }

    /// Answer used for every confirmation once the queue is empty.
    pub fn assume(mut self, answer: Answer) -> Self {
        self.assume = Some(answer);
        self
    }

    pub fn affixes(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.affixes.push_back(Affixes::new(prefix, suffix));
        self
    }

    pub fn case(mut self, case: CaseTransform) -> Self {
        self.cases.push_back(case);
        self
    }

    pub fn targets(mut self, targets: Vec<PurgeTarget>) -> Self {
        self.targets.push_back(targets);
        self
    }

    pub fn grid_order(mut self, order: GridOrder) -> Self {
        self.grid_orders.push_back(order);
        self
    }

    pub fn bubbles(mut self, sides: Vec<GridSide>, show: bool) -> Self {
        self.bubbles.push_back(BubbleRequest { sides, show });
        self
    }

    pub fn levels(mut self, levels: Vec<LevelChoice>) -> Self {
        self.levels.push_back(levels);
        self
    }

    /// Confirmations asked so far.
    pub fn questions(&self) -> &[Confirmation] {
        &self.questions
    }

    /// Notices shown so far.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&mut self, question: &Confirmation) -> Answer {
        self.questions.push(question.clone());
        let answer = self
            .answers
            .pop_front()
            .or(self.assume)
            .unwrap_or(question.default);
        tracing::debug!(title = %question.title, ?answer, "Scripted confirmation");
        answer
    }

    fn notify(&mut self, notice: &Notice) {
        tracing::debug!(title = %notice.title, level = ?notice.level, "Notice");
        self.notices.push(notice.clone());
    }

    fn ask_affixes(&mut self, _title: &str) -> Option<Affixes> {
        self.affixes.pop_front()
    }

    fn choose_case(&mut self, _title: &str, options: &[CaseTransform]) -> Option<CaseTransform> {
        self.cases.pop_front().filter(|case| options.contains(case))
    }

    fn choose_purge_targets(&mut self, options: &[PurgeTarget]) -> Option<Vec<PurgeTarget>> {
        self.targets
            .pop_front()
            .map(|chosen| chosen.into_iter().filter(|t| options.contains(t)).collect())
    }

    fn choose_grid_order(&mut self) -> Option<GridOrder> {
        Some(self.grid_orders.pop_front().unwrap_or_default())
    }

    fn choose_grid_bubbles(&mut self) -> Option<BubbleRequest> {
        self.bubbles.pop_front()
    }

    fn choose_levels(&mut self, levels: &[(ElementId, String)]) -> Option<Vec<ElementId>> {
        let choices = self.levels.pop_front()?;
        Some(
            levels
                .iter()
                .filter(|(id, name)| {
                    choices.iter().any(|c| match c {
                        LevelChoice::Id(chosen) => chosen == id,
                        LevelChoice::Name(chosen) => chosen == name,
                    })
                })
                .map(|(id, _)| *id)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmations_fall_back_to_default_then_assumed() {
        let question = Confirmation::new("Q", "?").default_answer(Answer::No);

        let mut prompt = ScriptedPrompt::new().answer(Answer::Yes);
        assert_eq!(prompt.confirm(&question), Answer::Yes);
        assert_eq!(prompt.confirm(&question), Answer::No);

        let mut prompt = ScriptedPrompt::new().assume(Answer::Yes);
        assert_eq!(prompt.confirm(&question), Answer::Yes);
        assert_eq!(prompt.questions().len(), 1);
    }

    #[test]
    fn empty_queues_cancel() {
        let mut prompt = ScriptedPrompt::new();
        assert_eq!(prompt.ask_affixes("Grids"), None);
        assert_eq!(prompt.choose_case("Case", CaseTransform::ALL), None);
        assert_eq!(prompt.choose_purge_targets(PurgeTarget::ALL), None);
        assert_eq!(prompt.choose_levels(&[]), None);
        assert_eq!(prompt.choose_grid_bubbles(), None);
        assert_eq!(prompt.choose_grid_order(), Some(GridOrder::default()));
    }

    #[test]
    fn choices_are_limited_to_offered_options() {
        let mut prompt = ScriptedPrompt::new()
            .case(CaseTransform::CamelJoin)
            .targets(vec![PurgeTarget::DoorTags, PurgeTarget::WallTags]);
        assert_eq!(prompt.choose_case("Case", &[CaseTransform::Lower]), None);
        assert_eq!(
            prompt.choose_purge_targets(&[PurgeTarget::DoorTags]),
            Some(vec![PurgeTarget::DoorTags])
        );
    }

    #[test]
    fn levels_match_by_name_or_id() {
        let levels = vec![
            (ElementId(1), "Level 0".to_string()),
            (ElementId(2), "Level 1".to_string()),
            (ElementId(3), "Roof".to_string()),
        ];
        let mut prompt = ScriptedPrompt::new().levels(vec![
            LevelChoice::Name("Roof".into()),
            LevelChoice::Id(ElementId(1)),
        ]);
        assert_eq!(prompt.choose_levels(&levels), Some(vec![ElementId(1), ElementId(3)]));
    }

    #[test]
    fn purge_target_names_parse() {
        for target in PurgeTarget::ALL {
            assert_eq!(target.as_str().parse::<PurgeTarget>().unwrap(), *target);
        }
        assert!("sheets".parse::<PurgeTarget>().is_err());
    }

    #[test]
    fn grid_orders_parse() {
        let order: GridOrder = "right-to-left, bottom-to-top".parse().unwrap();
        assert_eq!(order, GridOrder { left_to_right: false, top_to_bottom: false });
        assert_eq!(order.to_string().parse::<GridOrder>().unwrap(), order);

        let partial: GridOrder = "bottom-to-top".parse().unwrap();
        assert!(partial.left_to_right && !partial.top_to_bottom);
        assert!("diagonal".parse::<GridOrder>().is_err());

        assert_eq!("left".parse::<GridSide>().unwrap(), GridSide::Left);
        assert!("middle".parse::<GridSide>().is_err());
    }
}
