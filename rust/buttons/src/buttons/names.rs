// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use rustc_hash::FxHashSet;

use archforge_model::{Category, Document, ElementId, ElementKind, ViewId};

use super::{Outcome, Pushbutton, Summary};
use crate::case::{is_valid_name, CaseTransform};
use crate::error::Result;
use crate::prompt::{Affixes, Answer, Confirmation};
use crate::rename::unique_name;
use crate::session::Session;

/// Something with a renameable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Named {
    Element(ElementId),
    View(ViewId),
}

/// Which names a button edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameGroup {
    Sheets,
    Views,
    /// Views listed in the project browser tree.
    BrowserViews,
    /// Loadable (non-system) families.
    Families,
}

impl NameGroup {
    fn label(&self) -> &'static str {
        match self {
            NameGroup::Sheets => "sheet",
            NameGroup::Views | NameGroup::BrowserViews => "view",
            NameGroup::Families => "family",
        }
    }

    /// Members of the group with their current names, in document order.
    fn members(&self, doc: &Document) -> Vec<(Named, String)> {
        match self {
            NameGroup::Sheets => doc
                .elements_of(Category::Sheets)
                .map(|e| (Named::Element(e.id()), e.name().to_string()))
                .collect(),
            NameGroup::Families => doc
                .elements_of(Category::Families)
                .filter(|e| !matches!(e.kind, ElementKind::Family { system: true }))
                .map(|e| (Named::Element(e.id()), e.name().to_string()))
                .collect(),
            NameGroup::Views => doc.views().map(|v| (Named::View(v.id()), v.name().to_string())).collect(),
            NameGroup::BrowserViews => doc
                .views()
                .filter(|v| v.view_type.is_browser_listed())
                .map(|v| (Named::View(v.id()), v.name().to_string()))
                .collect(),
        }
    }

    /// Names a new name must not collide with.
    fn namespace(&self, doc: &Document) -> FxHashSet<String> {
        match self {
            NameGroup::Sheets => doc.elements_of(Category::Sheets).map(|e| e.name().to_string()).collect(),
            NameGroup::Families => doc.elements_of(Category::Families).map(|e| e.name().to_string()).collect(),
            NameGroup::Views | NameGroup::BrowserViews => doc.views().map(|v| v.name().to_string()).collect(),
        }
    }
}

#[derive(Debug, Default)]
struct RenameReport {
    renamed: usize,
    invalid: Vec<String>,
}

/// Renames every member of `group` to `rename(current)`, falling back to
/// `name_1`, `name_2`, … when the new name is taken. Members for which
/// `rename` returns `None` or an unchanged name are left alone.
fn rename_group<F>(doc: &mut Document, group: NameGroup, transaction: &str, rename: F) -> Result<RenameReport>
where
    F: Fn(&str) -> Option<String>,
{
    let members = group.members(doc);
    let mut taken = group.namespace(doc);
    doc.with_transaction(transaction, |doc| -> Result<RenameReport> {
        let mut report = RenameReport::default();
        for (named, current) in &members {
            let Some(wanted) = rename(current) else { continue };
            if wanted == *current {
                continue;
            }
            if !is_valid_name(&wanted) {
                tracing::debug!(name = %current, wanted = %wanted, "Skipping invalid name");
                report.invalid.push(current.clone());
                continue;
            }
            taken.remove(current);
            let new_name = unique_name(&wanted, &taken);
            taken.insert(new_name.clone());
            if new_name == *current {
                continue;
            }
            match named {
                Named::Element(id) => doc.set_name(*id, new_name.as_str())?,
                Named::View(id) => doc.rename_view(*id, new_name.as_str())?,
            }
            tracing::debug!(from = %current, to = %new_name, "Renamed");
            report.renamed += 1;
        }
        Ok(report)
    })
}

fn case_outcome(group: NameGroup, case: CaseTransform, report: RenameReport) -> Outcome {
    let mut message = format!(
        "All {} names have been changed to {} case ({} updated).",
        group.label(),
        case,
        report.renamed
    );
    if !report.invalid.is_empty() {
        message.push_str(&format!(
            " Skipped due to prohibited characters: {}.",
            report.invalid.join(", ")
        ));
    }
    Outcome::Completed(Summary::new("Success", message, report.renamed))
}

fn run_case(session: &mut Session<'_>, group: NameGroup, transaction: &str) -> Result<Outcome> {
    let title = format!("Select a transformation for {} names", group.label());
    let Some(case) = session.prompt.choose_case(&title, CaseTransform::ALL) else {
        return Ok(Outcome::Cancelled);
    };
    let report = rename_group(session.doc, group, transaction, |name| Some(case.apply(name)))?;
    Ok(case_outcome(group, case, report))
}

/// Changes the letter case of sheet names.
pub struct SheetNameCase;

impl Pushbutton for SheetNameCase {
    fn id(&self) -> &'static str {
        "sheet-name-case"
    }

    fn title(&self) -> &'static str {
        "Sheet Case"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        run_case(session, NameGroup::Sheets, "Update sheet names")
    }
}

/// Changes the letter case of view names listed in the project browser.
pub struct ViewNameCase;

impl Pushbutton for ViewNameCase {
    fn id(&self) -> &'static str {
        "view-name-case"
    }

    fn title(&self) -> &'static str {
        "View Case"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        run_case(session, NameGroup::BrowserViews, "Update view names")
    }
}

/// Changes the letter case of loadable family names.
pub struct FamilyNameCase;

impl Pushbutton for FamilyNameCase {
    fn id(&self) -> &'static str {
        "family-name-case"
    }

    fn title(&self) -> &'static str {
        "Family Case"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        run_case(session, NameGroup::Families, "Update family names")
    }
}

/// `name` with the affixes added, skipping ones already present.
pub(crate) fn add_affixes(name: &str, affixes: &Affixes) -> String {
    let mut result = name.to_string();
    if !affixes.prefix.is_empty() && !name.starts_with(&affixes.prefix) {
        result.insert_str(0, &affixes.prefix);
    }
    if !affixes.suffix.is_empty() && !name.ends_with(&affixes.suffix) {
        result.push_str(&affixes.suffix);
    }
    result
}

/// `name` with the affixes removed where present.
pub(crate) fn remove_affixes(name: &str, affixes: &Affixes) -> String {
    let mut result = name;
    if !affixes.prefix.is_empty() {
        result = result.strip_prefix(affixes.prefix.as_str()).unwrap_or(result);
    }
    if !affixes.suffix.is_empty() {
        result = result.strip_suffix(affixes.suffix.as_str()).unwrap_or(result);
    }
    result.to_string()
}

fn run_affixes(session: &mut Session<'_>, group: NameGroup) -> Result<Outcome> {
    let label = group.label();
    let Some(affixes) = session.prompt.ask_affixes(&format!("Prefix and suffix for {label} names")) else {
        return Ok(Outcome::Cancelled);
    };
    let affixes = Affixes::new(affixes.prefix.trim(), affixes.suffix.trim());
    if affixes.is_empty() {
        return Ok(Outcome::NothingToDo("Please provide either a prefix or suffix.".into()));
    }

    let question = Confirmation::new(
        "Prefix/Suffix",
        format!("Add the prefix/suffix to {label} names? Choose No to remove them instead."),
    )
    .cancellable();
    let (report, verb) = match session.confirm(question) {
        Answer::Yes => (
            rename_group(session.doc, group, &format!("Update {label} names"), |name| {
                Some(add_affixes(name, &affixes))
            })?,
            "added to",
        ),
        Answer::No => (
            rename_group(session.doc, group, &format!("Remove prefix/suffix from {label} names"), |name| {
                Some(remove_affixes(name, &affixes))
            })?,
            "removed from",
        ),
        Answer::Cancel => return Ok(Outcome::Cancelled),
    };

    Ok(Outcome::Completed(Summary::new(
        "Success",
        format!("Prefix and/or suffix {verb} {} {label} names.", report.renamed),
        report.renamed,
    )))
}

/// Adds or removes a prefix and suffix on sheet names.
pub struct SheetAffixes;

impl Pushbutton for SheetAffixes {
    fn id(&self) -> &'static str {
        "sheet-affixes"
    }

    fn title(&self) -> &'static str {
        "Sheet Prefix/Suffix"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        run_affixes(session, NameGroup::Sheets)
    }
}

/// Adds or removes a prefix and suffix on view names.
pub struct ViewAffixes;

impl Pushbutton for ViewAffixes {
    fn id(&self) -> &'static str {
        "view-affixes"
    }

    fn title(&self) -> &'static str {
        "View Prefix/Suffix"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        run_affixes(session, NameGroup::Views)
    }
}

/// Adds or removes a prefix and suffix on loadable family names.
pub struct FamilyAffixes;

impl Pushbutton for FamilyAffixes {
    fn id(&self) -> &'static str {
        "family-affixes"
    }

    fn title(&self) -> &'static str {
        "Family Prefix/Suffix"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        run_affixes(session, NameGroup::Families)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affixes_are_not_doubled() {
        let affixes = Affixes::new("A-", "-X");
        assert_eq!(add_affixes("Plan", &affixes), "A-Plan-X");
        assert_eq!(add_affixes("A-Plan", &affixes), "A-Plan-X");
        assert_eq!(add_affixes("A-Plan-X", &affixes), "A-Plan-X");
        assert_eq!(add_affixes("Plan", &Affixes::new("", "-X")), "Plan-X");
    }

    #[test]
    fn affixes_are_removed_where_present() {
        let affixes = Affixes::new("A-", "-X");
        assert_eq!(remove_affixes("A-Plan-X", &affixes), "Plan");
        assert_eq!(remove_affixes("Plan-X", &affixes), "Plan");
        assert_eq!(remove_affixes("Plan", &affixes), "Plan");
    }

    #[test]
    fn collisions_fall_back_to_numbered_names() {
        let mut doc = Document::new("t");
        doc.add_element("PLAN", ElementKind::Sheet { number: "A1".into(), placed_views: vec![] })
            .unwrap();
        let second = doc
            .add_element("plan", ElementKind::Sheet { number: "A2".into(), placed_views: vec![] })
            .unwrap();

        let report = rename_group(&mut doc, NameGroup::Sheets, "t", |n| Some(n.to_uppercase())).unwrap();
        assert_eq!(report.renamed, 1);
        assert_eq!(doc.element(second).unwrap().name(), "PLAN_1");
    }

    #[test]
    fn invalid_names_are_skipped() {
        let mut doc = Document::new("t");
        let sheet = doc
            .add_element("Plan", ElementKind::Sheet { number: "A1".into(), placed_views: vec![] })
            .unwrap();
        let report = rename_group(&mut doc, NameGroup::Sheets, "t", |n| Some(format!("{n}/2"))).unwrap();
        assert_eq!(report.renamed, 0);
        assert_eq!(report.invalid, ["Plan"]);
        assert_eq!(doc.element(sheet).unwrap().name(), "Plan");
    }
}
