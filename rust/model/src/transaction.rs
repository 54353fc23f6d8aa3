// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scoped transactions with rollback.
//!
//! A [`Transaction`] holds the exclusive borrow of the document together with
//! a copy of its state taken when the transaction started. Committing
//! discards the copy; dropping the guard without committing restores it. The
//! document cannot be reached except through the open guard, so at most one
//! transaction is open at a time.

use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use crate::document::Document;
use crate::element::Element;
use crate::ids::{ElementId, ViewId};
use crate::view::View;

/// State restored on rollback.
#[derive(Debug)]
struct Checkpoint {
    elements: BTreeMap<ElementId, Element>,
    views: BTreeMap<ViewId, View>,
    active_view: Option<ViewId>,
    next_element: u64,
    next_view: u64,
}

/// An open transaction on a [`Document`].
///
/// Dereferences to the document, so every mutation made through it is part of
/// the transaction.
#[derive(Debug)]
pub struct Transaction<'a> {
    doc: &'a mut Document,
    name: String,
    checkpoint: Option<Checkpoint>,
}

impl<'a> Transaction<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Keeps every change made since the transaction started.
    pub fn commit(mut self) {
        self.checkpoint = None;
        tracing::info!(transaction = %self.name, "Committed transaction");
        let name = std::mem::take(&mut self.name);
        self.doc.history.push(name);
    }

    /// Discards every change made since the transaction started.
    pub fn rollback(self) {
        // Restoring happens in Drop.
    }
}

impl Deref for Transaction<'_> {
    type Target = Document;

    fn deref(&self) -> &Document {
        self.doc
    }
}

impl DerefMut for Transaction<'_> {
    fn deref_mut(&mut self) -> &mut Document {
        self.doc
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if let Some(cp) = self.checkpoint.take() {
            self.doc.elements = cp.elements;
            self.doc.views = cp.views;
            self.doc.active_view = cp.active_view;
            self.doc.next_element = cp.next_element;
            self.doc.next_view = cp.next_view;
            tracing::warn!(transaction = %self.name, "Rolled back transaction");
        }
    }
}

impl Document {
    /// Starts a transaction.
    ///
    /// # Example
    ///
    /// ```
    /// use archforge_model::{Document, ElementKind};
    ///
    /// let mut doc = Document::new("Project");
    /// let wall = doc.add_element("Wall", ElementKind::Wall).unwrap();
    ///
    /// let mut tx = doc.transaction("Rename wall");
    /// tx.set_name(wall, "Exterior").unwrap();
    /// drop(tx); // not committed
    ///
    /// assert_eq!(doc.element(wall).unwrap().name(), "Wall");
    /// ```
    pub fn transaction(&mut self, name: impl Into<String>) -> Transaction<'_> {
        let name = name.into();
        tracing::debug!(transaction = %name, "Started transaction");
        let checkpoint = Checkpoint {
            elements: self.elements.clone(),
            views: self.views.clone(),
            active_view: self.active_view,
            next_element: self.next_element,
            next_view: self.next_view,
        };
        Transaction {
            doc: self,
            name,
            checkpoint: Some(checkpoint),
        }
    }

    /// Runs `f` inside a transaction: commits on `Ok`, rolls back on `Err`.
    ///
    /// The error returned by `f` is passed through unchanged.
    pub fn with_transaction<T, E, F>(&mut self, name: impl Into<String>, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut Document) -> std::result::Result<T, E>,
    {
        let mut tx = self.transaction(name);
        let value = f(&mut *tx)?;
        tx.commit();
        Ok(value)
    }
}
