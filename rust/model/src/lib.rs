// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # ArchForge Model
//!
//! Typed in-memory stand-in for a BIM host document.
//!
//! A [`Document`] owns elements and views addressed by stable integer ids.
//! Elements carry a kind-specific payload ([`ElementKind`]), optional model
//! and per-view bounding boxes, and a small set of built-in parameters.
//! Views hold per-element graphic overrides and hidden categories.
//!
//! Edits are grouped with [`Document::transaction`]: a transaction that is
//! dropped without being committed restores the document to the state it had
//! when the transaction started.
//!
//! Documents load from and save to JSON via [`DocumentSnapshot`].

pub mod document;
pub mod element;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod parameters;
pub mod serialization;
pub mod transaction;
pub mod view;

pub use document::{Document, ElementBuilder};
pub use element::{Capabilities, Category, DatumEnd, Element, ElementKind, GridBubbles};
pub use error::{Error, Result};
pub use geometry::{boxes_overlap, BoundingBox, Line, Point3, Vector3};
pub use ids::{ElementId, ViewId};
pub use parameters::{BuiltInParameter, ParamValue, Parameters};
pub use serialization::DocumentSnapshot;
pub use transaction::Transaction;
pub use view::{Color, FillPattern, OverrideGraphicSettings, View, ViewType};
