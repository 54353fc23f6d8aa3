// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element kinds, categories and capabilities.
//!
//! Each element carries an [`ElementKind`], a tagged variant holding the data
//! specific to that kind of element. Code that needs to know whether an
//! element "has" some property (can it be mirrored, pinned, ...) asks
//! [`ElementKind::capabilities`] instead of probing for attributes.

use bitflags::bitflags;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, Line, Point3};
use crate::ids::{ElementId, ViewId};
use crate::parameters::Parameters;

/// Host categories known to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Walls,
    Columns,
    Floors,
    Doors,
    Windows,
    GenericModels,
    Furniture,
    Ceilings,
    Rooms,
    Grids,
    Levels,
    Dimensions,
    TextNotes,
    Sheets,
    Viewports,
    Families,
    RevitLinks,
    CadImports,
    PointClouds,
    Materials,
    FillPatterns,
    // Tags
    RoomTags,
    DoorTags,
    WindowTags,
    WallTags,
    KeynoteTags,
    MaterialTags,
    FloorTags,
    CeilingTags,
    FurnitureTags,
    GenericModelTags,
    MultiCategoryTags,
    AreaTags,
    StairsTags,
    StructuralColumnTags,
    CurtainWallPanelTags,
    DetailComponentTags,
}

impl Category {
    /// Every tag category.
    pub const TAGS: &'static [Category] = &[
        Category::RoomTags,
        Category::DoorTags,
        Category::WindowTags,
        Category::WallTags,
        Category::KeynoteTags,
        Category::MaterialTags,
        Category::FloorTags,
        Category::CeilingTags,
        Category::FurnitureTags,
        Category::GenericModelTags,
        Category::MultiCategoryTags,
        Category::AreaTags,
        Category::StairsTags,
        Category::StructuralColumnTags,
        Category::CurtainWallPanelTags,
        Category::DetailComponentTags,
    ];

    pub fn is_tag(&self) -> bool {
        Self::TAGS.contains(self)
    }

    /// True for 3D model categories, false for annotations, views and
    /// document-level entries.
    pub fn is_model(&self) -> bool {
        matches!(
            self,
            Category::Walls
                | Category::Columns
                | Category::Floors
                | Category::Doors
                | Category::Windows
                | Category::GenericModels
                | Category::Furniture
                | Category::Ceilings
                | Category::Rooms
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Walls => "Walls",
            Category::Columns => "Columns",
            Category::Floors => "Floors",
            Category::Doors => "Doors",
            Category::Windows => "Windows",
            Category::GenericModels => "Generic Models",
            Category::Furniture => "Furniture",
            Category::Ceilings => "Ceilings",
            Category::Rooms => "Rooms",
            Category::Grids => "Grids",
            Category::Levels => "Levels",
            Category::Dimensions => "Dimensions",
            Category::TextNotes => "Text Notes",
            Category::Sheets => "Sheets",
            Category::Viewports => "Viewports",
            Category::Families => "Families",
            Category::RevitLinks => "RVT Links",
            Category::CadImports => "Imports in Families",
            Category::PointClouds => "Point Clouds",
            Category::Materials => "Materials",
            Category::FillPatterns => "Fill Patterns",
            Category::RoomTags => "Room Tags",
            Category::DoorTags => "Door Tags",
            Category::WindowTags => "Window Tags",
            Category::WallTags => "Wall Tags",
            Category::KeynoteTags => "Keynote Tags",
            Category::MaterialTags => "Material Tags",
            Category::FloorTags => "Floor Tags",
            Category::CeilingTags => "Ceiling Tags",
            Category::FurnitureTags => "Furniture Tags",
            Category::GenericModelTags => "Generic Model Tags",
            Category::MultiCategoryTags => "Multi-Category Tags",
            Category::AreaTags => "Area Tags",
            Category::StairsTags => "Stairs Tags",
            Category::StructuralColumnTags => "Structural Column Tags",
            Category::CurtainWallPanelTags => "Curtain Panel Tags",
            Category::DetailComponentTags => "Detail Item Tags",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// What an element kind supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Has a `mirrored` state.
        const MIRRORABLE = 1 << 0;
        /// Can be pinned in place.
        const PINNABLE = 1 << 1;
        /// 3D model element.
        const MODEL = 1 << 2;
        /// View-specific annotation.
        const ANNOTATION = 1 << 3;
        /// Name must be unique within its category.
        const UNIQUE_NAME = 1 << 4;
    }
}

/// One end of a datum line such as a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatumEnd {
    Start,
    End,
}

/// Bubble visibility at the two ends of a grid in one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBubbles {
    pub start: bool,
    pub end: bool,
}

impl Default for GridBubbles {
    fn default() -> Self {
        Self { start: true, end: true }
    }
}

impl GridBubbles {
    pub fn is_visible(&self, end: DatumEnd) -> bool {
        match end {
            DatumEnd::Start => self.start,
            DatumEnd::End => self.end,
        }
    }

    pub fn set(&mut self, end: DatumEnd, visible: bool) {
        match end {
            DatumEnd::Start => self.start = visible,
            DatumEnd::End => self.end = visible,
        }
    }
}

/// Kind-specific element data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    Wall,
    Column,
    Floor,
    Door {
        #[serde(default)]
        mirrored: bool,
    },
    Window {
        #[serde(default)]
        mirrored: bool,
    },
    GenericModel {
        #[serde(default)]
        mirrored: bool,
    },
    Furniture {
        #[serde(default)]
        mirrored: bool,
    },
    Ceiling,
    Room {
        /// Placement point; `None` for an unplaced room.
        #[serde(default)]
        location: Option<Point3>,
        #[serde(default)]
        area: f64,
        #[serde(default)]
        level: Option<ElementId>,
    },
    Grid {
        curve: Line,
        /// Bubble visibility per view; views not listed show both bubbles.
        #[serde(default, skip_serializing_if = "FxHashMap::is_empty")]
        bubbles: FxHashMap<ViewId, GridBubbles>,
    },
    Level {
        #[serde(default)]
        elevation: f64,
    },
    Dimension {
        curve: Line,
    },
    TextNote,
    Tag {
        category: Category,
        #[serde(default)]
        tagged: Vec<ElementId>,
    },
    Sheet {
        number: String,
        #[serde(default)]
        placed_views: Vec<ViewId>,
    },
    Viewport {
        sheet: ElementId,
        view: ViewId,
    },
    Family {
        /// System families are built into the host and cannot be renamed.
        #[serde(default)]
        system: bool,
    },
    RevitLink,
    CadImport,
    PointCloud,
    Material {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        surface_pattern: Option<ElementId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cut_pattern: Option<ElementId>,
    },
    FillPattern,
}

impl ElementKind {
    /// A grid along `curve` with both bubbles shown everywhere.
    pub fn grid(curve: Line) -> Self {
        ElementKind::Grid { curve, bubbles: FxHashMap::default() }
    }

    pub fn category(&self) -> Category {
        match self {
            ElementKind::Wall => Category::Walls,
            ElementKind::Column => Category::Columns,
            ElementKind::Floor => Category::Floors,
            ElementKind::Door { .. } => Category::Doors,
            ElementKind::Window { .. } => Category::Windows,
            ElementKind::GenericModel { .. } => Category::GenericModels,
            ElementKind::Furniture { .. } => Category::Furniture,
            ElementKind::Ceiling => Category::Ceilings,
            ElementKind::Room { .. } => Category::Rooms,
            ElementKind::Grid { .. } => Category::Grids,
            ElementKind::Level { .. } => Category::Levels,
            ElementKind::Dimension { .. } => Category::Dimensions,
            ElementKind::TextNote => Category::TextNotes,
            ElementKind::Tag { category, .. } => *category,
            ElementKind::Sheet { .. } => Category::Sheets,
            ElementKind::Viewport { .. } => Category::Viewports,
            ElementKind::Family { .. } => Category::Families,
            ElementKind::RevitLink => Category::RevitLinks,
            ElementKind::CadImport => Category::CadImports,
            ElementKind::PointCloud => Category::PointClouds,
            ElementKind::Material { .. } => Category::Materials,
            ElementKind::FillPattern => Category::FillPatterns,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::empty();
        let category = self.category();
        if category.is_model() {
            caps |= Capabilities::MODEL;
        }
        match self {
            ElementKind::Door { .. }
            | ElementKind::Window { .. }
            | ElementKind::GenericModel { .. }
            | ElementKind::Furniture { .. } => {
                caps |= Capabilities::MIRRORABLE | Capabilities::PINNABLE;
            }
            ElementKind::Dimension { .. } | ElementKind::TextNote | ElementKind::Tag { .. } => {
                caps |= Capabilities::ANNOTATION | Capabilities::PINNABLE;
            }
            ElementKind::Grid { .. } | ElementKind::Level { .. } => {
                caps |= Capabilities::UNIQUE_NAME | Capabilities::PINNABLE;
            }
            ElementKind::Family { .. } | ElementKind::Material { .. } | ElementKind::FillPattern => {
                caps |= Capabilities::UNIQUE_NAME;
            }
            ElementKind::Sheet { .. } | ElementKind::Room { .. } => {}
            ElementKind::Wall
            | ElementKind::Column
            | ElementKind::Floor
            | ElementKind::Ceiling
            | ElementKind::Viewport { .. }
            | ElementKind::RevitLink
            | ElementKind::CadImport
            | ElementKind::PointCloud => {
                caps |= Capabilities::PINNABLE;
            }
        }
        caps
    }

    /// Mirrored state for kinds that have one.
    pub fn mirrored(&self) -> Option<bool> {
        match self {
            ElementKind::Door { mirrored }
            | ElementKind::Window { mirrored }
            | ElementKind::GenericModel { mirrored }
            | ElementKind::Furniture { mirrored } => Some(*mirrored),
            _ => None,
        }
    }

    /// Curve of line-based kinds (grids, dimensions).
    pub fn curve(&self) -> Option<&Line> {
        match self {
            ElementKind::Grid { curve, .. } | ElementKind::Dimension { curve } => Some(curve),
            _ => None,
        }
    }

    /// Bubble visibility of a grid in `view`; `None` for other kinds.
    pub fn grid_bubbles(&self, view: ViewId) -> Option<GridBubbles> {
        match self {
            ElementKind::Grid { bubbles, .. } => Some(bubbles.get(&view).copied().unwrap_or_default()),
            _ => None,
        }
    }
}

/// An element of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub(crate) id: ElementId,
    pub(crate) name: String,
    pub kind: ElementKind,
    #[serde(default)]
    pub pinned: bool,
    /// View owning a view-specific element; `None` for model elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_view: Option<ViewId>,
    /// Family of a family instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    /// Extents as drawn in particular views, overriding `bounding_box`.
    #[serde(default, skip_serializing_if = "FxHashMap::is_empty")]
    pub view_boxes: FxHashMap<ViewId, BoundingBox>,
    #[serde(default, skip_serializing_if = "Parameters::is_empty")]
    pub parameters: Parameters,
}

impl Element {
    pub(crate) fn new(id: ElementId, name: String, kind: ElementKind) -> Self {
        Self {
            id,
            name,
            kind,
            pinned: false,
            owner_view: None,
            family: None,
            bounding_box: None,
            view_boxes: FxHashMap::default(),
            parameters: Parameters::default(),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.kind.capabilities()
    }

    pub fn has(&self, capability: Capabilities) -> bool {
        self.capabilities().contains(capability)
    }

    /// Extent of the element as seen in `view`.
    ///
    /// Falls back to the model extent when the view has no specific box.
    pub fn bounding_box_in(&self, view: ViewId) -> Option<&BoundingBox> {
        self.view_boxes.get(&view).or(self.bounding_box.as_ref())
    }

    /// True if the element shows up in `view` (ignoring hidden categories).
    pub fn is_visible_in(&self, view: ViewId) -> bool {
        match self.owner_view {
            Some(owner) => owner == view,
            None => true,
        }
    }
}
