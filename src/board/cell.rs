//! Cell contents: veggie kinds, special gems, and board coordinates

use serde::{Deserialize, Serialize};

/// The veggie kinds a level can draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VeggieKind {
    Tomato,
    Carrot,
    Eggplant,
    Broccoli,
    Corn,
    Chili,
}

impl VeggieKind {
    /// Every kind, in the order the built-in levels introduce them
    pub const ALL: [VeggieKind; 6] = [
        VeggieKind::Tomato,
        VeggieKind::Carrot,
        VeggieKind::Eggplant,
        VeggieKind::Broccoli,
        VeggieKind::Corn,
        VeggieKind::Chili,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VeggieKind::Tomato => "tomato",
            VeggieKind::Carrot => "carrot",
            VeggieKind::Eggplant => "eggplant",
            VeggieKind::Broccoli => "broccoli",
            VeggieKind::Corn => "corn",
            VeggieKind::Chili => "chili",
        }
    }

    /// Single-character symbol used by text layouts
    pub fn symbol(&self) -> char {
        match self {
            VeggieKind::Tomato => 't',
            VeggieKind::Carrot => 'c',
            VeggieKind::Eggplant => 'e',
            VeggieKind::Broccoli => 'b',
            VeggieKind::Corn => 'o',
            VeggieKind::Chili => 'h',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.symbol() == symbol)
    }
}

/// What a cell shows: a veggie, or the kindless rainbow gem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Veggie(VeggieKind),
    Rainbow,
}

impl CellKind {
    pub fn veggie(&self) -> Option<VeggieKind> {
        match self {
            CellKind::Veggie(kind) => Some(*kind),
            CellKind::Rainbow => None,
        }
    }
}

impl From<VeggieKind> for CellKind {
    fn from(kind: VeggieKind) -> Self {
        CellKind::Veggie(kind)
    }
}

/// Special gem carried by a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialKind {
    #[default]
    None,
    /// Clears its row when activated
    StripeH,
    /// Clears its column when activated
    StripeV,
    /// Clears every cell of a target kind when activated
    Rainbow,
}

/// A single board cell.
///
/// Fields are private so that a rainbow special always has the rainbow kind
/// and stripes always keep a veggie kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Cell {
    kind: CellKind,
    special: SpecialKind,
}

impl Cell {
    pub fn plain(kind: VeggieKind) -> Self {
        Self {
            kind: CellKind::Veggie(kind),
            special: SpecialKind::None,
        }
    }

    pub fn stripe_h(kind: VeggieKind) -> Self {
        Self {
            kind: CellKind::Veggie(kind),
            special: SpecialKind::StripeH,
        }
    }

    pub fn stripe_v(kind: VeggieKind) -> Self {
        Self {
            kind: CellKind::Veggie(kind),
            special: SpecialKind::StripeV,
        }
    }

    pub fn rainbow() -> Self {
        Self {
            kind: CellKind::Rainbow,
            special: SpecialKind::Rainbow,
        }
    }

    /// Build a cell for `special`, using `kind` wherever a veggie is kept
    pub fn with_special(kind: VeggieKind, special: SpecialKind) -> Self {
        match special {
            SpecialKind::None => Self::plain(kind),
            SpecialKind::StripeH => Self::stripe_h(kind),
            SpecialKind::StripeV => Self::stripe_v(kind),
            SpecialKind::Rainbow => Self::rainbow(),
        }
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn special(&self) -> SpecialKind {
        self.special
    }

    /// Veggie kind, or None for a rainbow gem
    pub fn veggie(&self) -> Option<VeggieKind> {
        self.kind.veggie()
    }

    pub fn is_special(&self) -> bool {
        self.special != SpecialKind::None
    }
}

/// Grid coordinate (row 0 is the top)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance of exactly one
    #[inline]
    pub fn is_adjacent(&self, other: Pos) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

/// A swap between two adjacent cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Pos,
    pub to: Pos,
}

impl Move {
    pub fn new(from: Pos, to: Pos) -> Self {
        Self { from, to }
    }
}
