use serde::{Deserialize, Serialize};

use crate::C;

/// Terrain category of a single cell. Every category except [Terrain::Wall] can be entered at a
/// positive cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Normal,
    Forest,
    Water,
    Mountain,
    Sand,
    Wall,
}

impl Terrain {
    /// All categories in palette order.
    pub const ALL: [Terrain; 6] = [
        Terrain::Normal,
        Terrain::Forest,
        Terrain::Water,
        Terrain::Mountain,
        Terrain::Sand,
        Terrain::Wall,
    ];

    /// Traversal weight in unit-step terms, [f64::INFINITY] for walls.
    pub fn weight(self) -> f64 {
        match self.cost() {
            Some(cost) => cost as f64 / C as f64,
            None => f64::INFINITY,
        }
    }

    /// Integer cost of entering a cell of this terrain, where a Normal cell costs [C].
    /// Walls are impassable and have no cost.
    #[inline]
    pub fn cost(self) -> Option<i32> {
        match self {
            Terrain::Normal => Some(C),
            Terrain::Sand => Some(C + C / 2),
            Terrain::Forest => Some(2 * C),
            Terrain::Water => Some(3 * C),
            Terrain::Mountain => Some(4 * C),
            Terrain::Wall => None,
        }
    }

    pub fn is_wall(self) -> bool {
        self == Terrain::Wall
    }

    /// Label shown in the editor palette.
    pub fn label(self) -> &'static str {
        match self {
            Terrain::Normal => "Normal",
            Terrain::Forest => "Forest (2x)",
            Terrain::Water => "Water (3x)",
            Terrain::Mountain => "Mountain (4x)",
            Terrain::Sand => "Sand (1.5x)",
            Terrain::Wall => "Wall",
        }
    }

    /// Character used by the ASCII form of a grid.
    pub fn symbol(self) -> char {
        match self {
            Terrain::Normal => '.',
            Terrain::Forest => 'f',
            Terrain::Water => '~',
            Terrain::Mountain => '^',
            Terrain::Sand => ':',
            Terrain::Wall => '#',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Terrain> {
        Terrain::ALL.into_iter().find(|t| t.symbol() == symbol)
    }
}
