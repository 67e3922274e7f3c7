/// Tile types and their properties.
/// Properties are queried via methods, not stored as flags,
/// so tile semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Empty,  // Sky / void above ground
    Dirt,   // Diggable ground; converts to Tunnel when dug
    Tunnel, // Dug-out passage
    Rock,   // Impassable for everyone
}

impl Tile {
    /// Can an entity occupy this cell without digging or ghosting?
    pub fn is_open(self) -> bool {
        matches!(self, Tile::Empty | Tile::Tunnel)
    }

    /// Can the player dig through this tile?
    pub fn is_diggable(self) -> bool {
        matches!(self, Tile::Dirt)
    }

    /// Does this tile block every actor, enemies included?
    pub fn is_rock(self) -> bool {
        matches!(self, Tile::Rock)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Empty
    }
}
