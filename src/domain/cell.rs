/// Cell states and their properties.
/// Properties are queried via methods, not stored as flags,
/// so cell semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CellState {
    Undefined,
    Player,
    Friend,
    Enemy,
    Path,     // hand-placed corridor marker
    SlowPath, // corridor variant, same connectivity rules
    FastPath,
    Obstacle, // wall, not traversable
    Exit,
    Breadcrumb, // hint overlay on an otherwise open cell
}

impl CellState {
    /// Stable integer code used by the map file format.
    /// Fixed by this table, not variant order, so saved maps
    /// stay readable if variants are ever reordered.
    pub fn code(self) -> u8 {
        match self {
            CellState::Undefined => 0,
            CellState::Player => 1,
            CellState::Friend => 2,
            CellState::Enemy => 3,
            CellState::Path => 4,
            CellState::SlowPath => 5,
            CellState::FastPath => 6,
            CellState::Obstacle => 7,
            CellState::Exit => 8,
            CellState::Breadcrumb => 9,
        }
    }

    /// Inverse of `code`. Unknown codes mean a corrupt map file.
    pub fn from_code(code: u8) -> Option<CellState> {
        match code {
            0 => Some(CellState::Undefined),
            1 => Some(CellState::Player),
            2 => Some(CellState::Friend),
            3 => Some(CellState::Enemy),
            4 => Some(CellState::Path),
            5 => Some(CellState::SlowPath),
            6 => Some(CellState::FastPath),
            7 => Some(CellState::Obstacle),
            8 => Some(CellState::Exit),
            9 => Some(CellState::Breadcrumb),
            _ => None,
        }
    }

    /// Can the player step onto this cell?
    pub fn is_walkable(self) -> bool {
        !matches!(self, CellState::Obstacle)
    }

    /// Is this a corridor marker drawn with junction glyphs?
    pub fn is_path(self) -> bool {
        matches!(self, CellState::Path | CellState::SlowPath | CellState::FastPath)
    }

    /// Can random entity placement land here?
    pub fn accepts_entity(self) -> bool {
        matches!(
            self,
            CellState::Undefined | CellState::Path | CellState::SlowPath | CellState::FastPath
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_pinned() {
        // The file format depends on these exact values.
        assert_eq!(CellState::Undefined.code(), 0);
        assert_eq!(CellState::Player.code(), 1);
        assert_eq!(CellState::Obstacle.code(), 7);
        assert_eq!(CellState::Exit.code(), 8);
        assert_eq!(CellState::Breadcrumb.code(), 9);
    }

    #[test]
    fn from_code_rejects_unknown() {
        assert_eq!(CellState::from_code(10), None);
        assert_eq!(CellState::from_code(255), None);
    }

    #[test]
    fn only_obstacle_blocks() {
        assert!(!CellState::Obstacle.is_walkable());
        assert!(CellState::Undefined.is_walkable());
        assert!(CellState::Exit.is_walkable());
        assert!(CellState::Breadcrumb.is_walkable());
    }

    #[test]
    fn entity_targets() {
        assert!(CellState::Undefined.accepts_entity());
        assert!(CellState::SlowPath.accepts_entity());
        assert!(!CellState::Exit.accepts_entity());
        assert!(!CellState::Player.accepts_entity());
        assert!(!CellState::Breadcrumb.accepts_entity());
    }
}
