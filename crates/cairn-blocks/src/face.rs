use cairn_geom::IVec3;

/// One of the six cube directions. The discriminant is the face index the
/// renderer passes around.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Face {
    East = 0,
    West = 1,
    North = 2,
    South = 3,
    Top = 4,
    Bottom = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::East,
        Face::West,
        Face::North,
        Face::South,
        Face::Top,
        Face::Bottom,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(i: u8) -> Option<Face> {
        Face::ALL.get(i as usize).copied()
    }

    #[inline]
    pub fn opposite(self) -> Face {
        match self {
            Face::East => Face::West,
            Face::West => Face::East,
            Face::North => Face::South,
            Face::South => Face::North,
            Face::Top => Face::Bottom,
            Face::Bottom => Face::Top,
        }
    }

    #[inline]
    pub fn normal(self) -> IVec3 {
        match self {
            Face::East => IVec3::new(1, 0, 0),
            Face::West => IVec3::new(-1, 0, 0),
            Face::North => IVec3::new(0, 1, 0),
            Face::South => IVec3::new(0, -1, 0),
            Face::Top => IVec3::new(0, 0, 1),
            Face::Bottom => IVec3::new(0, 0, -1),
        }
    }

    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Face::Top | Face::Bottom)
    }
}
