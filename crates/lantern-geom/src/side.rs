/// The six faces of a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
    Front,
    Back,
}

impl Side {
    pub const ALL: [Side; 6] = [
        Side::Top,
        Side::Bottom,
        Side::Left,
        Side::Right,
        Side::Front,
        Side::Back,
    ];

    pub const HORIZONTAL: [Side; 4] = [Side::Left, Side::Right, Side::Front, Side::Back];

    /// Unit step (dx, dy, dz) out through this face.
    #[inline]
    pub const fn direction(self) -> (i32, i32, i32) {
        match self {
            Side::Top => (0, 1, 0),
            Side::Bottom => (0, -1, 0),
            Side::Left => (-1, 0, 0),
            Side::Right => (1, 0, 0),
            Side::Front => (0, 0, -1),
            Side::Back => (0, 0, 1),
        }
    }

    #[inline]
    pub const fn reverse(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Front => Side::Back,
            Side::Back => Side::Front,
        }
    }

    #[inline]
    pub const fn is_horizontal(self) -> bool {
        !matches!(self, Side::Top | Side::Bottom)
    }
}
