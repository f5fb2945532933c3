use slotmap::new_key_type;

new_key_type! {
    pub struct RoomId;
    pub struct DoorId;
}

/// Integer grid cell. Ordering is row-major, which keeps every `BTreeSet<Pos>`
/// walk deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    /// Cell containing a world coordinate.
    pub fn from_world(world: WorldPos) -> Self {
        Self { y: world.y.floor() as i32, x: world.x.floor() as i32 }
    }

    /// Tile-center world coordinate of this cell.
    pub fn center(self) -> WorldPos {
        WorldPos { x: self.x as f32 + 0.5, y: self.y as f32 + 0.5 }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }

    pub fn cardinal_neighbors(self) -> [Pos; 4] {
        CARDINAL_OFFSETS.map(|(dx, dy)| self.offset(dx, dy))
    }

    pub fn surrounding(self) -> [Pos; 8] {
        SURROUNDING_OFFSETS.map(|(dx, dy)| self.offset(dx, dy))
    }
}

/// Left, right, down, up.
pub const CARDINAL_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub const SURROUNDING_OFFSETS: [(i32, i32); 8] =
    [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1)];

/// Continuous world coordinate; one grid cell spans one unit on each axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: WorldPos) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Floor,
    Wall,
    Door(DoorId),
}
