/// Entities: Player and Enemy, plus the movement-cooldown gate they share.
/// Both actor kinds move on the same rhythm: a cooldown armed on every
/// successful move, ticked down once per frame, acting only at zero.

/// Movement direction; doubles as the facing an actor shows after moving.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit displacement as (dcol, drow). Row grows downward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Frame-granular movement gate. Armed to a terrain-dependent tick count
/// on a successful move; the owner may act again only once it runs out.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Cooldown(u32);

impl Cooldown {
    pub fn ready(self) -> bool {
        self.0 == 0
    }

    pub fn remaining(self) -> u32 {
        self.0
    }

    pub fn arm(&mut self, ticks: u32) {
        self.0 = ticks;
    }

    /// One tick elapses. Saturates at zero.
    pub fn tick(&mut self) {
        if self.0 > 0 {
            self.0 -= 1;
        }
    }
}

/// Movement pacing and AI tunables. Defaults match the classic feel:
/// digging is slow, running through tunnels quick, ghosting glacial.
#[derive(Clone, Copy, Debug)]
pub struct Tuning {
    pub player_dig_cooldown: u32,
    pub player_tunnel_cooldown: u32,
    pub enemy_ghost_cooldown: u32,
    pub enemy_tunnel_cooldown: u32,
    /// Percent chance per ready tick that an enemy wanders instead of chasing.
    pub deviation_percent: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            player_dig_cooldown: 8,
            player_tunnel_cooldown: 3,
            enemy_ghost_cooldown: 20,
            enemy_tunnel_cooldown: 10,
            deviation_percent: 30,
        }
    }
}

/// Input intent for one tick. The input layer buffers raw key events
/// down to at most one direction per tick; the newest event wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub dir: Option<Direction>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EnemyKind {
    Pooka,
    Fygar,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub col: i32,
    pub row: i32,
    pub facing: Direction,
    pub alive: bool,
    /// Lifetime count of Dirt cells converted to Tunnel. Never decreases.
    pub dirt_dug: u32,
    pub move_cooldown: Cooldown,
}

impl Player {
    pub fn new(col: i32, row: i32) -> Self {
        Player {
            col,
            row,
            facing: Direction::Right,
            alive: true,
            dirt_dug: 0,
            move_cooldown: Cooldown::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub col: i32,
    pub row: i32,
    pub kind: EnemyKind,
    pub facing: Direction,
    pub alive: bool,
    /// True while sitting inside a Dirt cell it slipped into. Enemies pass
    /// through dirt without converting it.
    pub ghosting: bool,
    pub move_cooldown: Cooldown,
}

impl Enemy {
    pub fn new(kind: EnemyKind, col: i32, row: i32) -> Self {
        Enemy {
            col,
            row,
            kind,
            facing: Direction::Left,
            alive: true,
            ghosting: false,
            move_cooldown: Cooldown::default(),
        }
    }
}

/// Side length of one grid cell in sprite space (reference screen 640x480).
pub const TILE_SIZE: i32 = 32;

/// Grid position to sprite-space pixels. The terminal frontend has its own
/// cell mapping; a graphical one multiplies through this.
#[allow(dead_code)]
pub fn pixel_pos(col: i32, row: i32) -> (i32, i32) {
    (col * TILE_SIZE, row * TILE_SIZE)
}
