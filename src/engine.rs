use rand::Rng;
use std::fmt;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    pub fn opposite(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

/// Terminal-state classification of a board. Exactly one holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Won,
    Lost,
    NotOver,
}

pub const SIZE: usize = 4;

/// The tile value that wins the game.
pub const WIN_TILE: u32 = 2048;

/// Tile value spawned by a default (normal-rules) board.
pub const DEFAULT_SPAWN: u32 = 2;

/// 4x4 grid of tile values, row-major. 0 is an empty cell; every non-zero
/// cell is a power of two.
pub type Grid = [[u32; SIZE]; SIZE];

/// A 4x4 2048 board.
///
/// Owns the grid, the best score of the session (the highest value any merge
/// has produced so far), and the value new tiles spawn with. The spawn value
/// is fixed at construction; mode variants configure it instead of reaching
/// into the grid.
///
/// ```
/// use twenty48::engine::{Board, Move};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let mut board = Board::new(&mut rng);
/// assert_eq!(board.count_empty(), 14);
/// let _changed = board.apply(Move::Left);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    best_score: u32,
    spawn_value: u32,
}

impl Board {
    /// A board with normal rules (new tiles are 2s), seeded with two tiles.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_spawn_value(DEFAULT_SPAWN, rng)
    }

    /// A board whose spawned tiles all carry `spawn_value`, seeded with two
    /// such tiles.
    pub fn with_spawn_value<R: Rng + ?Sized>(spawn_value: u32, rng: &mut R) -> Self {
        debug_assert!(spawn_value.is_power_of_two());
        let mut board = Board {
            grid: [[0; SIZE]; SIZE],
            best_score: 0,
            spawn_value,
        };
        board.add_random_tile(rng);
        board.add_random_tile(rng);
        board
    }

    /// Construct a board over an explicit grid, normal spawn rules.
    pub fn from_grid(grid: Grid) -> Self {
        Board {
            grid,
            best_score: 0,
            spawn_value: DEFAULT_SPAWN,
        }
    }

    /// Slide and merge tiles toward `direction`, in place.
    ///
    /// Compress, merge, compress again; each tile merges at most once per
    /// call. Returns whether any cell changed value or position. Every
    /// direction reduces to the canonical leftward pass via row reversal
    /// and transposition.
    ///
    /// ```
    /// use twenty48::engine::{Board, Move};
    ///
    /// let mut board = Board::from_grid([
    ///     [2, 2, 0, 0],
    ///     [0, 0, 0, 0],
    ///     [0, 0, 0, 0],
    ///     [0, 0, 0, 0],
    /// ]);
    /// assert!(board.apply(Move::Left));
    /// assert_eq!(board.rows()[0], [4, 0, 0, 0]);
    /// assert_eq!(board.best_score(), 4);
    /// ```
    pub fn apply(&mut self, direction: Move) -> bool {
        match direction {
            Move::Left => self.shift_left(),
            Move::Right => {
                self.reverse_rows();
                let changed = self.shift_left();
                self.reverse_rows();
                changed
            }
            Move::Up => {
                self.transpose();
                let changed = self.shift_left();
                self.transpose();
                changed
            }
            Move::Down => {
                self.transpose();
                self.reverse_rows();
                let changed = self.shift_left();
                self.reverse_rows();
                self.transpose();
                changed
            }
        }
    }

    /// Set one empty cell, chosen uniformly at random, to the spawn value.
    /// No-op on a full grid.
    pub fn add_random_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let empty: Vec<(usize, usize)> = (0..SIZE)
            .flat_map(|i| (0..SIZE).map(move |j| (i, j)))
            .filter(|&(i, j)| self.grid[i][j] == 0)
            .collect();
        if empty.is_empty() {
            return;
        }
        let (i, j) = empty[rng.gen_range(0..empty.len())];
        self.grid[i][j] = self.spawn_value;
    }

    /// Classify the board: `Won` if any cell holds the winning tile (checked
    /// before anything else, even on a full grid), `NotOver` if any cell is
    /// empty or any adjacent pair is equal (rows scanned before columns),
    /// otherwise `Lost`.
    pub fn state(&self) -> GameState {
        if self.grid.iter().flatten().any(|&v| v == WIN_TILE) {
            return GameState::Won;
        }
        if self.grid.iter().flatten().any(|&v| v == 0) {
            return GameState::NotOver;
        }
        for i in 0..SIZE {
            for j in 0..SIZE - 1 {
                if self.grid[i][j] == self.grid[i][j + 1] {
                    return GameState::NotOver;
                }
            }
        }
        for j in 0..SIZE {
            for i in 0..SIZE - 1 {
                if self.grid[i][j] == self.grid[i + 1][j] {
                    return GameState::NotOver;
                }
            }
        }
        GameState::Lost
    }

    /// Highest value any merge has produced this session. Never decreases,
    /// including across `reset`.
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Clear the grid and reseed two spawn-value tiles. The session best
    /// score is preserved.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.grid = [[0; SIZE]; SIZE];
        self.add_random_tile(rng);
        self.add_random_tile(rng);
    }

    /// Snapshot of the grid values, row-major.
    pub fn rows(&self) -> Grid {
        self.grid
    }

    pub fn tile(&self, row: usize, col: usize) -> u32 {
        self.grid[row][col]
    }

    pub fn spawn_value(&self) -> u32 {
        self.spawn_value
    }

    /// Count the number of empty cells.
    pub fn count_empty(&self) -> usize {
        self.grid.iter().flatten().filter(|&&v| v == 0).count()
    }

    fn shift_left(&mut self) -> bool {
        let mut changed = false;
        for row in &mut self.grid {
            changed |= compress_row(row);
            let (merged, top) = merge_row(row);
            if merged {
                changed = true;
                self.best_score = self.best_score.max(top);
                compress_row(row);
            }
        }
        changed
    }

    fn reverse_rows(&mut self) {
        for row in &mut self.grid {
            row.reverse();
        }
    }

    fn transpose(&mut self) {
        for i in 0..SIZE {
            for j in i + 1..SIZE {
                let tmp = self.grid[i][j];
                self.grid[i][j] = self.grid[j][i];
                self.grid[j][i] = tmp;
            }
        }
    }
}

/// Slide the non-zero values of `row` to the left, preserving order.
/// Returns whether any value moved.
fn compress_row(row: &mut [u32; SIZE]) -> bool {
    let mut changed = false;
    let mut pos = 0;
    for j in 0..SIZE {
        if row[j] != 0 {
            if j != pos {
                row[pos] = row[j];
                row[j] = 0;
                changed = true;
            }
            pos += 1;
        }
    }
    changed
}

/// Merge equal adjacent pairs in a compressed row, left to right. A doubled
/// tile never merges again within the same pass. Returns whether anything
/// merged and the largest value produced.
fn merge_row(row: &mut [u32; SIZE]) -> (bool, u32) {
    let mut merged = false;
    let mut top = 0;
    for j in 0..SIZE - 1 {
        if row[j] != 0 && row[j] == row[j + 1] {
            row[j] *= 2;
            row[j + 1] = 0;
            merged = true;
            top = top.max(row[j]);
        }
    }
    (merged, top)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.grid.iter().enumerate() {
            if i > 0 {
                writeln!(f, "-----------------------")?;
            }
            let cells: Vec<String> = row.iter().map(format_val).collect();
            writeln!(f, "{}|{}|{}|{}", cells[0], cells[1], cells[2], cells[3])?;
        }
        Ok(())
    }
}

fn format_val(val: &u32) -> String {
    match val {
        0 => String::from("     "),
        v => format!("{v:^5}"),
    }
}
