//! Typed grid representation of a parsed map.
//!
//! A [`GridMap`] is built once at load time and never mutated afterwards, so
//! it can be shared freely by collision, spawning and rendering code.

use crate::error::MapError;

/// The role of one grid cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellType {
    #[default]
    Free,
    Wall,
    PlayerStart,
    Light,
    Door,
    SolidObject,
    Enemy,
    Collectable,
    Car,
}

impl CellType {
    /// Maps one map-file character to its cell type.
    ///
    /// # Character classes
    /// - `@` player start
    /// - `o`..=`z` wall
    /// - `*`, `^`, `!` light
    /// - `A`..=`G` door
    /// - `H`..=`N` solid object
    /// - `O`..=`R` enemy
    /// - `S` car
    /// - `T`..=`Z` collectable
    /// - anything else is free space
    pub fn from_char(c: char) -> Self {
        match c {
            '@' => CellType::PlayerStart,
            'o'..='z' => CellType::Wall,
            '*' | '^' | '!' => CellType::Light,
            'A'..='G' => CellType::Door,
            'H'..='N' => CellType::SolidObject,
            'O'..='R' => CellType::Enemy,
            'S' => CellType::Car,
            'T'..='Z' => CellType::Collectable,
            _ => CellType::Free,
        }
    }
}

/// Represents a cell in the map grid
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Row index of the cell (world Z)
    pub row: usize,
    /// Column index of the cell (world X)
    pub col: usize,
}

impl Cell {
    /// Creates a new Cell with the given coordinates
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Immutable rows x columns grid of [`CellType`] with exactly one player start.
#[derive(Debug, Clone)]
pub struct GridMap {
    rows: usize,
    columns: usize,
    cells: Vec<CellType>,
    player_start: Cell,
}

impl GridMap {
    /// Builds a grid from row-major cell rows.
    ///
    /// Every row must have the length of the first one and exactly one cell
    /// must be [`CellType::PlayerStart`].
    ///
    /// # Errors
    /// [`MapError::RowLengthMismatch`] for a ragged grid and
    /// [`MapError::PlayerStartCount`] when the start count is not one.
    pub fn new(grid: Vec<Vec<CellType>>) -> Result<Self, MapError> {
        let rows = grid.len();
        let columns = grid.first().map_or(0, Vec::len);

        let mut cells = Vec::with_capacity(rows * columns);
        let mut starts = Vec::new();

        for (row, line) in grid.into_iter().enumerate() {
            if line.len() != columns {
                return Err(MapError::RowLengthMismatch {
                    row,
                    expected: columns,
                    actual: line.len(),
                });
            }
            for (col, cell_type) in line.into_iter().enumerate() {
                if cell_type == CellType::PlayerStart {
                    starts.push(Cell::new(row, col));
                }
                cells.push(cell_type);
            }
        }

        match starts.as_slice() {
            [start] => Ok(Self {
                rows,
                columns,
                cells,
                player_start: *start,
            }),
            _ => Err(MapError::PlayerStartCount(starts.len())),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Returns the cell type at `(row, col)`, or `None` outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<CellType> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        self.cells.get(row * self.columns + col).copied()
    }

    pub fn player_start(&self) -> Cell {
        self.player_start
    }

    /// Iterates over every cell of the given type in row-major order.
    pub fn cells_of(&self, cell_type: CellType) -> impl Iterator<Item = Cell> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == cell_type)
            .map(move |(i, _)| Cell::new(i / columns, i % columns))
    }
}
