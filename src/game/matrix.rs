use crate::PayoffPair;
use crate::Player;

/// Errors from matrix construction, cell access, and profile dimensions.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    InvalidShape(String),
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        columns: usize,
    },
    DimensionMismatch {
        player: Player,
        expected: usize,
        actual: usize,
    },
    InvalidParameter(String),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidShape(s) => write!(f, "invalid matrix shape: {}", s),
            Self::OutOfRange {
                row,
                col,
                rows,
                columns,
            } => write!(
                f,
                "cell ({}, {}) out of range for {}x{} matrix",
                row, col, rows, columns
            ),
            Self::DimensionMismatch {
                player,
                expected,
                actual,
            } => write!(
                f,
                "{} strategy has {} entries, expected {}",
                player, actual, expected
            ),
            Self::InvalidParameter(s) => write!(f, "invalid parameter: {}", s),
        }
    }
}

impl std::error::Error for GameError {}

/// Rectangular grid of payoff pairs, immutable once held by a session.
///
/// Rows are player 1 pure strategies, columns are player 2 pure strategies.
/// Construction validates the shape; every row must have the same nonzero
/// length and there must be at least one row.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoffMatrix {
    grid: Vec<Vec<PayoffPair>>,
}

impl PayoffMatrix {
    pub fn new(grid: Vec<Vec<PayoffPair>>) -> Result<Self, GameError> {
        let rows = grid.len();
        if rows == 0 {
            return Err(GameError::InvalidShape("matrix has no rows".to_string()));
        }
        let columns = grid[0].len();
        if columns == 0 {
            return Err(GameError::InvalidShape("matrix has no columns".to_string()));
        }
        for (r, row) in grid.iter().enumerate() {
            if row.len() != columns {
                return Err(GameError::InvalidShape(format!(
                    "row {} has {} cells, expected {}",
                    r,
                    row.len(),
                    columns
                )));
            }
        }
        Ok(Self { grid })
    }

    pub fn rows(&self) -> usize {
        self.grid.len()
    }
    pub fn columns(&self) -> usize {
        self.grid[0].len()
    }

    /// Bounds-checked cell access.
    pub fn cell(&self, row: usize, col: usize) -> Result<PayoffPair, GameError> {
        if row >= self.rows() || col >= self.columns() {
            return Err(GameError::OutOfRange {
                row,
                col,
                rows: self.rows(),
                columns: self.columns(),
            });
        }
        Ok(self.grid[row][col])
    }

    /// One row of the grid. Callers iterate `0..rows()`.
    pub fn row(&self, row: usize) -> &[PayoffPair] {
        &self.grid[row]
    }

    pub fn cells(&self) -> &[Vec<PayoffPair>] {
        &self.grid
    }

    /// A copy of the matrix with one cell replaced. Dimensions never change.
    pub fn with_cell(&self, row: usize, col: usize, pair: PayoffPair) -> Result<Self, GameError> {
        if row >= self.rows() || col >= self.columns() {
            return Err(GameError::OutOfRange {
                row,
                col,
                rows: self.rows(),
                columns: self.columns(),
            });
        }
        let mut grid = self.grid.clone();
        grid[row][col] = pair;
        Self::new(grid)
    }
}

impl TryFrom<Vec<Vec<PayoffPair>>> for PayoffMatrix {
    type Error = GameError;
    fn try_from(grid: Vec<Vec<PayoffPair>>) -> Result<Self, Self::Error> {
        Self::new(grid)
    }
}

impl std::fmt::Display for PayoffMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "      ")?;
        for c in 0..self.columns() {
            write!(f, "      B{}      ", c + 1)?;
        }
        writeln!(f)?;
        for (r, row) in self.grid.iter().enumerate() {
            write!(f, "A{}  ", r + 1)?;
            for &(u1, u2) in row {
                write!(f, "({:>5}, {:>5}) ", u1, u2)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dilemma() -> PayoffMatrix {
        PayoffMatrix::new(vec![
            vec![(3.0, 3.0), (0.0, 5.0)],
            vec![(5.0, 0.0), (1.0, 1.0)],
        ])
        .unwrap()
    }

    #[test]
    fn rejects_empty_grid() {
        assert!(matches!(
            PayoffMatrix::new(vec![]),
            Err(GameError::InvalidShape(_))
        ));
        assert!(matches!(
            PayoffMatrix::new(vec![vec![]]),
            Err(GameError::InvalidShape(_))
        ));
    }

    #[test]
    fn rejects_jagged_grid() {
        let grid = vec![vec![(1.0, 1.0), (2.0, 2.0)], vec![(3.0, 3.0)]];
        assert!(matches!(
            PayoffMatrix::new(grid),
            Err(GameError::InvalidShape(_))
        ));
    }

    #[test]
    fn dimensions_and_cells() {
        let matrix = dilemma();
        assert!(matrix.rows() == 2);
        assert!(matrix.columns() == 2);
        assert!(matrix.cell(1, 0).unwrap() == (5.0, 0.0));
        assert!(matches!(
            matrix.cell(2, 0),
            Err(GameError::OutOfRange { .. })
        ));
    }

    #[test]
    fn cell_replacement_preserves_shape() {
        let matrix = dilemma();
        let edited = matrix.with_cell(0, 1, (9.0, 9.0)).unwrap();
        assert!(edited.rows() == matrix.rows());
        assert!(edited.columns() == matrix.columns());
        assert!(edited.cell(0, 1).unwrap() == (9.0, 9.0));
        assert!(edited.cell(0, 0).unwrap() == matrix.cell(0, 0).unwrap());
        assert!(matches!(
            matrix.with_cell(0, 7, (0.0, 0.0)),
            Err(GameError::OutOfRange { .. })
        ));
    }
}
