use crate::errors::GridError;
use crate::geometry::Position;
use crate::terrain::TerrainCategory;

use rand::Rng;


/// Rectangular terrain map, row-major
/// Read-only while a search runs, editable between runs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<TerrainCategory>,
}

impl Grid {

    /// Grid where every cell has the same terrain
    pub fn filled(width: usize, height: usize, terrain: TerrainCategory) -> Self {
        Self {
            width,
            height,
            cells: vec![terrain; width * height],
        }
    }

    /// Build from rows of terrain codes
    /// Rows must be non-empty, of equal length, and only hold known codes
    pub fn from_codes<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridError> {
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if width == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(GridError::Ragged { row: y, expected: width, found: row.len() });
            }
            for (x, &code) in row.iter().enumerate() {
                let terrain = TerrainCategory::from_code(code).ok_or(GridError::UnknownTerrainCode {
                    code,
                    position: Position::new(x as i32, y as i32),
                })?;
                cells.push(terrain);
            }
        }

        Ok(Self { width, height: rows.len(), cells })
    }

    /// Random terrain, uniform over categories
    pub fn random<R: Rng>(width: usize, height: usize, rng: &mut R) -> Self {
        let cells = (0..width * height)
            .map(|_| TerrainCategory::ALL[rng.random_range(0..TerrainCategory::ALL.len())])
            .collect();
        Self { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, position: Position) -> bool {
        self.index(position).is_some()
    }

    /// Terrain at `position`, `None` outside the grid
    pub fn terrain(&self, position: Position) -> Option<TerrainCategory> {
        self.index(position).map(|i| self.cells[i])
    }

    /// Overwrite a single cell
    pub fn set(&mut self, position: Position, terrain: TerrainCategory) -> Result<(), GridError> {
        let i = self.index(position).ok_or(GridError::OutOfBounds(position))?;
        self.cells[i] = terrain;
        Ok(())
    }

    /// Rows of terrain codes, the inverse of `from_codes`
    pub fn to_codes(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(|t| t.code()).collect())
            .collect()
    }

    fn index(&self, position: Position) -> Option<usize> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}
