//! Binary occupancy map and pixel coordinates.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Integer pixel coordinate: `x` is the column, `y` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl GridCoord {
    /// Create a new coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another pixel.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        f64::hypot(f64::from(other.x - self.x), f64::from(other.y - self.y))
    }

    /// The 8 surrounding pixels (self excluded).
    #[must_use]
    pub fn neighbors_8(self) -> [GridCoord; 8] {
        [
            GridCoord::new(self.x - 1, self.y - 1),
            GridCoord::new(self.x, self.y - 1),
            GridCoord::new(self.x + 1, self.y - 1),
            GridCoord::new(self.x - 1, self.y),
            GridCoord::new(self.x + 1, self.y),
            GridCoord::new(self.x - 1, self.y + 1),
            GridCoord::new(self.x, self.y + 1),
            GridCoord::new(self.x + 1, self.y + 1),
        ]
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Default sentinel marking an obstacle cell.
pub const DEFAULT_OBSTACLE: u8 = 0;

/// Free-cell value used when building maps from text.
const FREE_CELL: u8 = 255;

/// Row-major grid where one sentinel value marks obstacles.
///
/// Deserialization goes through [`OccupancyMap::new`], so a decoded map has
/// the same shape guarantees as a constructed one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MapData")]
pub struct OccupancyMap {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
    obstacle: u8,
}

/// Unchecked serialized form of [`OccupancyMap`].
#[derive(Deserialize)]
struct MapData {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
    obstacle: u8,
}

impl TryFrom<MapData> for OccupancyMap {
    type Error = PlannerError;

    fn try_from(data: MapData) -> Result<Self> {
        Self::new(data.rows, data.cols, data.cells, data.obstacle)
    }
}

impl OccupancyMap {
    /// Build a map from a row-major cell buffer.
    pub fn new(rows: usize, cols: usize, cells: Vec<u8>, obstacle: u8) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(PlannerError::MapFormat(format!(
                "map must have at least one cell, got {rows}x{cols}"
            )));
        }
        if cells.len() != rows * cols {
            return Err(PlannerError::MapFormat(format!(
                "expected {} cells for a {rows}x{cols} map, got {}",
                rows * cols,
                cells.len()
            )));
        }
        if i32::try_from(rows).is_err() || i32::try_from(cols).is_err() {
            return Err(PlannerError::MapFormat(format!(
                "map {rows}x{cols} exceeds pixel coordinate range"
            )));
        }
        Ok(Self {
            rows,
            cols,
            cells,
            obstacle,
        })
    }

    /// An obstacle-free map.
    pub fn free(rows: usize, cols: usize) -> Result<Self> {
        Self::new(rows, cols, vec![FREE_CELL; rows * cols], DEFAULT_OBSTACLE)
    }

    /// Parse a text map: `#` or `1` is an obstacle, `.` or `0` is free.
    ///
    /// Blank lines and surrounding whitespace are ignored; every row must have
    /// the same width.
    ///
    /// ```
    /// use swarmpath::planner::{GridCoord, OccupancyMap};
    ///
    /// let map = OccupancyMap::parse_ascii("..#\n.##\n...").unwrap();
    /// assert_eq!((map.rows(), map.cols()), (3, 3));
    /// assert!(map.is_obstacle(GridCoord::new(2, 0)));
    /// ```
    pub fn parse_ascii(text: &str) -> Result<Self> {
        let mut cells = Vec::new();
        let mut rows = 0;
        let mut cols = None;

        for (line_num, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let width = line.chars().count();
            match cols {
                None => cols = Some(width),
                Some(c) if c != width => {
                    return Err(PlannerError::MapFormat(format!(
                        "line {}: expected {c} cells, got {width}",
                        line_num + 1
                    )));
                }
                Some(_) => {}
            }
            for ch in line.chars() {
                let cell = match ch {
                    '#' | '1' => DEFAULT_OBSTACLE,
                    '.' | '0' => FREE_CELL,
                    other => {
                        return Err(PlannerError::MapFormat(format!(
                            "line {}: unexpected character {other:?}",
                            line_num + 1
                        )));
                    }
                };
                cells.push(cell);
            }
            rows += 1;
        }

        Self::new(rows, cols.unwrap_or(0), cells, DEFAULT_OBSTACLE)
    }

    /// Read and parse a text map file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_ascii(&content)
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Obstacle sentinel value.
    #[must_use]
    pub fn obstacle_value(&self) -> u8 {
        self.obstacle
    }

    /// Whether the pixel is inside `[0, cols) x [0, rows)`.
    #[inline]
    #[must_use]
    pub fn contains(&self, coord: GridCoord) -> bool {
        usize::try_from(coord.x).is_ok_and(|x| x < self.cols)
            && usize::try_from(coord.y).is_ok_and(|y| y < self.rows)
    }

    /// Cell value, `None` outside the map.
    #[inline]
    #[must_use]
    pub fn get(&self, coord: GridCoord) -> Option<u8> {
        if self.contains(coord) {
            Some(self.cells[coord.y as usize * self.cols + coord.x as usize])
        } else {
            None
        }
    }

    /// Whether the pixel holds the obstacle sentinel. Outside pixels are not
    /// obstacles.
    #[inline]
    #[must_use]
    pub fn is_obstacle(&self, coord: GridCoord) -> bool {
        self.get(coord) == Some(self.obstacle)
    }

    /// Mark a pixel as obstacle or free.
    pub fn set_obstacle(&mut self, coord: GridCoord, obstacle: bool) {
        if self.contains(coord) {
            let idx = coord.y as usize * self.cols + coord.x as usize;
            self.cells[idx] = if obstacle {
                self.obstacle
            } else if self.obstacle == FREE_CELL {
                DEFAULT_OBSTACLE
            } else {
                FREE_CELL
            };
        }
    }

    /// Fill an axis-aligned rectangle (inclusive corners) with obstacles.
    pub fn fill_rect(&mut self, from: GridCoord, to: GridCoord) {
        for y in from.y.min(to.y)..=from.y.max(to.y) {
            for x in from.x.min(to.x)..=from.x.max(to.x) {
                self.set_obstacle(GridCoord::new(x, y), true);
            }
        }
    }

    /// Reject pixels outside the map.
    pub fn check_bounds(&self, coord: GridCoord) -> Result<()> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(PlannerError::OutOfBounds {
                point: coord,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Number of obstacle cells.
    #[must_use]
    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == self.obstacle).count()
    }

    /// Draw `path` over the map: `#` obstacle, `.` free, `*` path, `X` path
    /// pixel on an obstacle, `S`/`E` the first and last path pixels.
    #[must_use]
    pub fn render_path(&self, path: &[GridCoord]) -> String {
        let mut canvas: Vec<Vec<char>> = (0..self.rows)
            .map(|y| {
                (0..self.cols)
                    .map(|x| {
                        if self.cells[y * self.cols + x] == self.obstacle {
                            '#'
                        } else {
                            '.'
                        }
                    })
                    .collect()
            })
            .collect();

        for &p in path {
            if self.contains(p) {
                let cell = &mut canvas[p.y as usize][p.x as usize];
                *cell = if *cell == '#' || *cell == 'X' { 'X' } else { '*' };
            }
        }
        if let (Some(&first), Some(&last)) = (path.first(), path.last()) {
            for (p, ch) in [(first, 'S'), (last, 'E')] {
                if self.contains(p) {
                    canvas[p.y as usize][p.x as usize] = ch;
                }
            }
        }

        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in canvas {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}
