//! The puzzle grid and the binarization that produces it.

mod difficulty;

pub use difficulty::{DifficultyLevel, ParseDifficultyError};

use image::GrayImage;

/// Square boolean puzzle, indexed `[x][y]`. `true` = filled (black) cell.
///
/// Built once at the end of the pipeline and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonogramGrid {
    size: usize,
    /// Column-major: cell `(x, y)` lives at `x * size + y`.
    cells: Vec<bool>,
}

impl NonogramGrid {
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for x in 0..size {
            for y in 0..size {
                cells.push(f(x, y));
            }
        }
        Self { size, cells }
    }

    /// Cells per side.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[x * self.size + y]
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// One column per `x`, each holding the cells for `y = 0..size`.
    pub fn columns(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks_exact(self.size.max(1))
    }

    /// Nested `[x][y]` representation.
    pub fn to_nested(&self) -> Vec<Vec<bool>> {
        self.columns().map(<[bool]>::to_vec).collect()
    }

    /// Lengths of consecutive filled runs along each row, top to bottom.
    ///
    /// An empty row yields an empty list.
    pub fn row_clues(&self) -> Vec<Vec<usize>> {
        (0..self.size)
            .map(|y| runs((0..self.size).map(|x| self.get(x, y))))
            .collect()
    }

    /// Lengths of consecutive filled runs along each column, left to right.
    pub fn column_clues(&self) -> Vec<Vec<usize>> {
        self.columns().map(|col| runs(col.iter().copied())).collect()
    }

    /// Render as text, one row per line: `#` filled, `.` empty.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.size * (self.size + 1));
        for y in 0..self.size {
            for x in 0..self.size {
                out.push(if self.get(x, y) { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

fn runs(cells: impl Iterator<Item = bool>) -> Vec<usize> {
    let mut clues = Vec::new();
    let mut current = 0;
    for filled in cells {
        if filled {
            current += 1;
        } else if current > 0 {
            clues.push(current);
            current = 0;
        }
    }
    if current > 0 {
        clues.push(current);
    }
    clues
}

/// Fill every cell whose brightness is strictly below `threshold`.
///
/// Brightness equal to the threshold stays empty. `gray` must be square;
/// the grid size is its width.
pub fn binarize(gray: &GrayImage, threshold: i32) -> NonogramGrid {
    debug_assert_eq!(gray.width(), gray.height(), "puzzle image must be square");
    let size = gray.width() as usize;
    NonogramGrid::from_fn(size, |x, y| {
        (gray.get_pixel(x as u32, y as u32).0[0] as i32) < threshold
    })
}
