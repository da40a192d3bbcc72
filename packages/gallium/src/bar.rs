//! Bar compositor
//!
//! Splits the cells of a bar among the primary segment (the part of the
//! count not allocated to any subcounter) and the subcounter segments.
//!
//! The number of full cells of the whole bar is always `floor(width * total)`,
//! where `total` is the sum of all percentages. Each segment first gets the
//! floor of its own share, then the cells lost to rounding are awarded one at a time
//! to the subcounter with the largest fractional remainder. Ties go to
//! the subcounter created later.
//!
//! ```rust
//! # use pistonite_ga as ga;
//! use ga::bar::BarLayout;
//!
//! // 10 cells, nothing unallocated, 3 subcounters with 34%, 33% and 33%
//! let layout = BarLayout::compute(10, 0.0, &[0.34, 0.33, 0.33], 9, false);
//! assert_eq!(layout.full_cells(), 10);
//! assert_eq!(layout.sub_cells, vec![4, 3, 3]);
//! ```

use crate::Series;

/// Cells of each segment in a bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarLayout {
    /// Full cells of the primary segment
    pub primary_cells: usize,
    /// Full cells of each subcounter, in creation order
    pub sub_cells: Vec<usize>,
    /// Index of the fractional glyph drawn after the full cells, if any
    pub partial: Option<usize>,
    /// Empty cells at the end
    pub empty_cells: usize,
}

impl BarLayout {
    /// Compute the layout
    ///
    /// - `width`: number of cells in the bar
    /// - `primary`: fraction of the total not allocated to subcounters
    /// - `subs`: fraction of each subcounter, in creation order
    /// - `glyphs`: number of glyphs in the series
    /// - `draw_partial`: if the fractional glyph should be drawn. It is drawn only when
    ///   there is unallocated count, since subcounter segments only have full cells.
    ///   A series without fractional glyphs (2 glyphs) never draws it
    ///
    /// Fractions are clamped to `0.0..=1.0`, and the sum is capped at `1.0`.
    pub fn compute(
        width: usize,
        primary: f64,
        subs: &[f64],
        glyphs: usize,
        draw_partial: bool,
    ) -> Self {
        let primary = clamp_fraction(primary);
        let subs: Vec<f64> = subs.iter().copied().map(clamp_fraction).collect();
        let total = (primary + subs.iter().sum::<f64>()).min(1.0);
        let exact = width as f64 * total;
        let full = cells(exact).min(width);

        let mut primary_cells = cells(width as f64 * primary);
        let mut sub_cells = Vec::with_capacity(subs.len());
        let mut remainders = Vec::with_capacity(subs.len());
        for (i, p) in subs.iter().enumerate() {
            let exact = width as f64 * p;
            let whole = cells(exact);
            sub_cells.push(whole);
            remainders.push((exact - whole as f64, i));
        }

        let mut allocated = primary_cells + sub_cells.iter().sum::<usize>();
        // float error can put the floors over the whole-bar floor
        while allocated > full {
            if primary_cells > 0 {
                primary_cells -= 1;
            } else if let Some(x) = sub_cells.iter_mut().rev().find(|x| **x > 0) {
                *x -= 1;
            } else {
                break;
            }
            allocated -= 1;
        }

        // largest remainder last
        remainders.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        while allocated < full {
            match remainders.pop() {
                Some((_, i)) => sub_cells[i] += 1,
                None => primary_cells += 1,
            }
            allocated += 1;
        }

        let partial = if full < width && draw_partial && glyphs > 2 {
            let fraction = (exact - full as f64).clamp(0.0, 1.0);
            // as: rounded and in range of glyph count
            Some((fraction * (glyphs - 1) as f64).round() as usize)
        } else {
            None
        };
        let empty_cells = width - full - usize::from(partial.is_some());

        Self {
            primary_cells,
            sub_cells,
            partial,
            empty_cells,
        }
    }

    /// Total number of full cells in all segments
    pub fn full_cells(&self) -> usize {
        self.primary_cells + self.sub_cells.iter().sum::<usize>()
    }

    /// Draw the bar with the glyphs.
    ///
    /// Subcounter segments are drawn first, newest first, followed by the primary segment,
    /// the fractional glyph and the empty cells. `colorize(i, run)` is called
    /// for the full-cell run of each segment, with `i = 0` for the primary segment and
    /// `i = n` for the `n`-th subcounter. Empty runs are skipped.
    ///
    /// ```rust
    /// # use pistonite_ga as ga;
    /// use ga::Series;
    /// use ga::bar::BarLayout;
    ///
    /// let series = Series::new(" ▏▎▍▌▋▊▉█")?;
    /// let layout = BarLayout::compute(10, 0.25, &[0.2], series.len(), true);
    /// let bar = layout.draw(&series, |i, run| {
    ///     if i == 0 { run.to_string() } else { format!("<{run}>") }
    /// });
    /// assert_eq!(bar, "<██>██▌     ");
    /// # Ok::<(), ga::Error>(())
    /// ```
    pub fn draw(&self, series: &Series, mut colorize: impl FnMut(usize, &str) -> String) -> String {
        let mut out = String::new();
        let full = series.full();
        for (i, cells) in self.sub_cells.iter().enumerate().rev() {
            if *cells == 0 {
                continue;
            }
            let run: String = std::iter::repeat_n(full, *cells).collect();
            out.push_str(&colorize(i + 1, &run));
        }
        if self.primary_cells > 0 {
            let run: String = std::iter::repeat_n(full, self.primary_cells).collect();
            out.push_str(&colorize(0, &run));
        }
        if let Some(index) = self.partial {
            out.push(series.glyph(index));
        }
        out.extend(std::iter::repeat_n(series.empty(), self.empty_cells));
        out
    }
}

/// Whole cells in `x`. Values within float error below an integer count as the integer
fn cells(x: f64) -> usize {
    // as: saturating, x is non-negative
    (x + CELL_EPSILON).floor() as usize
}

const CELL_EPSILON: f64 = 1e-9;

fn clamp_fraction(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}
