use proptest::prelude::*;

use pistonite_ga as ga;

use ga::Series;
use ga::bar::BarLayout;

fn layout(width: usize, primary: f64, subs: &[f64]) -> (usize, Vec<usize>, Option<usize>, usize) {
    let layout = BarLayout::compute(width, primary, subs, 9, true);
    (
        layout.primary_cells,
        layout.sub_cells,
        layout.partial,
        layout.empty_cells,
    )
}

/// Counts of the unallocated part and of each subcounter, and the total
fn counts() -> impl Strategy<Value = (usize, Vec<usize>, usize)> {
    (
        0usize..=50,
        prop::collection::vec(0usize..=50, 1..=5),
        0usize..=50,
    )
        .prop_map(|(primary, subs, slack)| {
            let total = (primary + subs.iter().sum::<usize>() + slack).max(1);
            (primary, subs, total)
        })
}

fn fractions(primary: usize, subs: &[usize], total: usize) -> (f64, Vec<f64>) {
    let total = total as f64;
    let subs = subs.iter().map(|x| *x as f64 / total).collect();
    (primary as f64 / total, subs)
}

proptest! {
    #[test]
    fn test_full_cells_without_subcounters(
        width in 0usize..=400,
        (count, total) in (1usize..=5000).prop_flat_map(|total| (0..=total, Just(total))),
    ) {
        let layout = BarLayout::compute(width, count as f64 / total as f64, &[], 9, true);
        let expected = width * count / total;
        prop_assert_eq!(layout.full_cells(), expected);
        prop_assert_eq!(layout.primary_cells, expected);
        let partial = usize::from(layout.partial.is_some());
        prop_assert_eq!(expected + partial + layout.empty_cells, width);
    }

    #[test]
    fn test_full_cells_with_subcounters(
        width in 0usize..=200,
        (primary, subs, total) in counts(),
    ) {
        let (p0, fractions) = fractions(primary, &subs, total);
        let layout = BarLayout::compute(width, p0, &fractions, 9, true);
        let allocated: usize = subs.iter().sum();
        prop_assert_eq!(layout.full_cells(), width * (primary + allocated) / total);
        // only subcounters get the cells lost to rounding
        prop_assert_eq!(layout.primary_cells, width * primary / total);
        for (cells, count) in layout.sub_cells.iter().zip(&subs) {
            let floor = width * count / total;
            prop_assert!(*cells == floor || *cells == floor + 1);
        }
        let partial = usize::from(layout.partial.is_some());
        prop_assert_eq!(layout.full_cells() + partial + layout.empty_cells, width);
    }

    #[test]
    fn test_primary_less_than_one_cell(
        width in 2usize..=100,
        subs in prop::collection::vec(0usize..=20, 2..=5),
        slack in 0usize..=20,
    ) {
        // the unallocated part is nonzero but smaller than a cell
        let allocated: usize = subs.iter().sum();
        let total = (allocated + 1 + slack).max(width + 1);
        let (p0, fractions) = fractions(1, &subs, total);
        let layout = BarLayout::compute(width, p0, &fractions, 9, true);
        let full = width * (allocated + 1) / total;
        prop_assert_eq!(layout.primary_cells, 0);
        prop_assert_eq!(layout.full_cells(), full);
        prop_assert_eq!(layout.partial.is_some(), full < width);
        let partial = usize::from(layout.partial.is_some());
        prop_assert_eq!(full + partial + layout.empty_cells, width);
    }
}

#[test]
fn test_largest_remainder() {
    // 3.4 cells: floor of each share alone would give 2 or 4
    assert_eq!(layout(10, 0.0, &[0.34]).1, vec![3]);
    // 1.7 and 1.7: the tie goes to the later subcounter
    assert_eq!(layout(10, 0.1, &[0.17, 0.17]), (1, vec![1, 2], Some(3), 5));
    assert_eq!(layout(10, 0.05, &[0.3, 0.26]), (0, vec![3, 3], Some(1), 3));
    assert_eq!(layout(7, 0.3, &[0.3, 0.3]), (2, vec![2, 2], Some(2), 0));
    assert_eq!(layout(10, 0.5, &[0.5]), (5, vec![5], None, 0));
}

#[test]
fn test_out_of_range_fractions() {
    // capped at the whole bar
    assert_eq!(layout(10, 0.0, &[0.8, 0.8]), (0, vec![8, 2], None, 0));
    assert_eq!(layout(10, f64::NAN, &[-0.5, 2.0]), (0, vec![0, 10], None, 0));
    assert_eq!(layout(0, 0.5, &[0.2]), (0, vec![0], None, 0));
}

#[test]
fn test_partial_glyph() {
    // only drawn when requested
    let layout = BarLayout::compute(10, 0.0, &[0.45], 9, false);
    assert_eq!(layout.partial, None);
    assert_eq!(layout.empty_cells, 6);

    let layout = BarLayout::compute(10, 0.36, &[], 3, true);
    assert_eq!(layout.partial, Some(1));
    assert_eq!(layout.empty_cells, 6);

    // a 2-glyph series has no fractional glyphs
    let layout = BarLayout::compute(10, 0.36, &[], 2, true);
    assert_eq!(layout.partial, None);
    assert_eq!(layout.empty_cells, 7);

    let layout = BarLayout::compute(10, 1.0, &[], 9, true);
    assert_eq!(layout.primary_cells, 10);
    assert_eq!(layout.partial, None);
}

#[test]
fn test_draw() {
    let series = Series::new(" ▏▎▍▌▋▊▉█").unwrap();
    let colorize = |i: usize, run: &str| {
        if i == 0 {
            run.to_string()
        } else {
            format!("<{i}{run}>")
        }
    };
    let bar = BarLayout::compute(10, 0.1, &[0.17, 0.17], series.len(), true).draw(&series, colorize);
    assert_eq!(bar, "<2██><1█>█▍     ");

    let bar = BarLayout::compute(10, 0.0, &[0.8, 0.8], series.len(), true).draw(&series, colorize);
    assert_eq!(bar, "<2██><1████████>");

    let series = Series::new(" =#").unwrap();
    let bar = BarLayout::compute(10, 0.36, &[], series.len(), true).draw(&series, colorize);
    assert_eq!(bar, "###=      ");

    let bar = BarLayout::compute(0, 0.5, &[], series.len(), true).draw(&series, colorize);
    assert_eq!(bar, "");
}
