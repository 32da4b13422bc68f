/// Window of `upstream + downstream + 1` values centred on `pos`.
///
/// The left part is `values[pos - upstream..pos]`, left-padded with
/// `T::default()` when `pos < upstream`. The right part is
/// `values[pos..=pos + downstream]` when more than `downstream` positions
/// remain before `boundary`; otherwise it is cut at `boundary` (or the end
/// of `values`) and right-padded.
pub fn extract_window<T: Copy + Default>(
    values: &[T],
    pos: usize,
    upstream: usize,
    downstream: usize,
    boundary: usize,
) -> Vec<T> {
    let right_end = if boundary.saturating_sub(pos) > downstream {
        pos + downstream + 1
    } else {
        boundary.min(pos + downstream + 1)
    };
    let at = |idx: usize| values.get(idx).copied().unwrap_or_default();

    let left = (pos as i64 - upstream as i64..pos as i64).map(|idx| {
        if idx < 0 {
            T::default()
        } else {
            at(idx as usize)
        }
    });
    let right = (pos..pos + downstream + 1).map(|idx| {
        if idx < right_end {
            at(idx)
        } else {
            T::default()
        }
    });

    left.chain(right).collect()
}
