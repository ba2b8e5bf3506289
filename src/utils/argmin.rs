/// Returns the index and value of the minimum of a sequence of
/// `(index, value)` pairs, or `None` if the sequence is empty.
///
/// Ties are broken in favor of the earliest pair.
pub fn argmin<T: PartialOrd + Copy>(
    pairs: impl IntoIterator<Item = (usize, T)>,
) -> Option<(usize, T)> {
    let mut argmin: Option<(usize, T)> = None;
    for (i, value) in pairs {
        if argmin.map_or(true, |(_, min)| value < min) {
            argmin = Some((i, value));
        }
    }
    argmin
}
