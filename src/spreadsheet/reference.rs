/// Converts an A1-style reference to zero-based `(row, col)` indexes.
///
/// Absolute markers (`$B$7`) are accepted. Returns `None` for anything that is
/// not a column letter run followed by a positive row number.
pub(crate) fn reference_to_index(reference: &str) -> Option<(usize, usize)> {
    let reference = reference.trim().replace('$', "");
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let col = letters
        .to_ascii_uppercase()
        .bytes()
        .map(|letter| (letter - b'A') as usize + 1)
        .try_fold(0usize, |index, digit| index.checked_mul(26)?.checked_add(digit))?
        .checked_sub(1)?;
    let row = digits.parse::<usize>().ok().filter(|row| *row > 0)? - 1;
    Some((row, col))
}
