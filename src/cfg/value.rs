/// Leading integer of a cfg value: optional sign then digits, anything after
/// is ignored (`-3abc` reads as `-3`, `416px` as `416`).
pub fn leading_int(raw: &str) -> Option<i64> {
    let text = raw.trim_start();
    let start = usize::from(text.starts_with(['+', '-']));
    let end = text[start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text.len(), |i| start + i);
    if end == start {
        return None;
    }
    text[..end].parse().ok()
}
