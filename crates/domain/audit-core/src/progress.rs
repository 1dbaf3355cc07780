/// Completion percentage after `emitted` of `total` steps, rounded half up.
///
/// Reaches 100 only when `emitted == total`; with more than 200 steps the
/// rounded value of an unfinished run is held at 99.
pub fn progress_percent(emitted: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let k = emitted.min(total) as u64;
    let n = total as u64;
    // round(100k/n) == floor((200k + n) / 2n)
    let pct = ((200 * k + n) / (2 * n)) as u8;
    if k < n {
        pct.min(99)
    } else {
        pct
    }
}
