//! Time formatting helpers.

/// Format a duration in seconds to a human-readable string.
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

/// Describe a block count together with its approximate wall-clock span.
///
/// `block_secs` of zero means the block time is unknown; only the count
/// is printed then.
pub fn format_blocks(blocks: u64, block_secs: u64) -> String {
    let unit = if blocks == 1 { "block" } else { "blocks" };
    if block_secs == 0 {
        return format!("{blocks} {unit}");
    }
    let secs = blocks.saturating_mul(block_secs);
    format!("{blocks} {unit} (~{})", format_duration(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(61), "1m 1s");
        assert_eq!(format_duration(7_260), "2h 1m");
        assert_eq!(format_duration(90_000), "1d 1h");
    }

    #[test]
    fn block_spans() {
        assert_eq!(format_blocks(1, 0), "1 block");
        assert_eq!(format_blocks(17_280, 5), "17280 blocks (~1d 0h)");
        assert_eq!(format_blocks(20, 5), "20 blocks (~1m 40s)");
    }
}
