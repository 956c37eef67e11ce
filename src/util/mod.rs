//! Shared utilities: logging, argument parsing.

use tracing::Level;

/// Initialize tracing with env filter. Safe to call once at startup.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse a comma-separated ship ID list. Empty entries and `null` are empty positions.
pub fn parse_id_list(s: &str) -> Result<Vec<Option<i64>>, String> {
    s.split(',')
        .map(str::trim)
        .map(|part| match part {
            "" | "null" => Ok(None),
            n => n
                .parse::<i64>()
                .map(Some)
                .map_err(|e| format!("invalid ship id {:?}: {}", n, e)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_list_handles_placeholders() {
        assert_eq!(
            parse_id_list(" 1501, -1,,null ,1502").unwrap(),
            vec![Some(1501), Some(-1), None, None, Some(1502)]
        );
        assert!(parse_id_list("1501,abc").is_err());
    }
}
