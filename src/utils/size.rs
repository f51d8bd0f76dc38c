//! Human-readable byte sizes for log output.

const KB: f64 = 1024.0;
const MB: f64 = 1024.0 * 1024.0;

/// Format `bytes` as `"<kb> KB (<mb> MB)"`.
#[allow(clippy::cast_precision_loss)] // display only
pub fn format_size(bytes: usize) -> String {
    let bytes = bytes as f64;
    format!("{:.2} KB ({:.2} MB)", bytes / KB, bytes / MB)
}
