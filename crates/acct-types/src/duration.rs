/// Render a number of seconds as `HH:MM:SS.ss`.
///
/// Hours are not wrapped and grow past two digits as needed; seconds keep
/// two decimal places. Negative and non-finite input renders as zero.
///
/// ```text
///   0.0      →  00:00:00.00
///   3661.5   →  01:01:01.50
///   360000.0 →  100:00:00.00
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_duration(total_seconds: f64) -> String {
  let total = if total_seconds.is_finite() {
    total_seconds.max(0.0)
  } else {
    0.0
  };

  let hours = (total / 3600.0).floor() as u64;
  let minutes = ((total % 3600.0) / 60.0).floor() as u64;
  let seconds = total % 60.0;

  format!("{hours:02}:{minutes:02}:{seconds:05.2}")
}
