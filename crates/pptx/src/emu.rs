//! English Metric Units. OOXML positions everything in EMU; the composer
//! speaks inches, so conversion lives in one place.

pub const EMU_PER_INCH: i64 = 914_400;

/// 10 x 7.5 in page.
pub const SLIDE_WIDTH_EMU: i64 = 10 * EMU_PER_INCH;
pub const SLIDE_HEIGHT_EMU: i64 = (75 * EMU_PER_INCH) / 10;

pub fn inches(value: f64) -> i64 {
    (value * EMU_PER_INCH as f64).round() as i64
}

/// Font sizes are serialized in hundredths of a point.
pub fn points_hundredths(points: u32) -> u32 {
    points * 100
}
