//! Column scanner for calibration charts
//!
//! Each column is walked from the bottom edge upward. The chart prints one
//! dark band per curve on a light background; for each band we record its
//! distance from the bottom edge (in rows, counting the bottom row as 1).

use crate::image::Rgb16Image;

/// Samples below this on every channel count as chart ink (half scale).
pub const BLACK_POINT: u16 = 32768;

/// Distances of one band from the bottom edge, one entry per scanned column.
pub type BandLengths = Vec<u32>;

#[inline]
pub fn is_dark(rgb: [u16; 3]) -> bool {
    rgb.iter().all(|&v| v < BLACK_POINT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Walking through background towards `band`. The top row is tested too.
    SeekDark { band: usize },
    /// Inside `band`, waiting for background before the next one.
    InBand { band: usize },
    /// Every expected band of the column was recorded.
    ColumnDone,
    /// Passed the top row while a band was still expected.
    Exhausted,
}

/// Scan one column, appending each band found to `lengths`.
///
/// Returns `ColumnDone` or `Exhausted`.
fn scan_column(image: &Rgb16Image, x: u32, lengths: &mut [BandLengths]) -> ScanState {
    let height = image.height();
    let last_band = lengths.len() - 1;
    // rows left to visit above the current position
    let mut remaining = height;
    let mut state = ScanState::SeekDark { band: 0 };

    loop {
        state = match state {
            ScanState::ColumnDone | ScanState::Exhausted => return state,
            ScanState::SeekDark { band } => {
                if remaining == 0 {
                    ScanState::Exhausted
                } else {
                    remaining -= 1;
                    if is_dark(image.pixel(x, remaining)) {
                        lengths[band].push(height - remaining);
                        ScanState::InBand { band }
                    } else {
                        ScanState::SeekDark { band }
                    }
                }
            }
            ScanState::InBand { band } if band == last_band => ScanState::ColumnDone,
            ScanState::InBand { band } => {
                if remaining == 0 {
                    ScanState::Exhausted
                } else {
                    remaining -= 1;
                    if is_dark(image.pixel(x, remaining)) {
                        ScanState::InBand { band }
                    } else {
                        ScanState::SeekDark { band: band + 1 }
                    }
                }
            }
        };
    }
}

/// Scan columns left to right, collecting `band_count` band-length sequences.
///
/// The first column that runs out of chart before all of its bands are found
/// ends the scan; bands it did record are kept.
pub(crate) fn scan_columns(image: &Rgb16Image, band_count: usize) -> Vec<BandLengths> {
    let mut lengths = vec![BandLengths::new(); band_count];
    if band_count == 0 {
        return lengths;
    }

    for x in 0..image.width() {
        if scan_column(image, x, &mut lengths) == ScanState::Exhausted {
            log::debug!("Chart data ends at column {}", x);
            break;
        }
    }

    lengths
}
