//! Dense per-channel histograms
//!
//! One counter per possible 16-bit sample value, so lookups are plain array
//! indexing.

use crate::image::{Rgb16Image, MAX_SAMPLE};

const NUM_BUCKETS: usize = MAX_SAMPLE as usize + 1;

/// Pixel counts for every sample value of one channel.
#[derive(Clone)]
pub struct ChannelHistogram {
    counts: Box<[u32]>,
}

impl std::fmt::Debug for ChannelHistogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelHistogram")
            .field("total", &self.total())
            .finish()
    }
}

impl Default for ChannelHistogram {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelHistogram {
    pub fn new() -> Self {
        Self {
            counts: vec![0u32; NUM_BUCKETS].into_boxed_slice(),
        }
    }

    #[inline]
    pub fn add(&mut self, value: u16) {
        self.counts[value as usize] += 1;
    }

    #[inline]
    pub fn count(&self, value: u16) -> u32 {
        self.counts[value as usize]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Lowest value whose count is strictly greater than `threshold`.
    pub fn first_above(&self, threshold: u32) -> Option<u16> {
        self.counts
            .iter()
            .position(|&count| count > threshold)
            .map(|i| i as u16)
    }

    /// Highest value whose count is strictly greater than `threshold`.
    pub fn last_above(&self, threshold: u32) -> Option<u16> {
        self.counts
            .iter()
            .rposition(|&count| count > threshold)
            .map(|i| i as u16)
    }
}

/// Rectangle `[x0, x1) x [y0, y1)` inside an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Region {
    /// Central region that leaves out `border_percent` of the width and height
    /// on every side.
    pub fn interior(width: u32, height: u32, border_percent: u32) -> Self {
        let border = u64::from(border_percent.min(100));
        let scale = |extent: u32, percent: u64| (u64::from(extent) * percent / 100) as u32;
        Self {
            x0: scale(width, border),
            y0: scale(height, border),
            x1: scale(width, 100 - border),
            y1: scale(height, 100 - border),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }
}

/// Build R, G and B histograms over `region` of `image`.
pub fn region_histograms(image: &Rgb16Image, region: Region) -> [ChannelHistogram; 3] {
    let mut histograms = [
        ChannelHistogram::new(),
        ChannelHistogram::new(),
        ChannelHistogram::new(),
    ];

    if region.is_empty() {
        return histograms;
    }

    for y in region.y0..region.y1.min(image.height()) {
        for x in region.x0..region.x1.min(image.width()) {
            for (histogram, value) in histograms.iter_mut().zip(image.pixel(x, y)) {
                histogram.add(value);
            }
        }
    }

    histograms
}
