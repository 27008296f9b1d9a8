use rand::Rng;

use crate::canvas::Canvas;

/// Radius range for every candidate, in pixels (inclusive).
pub const RADIUS_MIN: u32 = 5;
pub const RADIUS_MAX: u32 = 30;

/// Policy for how a candidate's color and position relate to the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RandomMode {
    /// Color sampled from the source at the draw position itself.
    Match,
    /// Color sampled at one random position, drawn at an independent one.
    Sample,
    /// Fully random color, unrelated to the source.
    Random,
}

impl RandomMode {
    /// Map the CLI's numeric `-m` flag.
    pub fn from_flag(value: u8) -> Option<Self> {
        match value {
            0 => Some(RandomMode::Match),
            1 => Some(RandomMode::Sample),
            2 => Some(RandomMode::Random),
            _ => None,
        }
    }
}

/// One proposed circle. Ephemeral: produced fresh each iteration and never
/// stored. In `Random` mode `color` may carry junk above bit 23; those bits
/// are ignored by both the rasterizer and the color metric.
#[derive(Clone, Copy, Debug)]
pub struct Candidate {
    pub cx: u32,
    pub cy: u32,
    pub radius: u32,
    pub color: u32,
}

/// Draw one candidate. All coordinates are uniform over the image extent,
/// the radius uniform over [RADIUS_MIN, RADIUS_MAX] regardless of mode.
pub fn generate<R: Rng>(rng: &mut R, source: &Canvas, mode: RandomMode) -> Candidate {
    profiling::scope!("generate_candidate");
    let (w, h) = (source.width(), source.height());

    let mut cx = rng.random_range(0..w);
    let mut cy = rng.random_range(0..h);

    let color = match mode {
        RandomMode::Random => rng.random::<u32>(),
        _ => source.pixel(cx, cy),
    };

    // relocate the draw position unless the mode pins it to the sample
    if mode != RandomMode::Match {
        cx = rng.random_range(0..w);
        cy = rng.random_range(0..h);
    }

    let radius = rng.random_range(RADIUS_MIN..=RADIUS_MAX);
    Candidate { cx, cy, radius, color }
}
