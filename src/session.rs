use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::candidate::{self, RandomMode};
use crate::canvas::Canvas;
use crate::error::DrawResult;
use crate::fitness::{region_dist, total_dist};
use crate::geom::Region;

/// Running accept/reject counters for one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub accepted: u64,
    pub rejected: u64,
}

impl DrawStats {
    #[inline]
    pub fn total(&self) -> u64 {
        self.accepted + self.rejected
    }

    /// Accepted share in percent; 0 when nothing ran yet.
    pub fn success_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.accepted as f64 / self.total() as f64 * 100.0
        }
    }
}

/// End-of-run summary handed back to the caller.
#[derive(Clone, Copy, Debug)]
pub struct SessionReport {
    pub stats: DrawStats,
    pub elapsed: Duration,
    /// Mean color distance per pixel of the final canvas vs the source.
    pub mean_px_dist: f64,
}

/// Owns the source image, both working canvases, the RNG and the counters
/// for one complete run. The two canvases never alias; `accepted` always
/// holds the best-known reconstruction after each completed iteration.
pub struct Session {
    source: Canvas,
    accepted: Canvas,
    trial: Canvas,
    rng: Pcg32,
    mode: RandomMode,
    sample_step: u32,
    stats: DrawStats,
}

impl Session {
    /// Allocate both working canvases (blank opaque black, identical) and
    /// seed the generator: from `seed` for reproducible runs, from OS
    /// entropy otherwise.
    pub fn new(
        source: Canvas,
        mode: RandomMode,
        sample_step: u32,
        seed: Option<u64>,
    ) -> DrawResult<Self> {
        let (width, height) = (source.width(), source.height());
        let accepted = Canvas::new(width, height)?;
        let trial = Canvas::new(width, height)?;
        let rng = match seed {
            Some(s) => Pcg32::seed_from_u64(s),
            None => Pcg32::from_os_rng(),
        };
        Ok(Session {
            source,
            accepted,
            trial,
            rng,
            mode,
            sample_step,
            stats: DrawStats::default(),
        })
    }

    /// One hill-climb iteration: generate, rasterize onto the trial canvas,
    /// score the affected box on both canvases against the source, then
    /// commit or roll back. Ties roll back (strict improvement only), which
    /// also covers degenerate zero-area boxes where both sides score 0.
    pub fn step(&mut self) {
        profiling::scope!("step");
        let cand = candidate::generate(&mut self.rng, &self.source, self.mode);

        self.trial.fill_disc(cand.cx, cand.cy, cand.radius, cand.color);
        let region = Region::around_disc(
            cand.cx,
            cand.cy,
            cand.radius,
            self.source.width(),
            self.source.height(),
        );

        let trial_dist = region_dist(&self.trial, &self.source, region, self.sample_step);
        let accepted_dist = region_dist(&self.accepted, &self.source, region, self.sample_step);

        if trial_dist < accepted_dist {
            self.accepted.blit_from(&self.trial, region);
            self.stats.accepted += 1;
        } else {
            self.trial.blit_from(&self.accepted, region);
            self.stats.rejected += 1;
        }
    }

    /// Run exactly `iterations` steps. No early stopping exists; iterations
    /// cannot fail once the session is built.
    pub fn run(&mut self, iterations: u64) {
        profiling::scope!("run");
        for _ in 0..iterations {
            self.step();
        }
    }

    #[inline]
    pub fn stats(&self) -> DrawStats {
        self.stats
    }

    /// Best-known reconstruction; this is the canvas that gets encoded.
    #[inline]
    pub fn accepted_canvas(&self) -> &Canvas {
        &self.accepted
    }

    /// Scratch canvas. Equal to `accepted` between iterations; exposed for
    /// the rollback invariant checks.
    #[inline]
    pub fn trial_canvas(&self) -> &Canvas {
        &self.trial
    }

    #[inline]
    pub fn source(&self) -> &Canvas {
        &self.source
    }

    /// Summarize the finished run, including the whole-image mean per-pixel
    /// distance of the final canvas.
    pub fn report(&self, elapsed: Duration) -> SessionReport {
        let pixels = self.source.width() as u64 * self.source.height() as u64;
        let mean_px_dist = if pixels == 0 {
            0.0
        } else {
            total_dist(&self.accepted, &self.source) as f64 / pixels as f64
        };
        SessionReport {
            stats: self.stats,
            elapsed,
            mean_px_dist,
        }
    }
}
