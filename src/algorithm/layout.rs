//! Force-directed graph layout.
//!
//! Fruchterman-Reingold with linear cooling. Every node repels every other
//! node with force `k² / d`, and edges pull their endpoints together with
//! force `d² / k`. Each iteration moves a node along its net force by at
//! most the current temperature. Final positions are centered on the origin
//! and scaled into `[-scale, scale]`.

use std::collections::BTreeMap;
use std::time::Instant;

use log::{debug, info};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::algorithm::network::ProviderNetwork;
use crate::error::{NetworkError, Result};
use crate::models::ProviderId;
use crate::utils::logging::{create_main_progress_bar, finish_progress_bar};

/// Smallest distance used in force calculations
const MIN_DISTANCE: f64 = 0.01;

/// Configuration for the force-directed layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Optimal distance between nodes; `None` uses `1 / sqrt(n)`
    pub k: Option<f64>,
    /// Maximum number of iterations
    pub iterations: usize,
    /// Seed for the initial random positions
    pub seed: u64,
    /// Stop early once the mean displacement per node falls below this
    pub threshold: f64,
    /// Half-width of the square the final positions are scaled into
    pub scale: f64,
    /// Scale attraction by `ln(1 + shared revenue)` instead of a unit weight
    pub weighted: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            k: Some(2.0),
            iterations: 50,
            seed: 42,
            threshold: 1e-4,
            scale: 1.0,
            weighted: false,
        }
    }
}

impl LayoutConfig {
    /// Check that every value is usable
    pub fn validate(&self) -> Result<()> {
        if let Some(k) = self.k
            && !(k.is_finite() && k > 0.0)
        {
            return Err(NetworkError::config(format!(
                "layout k must be a positive number, got {k}"
            )));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(NetworkError::config(format!(
                "layout scale must be a positive number, got {}",
                self.scale
            )));
        }
        if !(self.threshold.is_finite() && self.threshold >= 0.0) {
            return Err(NetworkError::config("layout threshold must be non-negative"));
        }
        Ok(())
    }
}

/// A 2D position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Computed node positions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    positions: BTreeMap<ProviderId, Position>,
    /// Iterations actually run
    pub iterations: usize,
}

impl Layout {
    #[must_use]
    pub fn position(&self, id: &ProviderId) -> Option<Position> {
        self.positions.get(id).copied()
    }

    pub fn positions(&self) -> impl Iterator<Item = (&ProviderId, &Position)> {
        self.positions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Force-directed layout engine
#[derive(Debug, Clone, Default)]
pub struct ForceDirectedLayout {
    pub config: LayoutConfig,
}

impl ForceDirectedLayout {
    #[must_use]
    pub const fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Lay out every node of the network
    #[must_use]
    pub fn compute(&self, network: &ProviderNetwork) -> Layout {
        let ids: Vec<ProviderId> = network.nodes().map(|n| n.id().clone()).collect();
        let n = ids.len();

        match n {
            0 => return Layout::default(),
            1 => {
                let mut positions = BTreeMap::new();
                positions.insert(ids[0].clone(), Position::default());
                return Layout {
                    positions,
                    iterations: 0,
                };
            }
            _ => {}
        }

        let start = Instant::now();
        info!("Computing layout for {n} providers");

        let index: BTreeMap<&ProviderId, usize> =
            ids.iter().enumerate().map(|(i, id)| (id, i)).collect();
        let edges: Vec<(usize, usize, f64)> = network
            .edges()
            .iter()
            .filter_map(|e| {
                let a = *index.get(e.pair.low())?;
                let b = *index.get(e.pair.high())?;
                let weight = if self.config.weighted {
                    e.shared_revenue.max(0.0).ln_1p().max(1.0)
                } else {
                    1.0
                };
                Some((a, b, weight))
            })
            .collect();

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut pos: Vec<[f64; 2]> = (0..n)
            .map(|_| [rng.random::<f64>(), rng.random::<f64>()])
            .collect();

        let k = self.config.k.unwrap_or_else(|| (1.0 / n as f64).sqrt());
        let mut temperature = spread(&pos) * 0.1;
        let cooling = temperature / (self.config.iterations as f64 + 1.0);

        let pb = create_main_progress_bar(self.config.iterations as u64, Some("Layout"));
        let mut iterations = 0;
        for _ in 0..self.config.iterations {
            iterations += 1;
            let displacement = forces(&pos, &edges, k);

            let mut moved = 0.0;
            for (p, d) in pos.iter_mut().zip(&displacement) {
                let length = d[0].hypot(d[1]).max(MIN_DISTANCE);
                let step = [d[0] * temperature / length, d[1] * temperature / length];
                p[0] += step[0];
                p[1] += step[1];
                moved += step[0].hypot(step[1]);
            }

            temperature -= cooling;
            pb.inc(1);

            if moved / (n as f64) < self.config.threshold {
                debug!("Layout converged after {iterations} iterations");
                break;
            }
        }
        finish_progress_bar(&pb, Some("Layout complete"));

        rescale(&mut pos, self.config.scale);
        info!("Layout computed in {:?}", start.elapsed());

        Layout {
            positions: ids
                .into_iter()
                .zip(pos)
                .map(|(id, [x, y])| (id, Position::new(x, y)))
                .collect(),
            iterations,
        }
    }
}

/// Net displacement of every node for one iteration
fn forces(pos: &[[f64; 2]], edges: &[(usize, usize, f64)], k: f64) -> Vec<[f64; 2]> {
    let n = pos.len();
    let mut displacement = vec![[0.0_f64; 2]; n];
    let k_squared = k * k;

    for i in 0..n {
        for j in (i + 1)..n {
            let dx = pos[i][0] - pos[j][0];
            let dy = pos[i][1] - pos[j][1];
            let distance = dx.hypot(dy).max(MIN_DISTANCE);
            let repulsion = k_squared / (distance * distance);
            displacement[i][0] += dx * repulsion;
            displacement[i][1] += dy * repulsion;
            displacement[j][0] -= dx * repulsion;
            displacement[j][1] -= dy * repulsion;
        }
    }

    for &(a, b, weight) in edges {
        let dx = pos[a][0] - pos[b][0];
        let dy = pos[a][1] - pos[b][1];
        let distance = dx.hypot(dy).max(MIN_DISTANCE);
        let attraction = weight * distance / k;
        displacement[a][0] -= dx * attraction;
        displacement[a][1] -= dy * attraction;
        displacement[b][0] += dx * attraction;
        displacement[b][1] += dy * attraction;
    }

    displacement
}

/// Largest extent of the positions along either axis
fn spread(pos: &[[f64; 2]]) -> f64 {
    let extent = |axis: usize| {
        let (min, max) = pos.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p[axis]), hi.max(p[axis]))
        });
        max - min
    };
    extent(0).max(extent(1))
}

/// Center positions on the origin and scale the largest coordinate to `scale`
fn rescale(pos: &mut [[f64; 2]], scale: f64) {
    let n = pos.len() as f64;
    let mean = pos
        .iter()
        .fold([0.0, 0.0], |acc, p| [acc[0] + p[0] / n, acc[1] + p[1] / n]);

    let mut max_abs = 0.0_f64;
    for p in pos.iter_mut() {
        p[0] -= mean[0];
        p[1] -= mean[1];
        max_abs = max_abs.max(p[0].abs()).max(p[1].abs());
    }

    if max_abs > 0.0 {
        for p in pos.iter_mut() {
            p[0] *= scale / max_abs;
            p[1] *= scale / max_abs;
        }
    }
}
