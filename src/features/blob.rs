//! Scale-space blob detection (difference of Gaussians and Laplacian of
//! Gaussian).
//!
//! Both detectors build a stack of scale-normalized responses (`σ²·L`) and
//! keep the pixels that are maximal within a `window × window` neighborhood
//! across adjacent scales. The scale neighborhood shrinks at both ends of the
//! stack so the search never leaves it.
use crate::error::{Error, Result};
use crate::filters::{Filter, GaussianFilter, LaplacianOfGaussian};
use crate::grid::Grid;
use log::debug;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Blob {
    pub row: usize,
    pub col: usize,
    pub sigma: f32,
}

/// Parameters shared by both detectors.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ScaleSpace {
    initial_sigma: f32,
    k: f32,
    threshold: f32,
    window: usize,
    octaves: usize,
}

impl ScaleSpace {
    fn new(initial_sigma: f32, k: f32, threshold: f32, window: usize, octaves: usize) -> Result<Self> {
        if window % 2 == 0 {
            return Err(Error::invalid(format!("window must be odd, got {window}")));
        }
        if !(k > 1.0) {
            return Err(Error::invalid(format!("scale factor k must exceed 1, got {k}")));
        }
        if octaves == 0 {
            return Err(Error::invalid("octaves must be positive"));
        }
        if !(initial_sigma > 0.0) {
            return Err(Error::invalid(format!(
                "initial sigma must be positive, got {initial_sigma}"
            )));
        }
        Ok(Self {
            initial_sigma,
            k,
            threshold,
            window,
            octaves,
        })
    }

    fn sigmas(&self) -> impl Iterator<Item = f32> + '_ {
        (0..=self.octaves).map(move |i| self.initial_sigma * self.k.powi(i as i32))
    }
}

/// Local maxima of `stack` above `threshold`; `sigmas[i]` labels layer `i`.
fn local_maxima(stack: &[Grid], sigmas: &[f32], window: usize, threshold: f32) -> Vec<Blob> {
    let mut blobs = Vec::new();
    let Some(first) = stack.first() else {
        return blobs;
    };
    let (rows, cols) = first.shape();
    let half = window / 2;
    if rows <= 2 * half || cols <= 2 * half {
        return blobs;
    }

    for (layer, map) in stack.iter().enumerate() {
        let scale_half = half.min(layer).min(stack.len() - layer - 1);
        for row in half..rows - half {
            for col in half..cols - half {
                let v = map.at(row, col);
                if v <= threshold {
                    continue;
                }
                let neighborhood = &stack[layer - scale_half..=layer + scale_half];
                let is_max = neighborhood.iter().all(|s| {
                    (row - half..=row + half)
                        .all(|r| (col - half..=col + half).all(|c| s.at(r, c) <= v))
                });
                if is_max {
                    blobs.push(Blob {
                        row,
                        col,
                        sigma: sigmas[layer],
                    });
                }
            }
        }
    }
    blobs
}

fn mark(input: &Grid, blobs: &[Blob]) -> Result<Grid> {
    let mut out = Grid::zeros(input.rows(), input.cols());
    for b in blobs {
        out.set(b.row, b.col, b.sigma)?;
    }
    Ok(out)
}

/// Difference-of-Gaussians detector.
#[derive(Clone, Debug)]
pub struct BlobDog {
    space: ScaleSpace,
}

impl BlobDog {
    pub fn new(
        initial_sigma: f32,
        k: f32,
        threshold: f32,
        window: usize,
        octaves: usize,
    ) -> Result<Self> {
        Ok(Self {
            space: ScaleSpace::new(initial_sigma, k, threshold, window, octaves)?,
        })
    }

    /// One layer per consecutive sigma pair, scaled by the larger sigma².
    pub fn scale_space(&self, input: &Grid) -> Result<(Vec<Grid>, Vec<f32>)> {
        let mut layers = Vec::with_capacity(self.space.octaves);
        let mut labels = Vec::with_capacity(self.space.octaves);
        let mut prev: Option<Grid> = None;
        for sigma in self.space.sigmas() {
            let blurred = GaussianFilter::new(sigma)?.apply(input);
            if let Some(prev) = prev.take() {
                layers.push(blurred.try_sub(&prev)? * (sigma * sigma));
                labels.push(sigma);
            }
            prev = Some(blurred);
        }
        Ok((layers, labels))
    }

    pub fn detect(&self, input: &Grid) -> Result<Vec<Blob>> {
        let (layers, labels) = self.scale_space(input)?;
        let blobs = local_maxima(&layers, &labels, self.space.window, self.space.threshold);
        debug!("blob DoG: {} blobs over {} layers", blobs.len(), layers.len());
        Ok(blobs)
    }

    /// Grid holding each blob's sigma at its center, 0 elsewhere.
    pub fn apply(&self, input: &Grid) -> Result<Grid> {
        mark(input, &self.detect(input)?)
    }
}

/// Laplacian-of-Gaussian detector.
#[derive(Clone, Debug)]
pub struct BlobLog {
    space: ScaleSpace,
}

impl BlobLog {
    pub fn new(
        initial_sigma: f32,
        k: f32,
        threshold: f32,
        window: usize,
        octaves: usize,
    ) -> Result<Self> {
        Ok(Self {
            space: ScaleSpace::new(initial_sigma, k, threshold, window, octaves)?,
        })
    }

    pub fn scale_space(&self, input: &Grid) -> Result<(Vec<Grid>, Vec<f32>)> {
        let mut layers = Vec::with_capacity(self.space.octaves);
        let mut labels = Vec::with_capacity(self.space.octaves);
        for sigma in self.space.sigmas().take(self.space.octaves) {
            let log = LaplacianOfGaussian::new(sigma)?;
            layers.push(log.apply(input) * (sigma * sigma));
            labels.push(sigma);
        }
        Ok((layers, labels))
    }

    pub fn detect(&self, input: &Grid) -> Result<Vec<Blob>> {
        let (layers, labels) = self.scale_space(input)?;
        let blobs = local_maxima(&layers, &labels, self.space.window, self.space.threshold);
        debug!("blob LoG: {} blobs over {} layers", blobs.len(), layers.len());
        Ok(blobs)
    }

    pub fn apply(&self, input: &Grid) -> Result<Grid> {
        mark(input, &self.detect(input)?)
    }
}
