use rand::Rng;
use rand_distr::{Bernoulli, Distribution};
use thiserror::Error;

use crate::domain::scenario::ThreePointRange;

#[derive(Error, Debug, PartialEq)]
pub enum SamplerError {
    #[error("invalid three point range ({min}, {likely}, {max})")]
    InvalidRange { min: f64, likely: f64, max: f64 },
    #[error("invalid probability {0}")]
    InvalidProbability(f64),
}

/// Source of random draws for one simulated life of a venue.
pub trait ScenarioSampler {
    fn sample(&mut self, min: f64, likely: f64, max: f64) -> Result<f64, SamplerError>;

    /// Bernoulli draw that is `true` with the given probability.
    fn chance(&mut self, probability: f64) -> Result<bool, SamplerError>;

    fn sample_range(&mut self, range: &ThreePointRange) -> Result<f64, SamplerError> {
        self.sample(range.min, range.likely, range.max)
    }
}

/// One sampler serves one simulated life; the Bernoulli for the weather
/// probability is built on first use and reused for every later month.
pub struct TriangularSampler<R: Rng> {
    rng: R,
    bernoulli: Option<(f64, Bernoulli)>,
}

impl<R: Rng> TriangularSampler<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            bernoulli: None,
        }
    }
}

impl<R: Rng> ScenarioSampler for TriangularSampler<R> {
    fn sample(&mut self, min: f64, likely: f64, max: f64) -> Result<f64, SamplerError> {
        if max < min || likely < min || likely > max {
            return Err(SamplerError::InvalidRange { min, likely, max });
        }
        let range = max - min;
        if range == 0.0 {
            return Ok(likely);
        }

        // Inverse CDF of the triangular distribution.
        let u: f64 = self.rng.r#gen();
        let mode_fraction = (likely - min) / range;
        if u < mode_fraction {
            Ok(min + (u * range * (likely - min)).sqrt())
        } else {
            Ok(max - ((1.0 - u) * range * (max - likely)).sqrt())
        }
    }

    fn chance(&mut self, probability: f64) -> Result<bool, SamplerError> {
        let bernoulli = match self.bernoulli {
            Some((cached, bernoulli)) if cached == probability => bernoulli,
            _ => {
                let bernoulli = Bernoulli::new(probability)
                    .map_err(|_| SamplerError::InvalidProbability(probability))?;
                self.bernoulli = Some((probability, bernoulli));
                bernoulli
            }
        };
        Ok(bernoulli.sample(&mut self.rng))
    }
}
