use crate::Probability;
use crate::TOLERANCE;
use rand::Rng;

/// Errors from strategy vector mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyError {
    IndexOutOfRange { index: usize, len: usize },
}

impl std::fmt::Display for StrategyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for {}-strategy vector", index, len)
            }
        }
    }
}

impl std::error::Error for StrategyError {}

/// A mixed strategy: a probability distribution over one player's pure
/// strategies.
///
/// The vector starts uniform and stays normalized under the single-slider
/// edit [`Strategy::set`]: the chosen entry takes its new value exactly and
/// the remaining mass is redistributed across the others. Repeated edits
/// compound rounding, so everything runs in double precision and the
/// just-set index is never rescaled.
#[derive(Debug, Clone, PartialEq)]
pub struct Strategy(Vec<Probability>);

impl Strategy {
    /// Uniform distribution `1/n` over `n` pure strategies.
    pub fn uniform(n: usize) -> Self {
        Self(vec![1.0 / n as Probability; n])
    }

    /// Random distribution: `n` uniform variates normalized by their sum.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let weights: Vec<Probability> = (0..n).map(|_| rng.random::<Probability>()).collect();
        let sum: Probability = weights.iter().sum();
        if sum == 0.0 {
            return Self::uniform(n);
        }
        Self(weights.into_iter().map(|w| w / sum).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn probabilities(&self) -> &[Probability] {
        &self.0
    }
    pub fn sum(&self) -> Probability {
        self.0.iter().sum()
    }

    /// Sum within tolerance of 1 and every entry in `[0, 1]`.
    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() <= TOLERANCE
            && self.0.iter().all(|p| (0.0..=1.0).contains(p))
    }

    /// Set one probability and renormalize the rest of the vector.
    ///
    /// `value` is clamped to `[0, 1]`, mirroring slider-bounded input. The
    /// entry at `index` holds the clamped value exactly afterwards. If the
    /// other entries carried no mass, the remainder is split equally among
    /// them; otherwise they are rescaled in proportion to their prior
    /// ratios. A single-entry vector admits only the distribution `[1.0]`,
    /// so the lone entry is pinned to 1.
    pub fn set(&mut self, index: usize, value: Probability) -> Result<(), StrategyError> {
        if index >= self.0.len() {
            return Err(StrategyError::IndexOutOfRange {
                index,
                len: self.0.len(),
            });
        }
        if self.0.len() == 1 {
            self.0[0] = 1.0;
            return Ok(());
        }
        let value = value.clamp(0.0, 1.0);
        self.0[index] = value;
        let others: Probability = self
            .0
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != index)
            .map(|(_, p)| p)
            .sum();
        if others == 0.0 {
            let share = (1.0 - value) / (self.0.len() - 1) as Probability;
            for (j, p) in self.0.iter_mut().enumerate() {
                if j != index {
                    *p = share;
                }
            }
        } else {
            let scale = (1.0 - value) / others;
            for (j, p) in self.0.iter_mut().enumerate() {
                if j != index {
                    *p *= scale;
                }
            }
        }
        Ok(())
    }
}

impl From<Vec<Probability>> for Strategy {
    fn from(probabilities: Vec<Probability>) -> Self {
        Self(probabilities)
    }
}

impl std::ops::Index<usize> for Strategy {
    type Output = Probability;
    fn index(&self, index: usize) -> &Probability {
        &self.0[index]
    }
}
