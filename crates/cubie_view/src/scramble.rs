use cubie_core::cube::CUBIE_COUNT;
use cubie_core::{Axis, CubieId, Sign, TurnRequest};
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use smallvec::SmallVec;

/// Parameters to deterministically generate a scramble.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScrambleParams {
    /// Random seed. The same seed always produces the same scramble.
    pub seed: String,
}
impl ScrambleParams {
    /// Constructs parameters from a fixed seed.
    pub fn new(seed: impl Into<String>) -> Self {
        Self { seed: seed.into() }
    }
    /// Generates parameters from a random number.
    pub fn random() -> Self {
        Self::new(rand::rng().random::<u64>().to_string())
    }

    fn rng(&self) -> ChaCha12Rng {
        let mut sha256 = Sha256::new();
        sha256.update(self.seed.len().to_le_bytes());
        sha256.update(self.seed.as_bytes());
        let mut seed = [0_u8; 32];
        seed.copy_from_slice(&sha256.finalize());
        ChaCha12Rng::from_seed(seed)
    }
}

/// Generator for the turns of one scramble.
///
/// Each turn uses a random cubie, a random direction, and a random axis other
/// than the one used by the previous turn.
#[derive(Debug, Clone)]
pub struct Scrambler {
    params: ScrambleParams,
    rng: ChaCha12Rng,
    remaining: usize,
    last_axis: Option<Axis>,
    history: Vec<TurnRequest>,
}
impl Scrambler {
    /// Constructs a scrambler that will generate `moves` turns.
    pub fn new(params: ScrambleParams, moves: usize) -> Self {
        Self {
            rng: params.rng(),
            params,
            remaining: moves,
            last_axis: None,
            history: Vec::with_capacity(moves),
        }
    }

    /// Returns the parameters the scramble was generated from.
    pub fn params(&self) -> &ScrambleParams {
        &self.params
    }
    /// Returns every turn generated so far, in order.
    pub fn history(&self) -> &[TurnRequest] {
        &self.history
    }
    /// Returns the number of turns left to generate.
    pub fn remaining(&self) -> usize {
        self.remaining
    }
    /// Returns whether every turn has been generated.
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Generates the next turn, or returns `None` if the scramble is
    /// finished.
    pub fn next_request(&mut self) -> Option<TurnRequest> {
        if self.is_finished() {
            return None;
        }

        let cubie = CubieId::try_from(self.rng.random_range(0..CUBIE_COUNT)).ok()?;
        let axes: SmallVec<[Axis; 3]> = Axis::iter()
            .filter(|&axis| Some(axis) != self.last_axis)
            .collect();
        let axis = *axes.choose(&mut self.rng)?;
        let direction = *[Sign::Neg, Sign::Pos].choose(&mut self.rng)?;

        let request = TurnRequest {
            cubie,
            axis,
            direction,
        };
        self.remaining -= 1;
        self.last_axis = Some(axis);
        self.history.push(request);
        Some(request)
    }
}
impl Iterator for Scrambler {
    type Item = TurnRequest;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_request()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_scramble_never_repeats_axis() {
        let scrambler = Scrambler::new(ScrambleParams::new("no repeats"), 500);
        let turns: Vec<TurnRequest> = scrambler.collect();
        assert_eq!(turns.len(), 500);
        for pair in turns.windows(2) {
            assert_ne!(pair[0].axis, pair[1].axis);
        }
        // Every axis, direction, and cubie shows up eventually.
        for axis in Axis::iter() {
            assert!(turns.iter().any(|t| t.axis == axis));
        }
        for direction in Sign::iter() {
            assert!(turns.iter().any(|t| t.direction == direction));
        }
        for cubie in CubieId::iter() {
            assert!(turns.iter().any(|t| t.cubie == cubie));
        }
    }

    #[test]
    fn test_scramble_is_reproducible() {
        let a: Vec<_> = Scrambler::new(ScrambleParams::new("seed"), 30).collect();
        let b: Vec<_> = Scrambler::new(ScrambleParams::new("seed"), 30).collect();
        let c: Vec<_> = Scrambler::new(ScrambleParams::new("other seed"), 30).collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_history_and_remaining() {
        let mut scrambler = Scrambler::new(ScrambleParams::random(), 3);
        assert_eq!(scrambler.remaining(), 3);
        let first = scrambler.next_request();
        assert_eq!(scrambler.history(), &[first.unwrap()]);
        assert_eq!(scrambler.by_ref().count(), 2);
        assert!(scrambler.is_finished());
        assert_eq!(scrambler.next_request(), None);
        assert_eq!(scrambler.history().len(), 3);
    }
}
