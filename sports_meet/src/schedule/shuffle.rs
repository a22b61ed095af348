//! Random ordering of players before automatic pairing.

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::roster::ParticipantId;

/// Permutes a group of players in place before it is cut into matches.
///
/// Any `FnMut(&mut [ParticipantId])` is a shuffler, so tests can pass a
/// closure that leaves the order alone or applies a fixed permutation.
pub trait Shuffler {
    fn shuffle(&mut self, players: &mut [ParticipantId]);
}

impl<F> Shuffler for F
where
    F: FnMut(&mut [ParticipantId]),
{
    fn shuffle(&mut self, players: &mut [ParticipantId]) {
        self(players)
    }
}

/// Uniform shuffle seeded from the operating system
pub struct RandomShuffler {
    rng: StdRng,
}

impl RandomShuffler {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for RandomShuffler {
    fn default() -> Self {
        Self::new()
    }
}

impl Shuffler for RandomShuffler {
    fn shuffle(&mut self, players: &mut [ParticipantId]) {
        SliceRandom::shuffle(players, &mut self.rng);
    }
}

/// Uniform shuffle with a fixed seed; the same seed gives the same pairings
pub struct SeededShuffler {
    rng: StdRng,
}

impl SeededShuffler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Shuffler for SeededShuffler {
    fn shuffle(&mut self, players: &mut [ParticipantId]) {
        SliceRandom::shuffle(players, &mut self.rng);
    }
}
