use crate::types::Participant;
use rand::seq::SliceRandom;
use rand::RngCore;

/// Uniform sample without replacement: shuffle the eligible pool and keep a
/// prefix of `slots` entries. Slot counts larger than the pool are capped.
pub(crate) fn pick(rng: &mut dyn RngCore, mut pool: Vec<Participant>, slots: usize) -> Vec<Participant> {
    pool.shuffle(rng);
    pool.truncate(slots);
    pool
}
