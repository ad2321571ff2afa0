use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

/// Experiment arm attached to each transaction. Tracking only, never pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    A,
    B,
}

/// Strategy deciding which arm the next transaction lands in.
pub trait VariantSource: Send {
    fn next_variant(&mut self) -> Variant;
}

/// Uniform 50/50 assignment over a ChaCha stream.
#[derive(Debug, Clone)]
pub struct SeededVariants {
    rng: ChaCha20Rng,
}

impl SeededVariants {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha20Rng::from_os_rng(),
        }
    }
}

impl VariantSource for SeededVariants {
    fn next_variant(&mut self) -> Variant {
        if self.rng.random_bool(0.5) {
            Variant::A
        } else {
            Variant::B
        }
    }
}

/// Always returns the same arm.
#[derive(Debug, Clone, Copy)]
pub struct FixedVariant(pub Variant);

impl VariantSource for FixedVariant {
    fn next_variant(&mut self) -> Variant {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_produces_identical_assignments() {
        let draw = |seed| {
            let mut source = SeededVariants::from_seed(seed);
            (0..32).map(|_| source.next_variant()).collect::<Vec<_>>()
        };
        assert_eq!(draw(42), draw(42));
    }

    #[test]
    fn both_arms_are_reachable() {
        let mut source = SeededVariants::from_seed(7);
        let draws: Vec<_> = (0..200).map(|_| source.next_variant()).collect();
        let a = draws.iter().filter(|variant| **variant == Variant::A).count();
        assert!(a > 60 && a < 140, "expected a roughly even split, got {a} A of 200");
    }

    #[test]
    fn fixed_variant_never_changes() {
        let mut source = FixedVariant(Variant::A);
        assert!((0..10).all(|_| source.next_variant() == Variant::A));
    }
}
