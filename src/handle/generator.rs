//! Candidate handle generation

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::handle::validator::HandleValidator;
use crate::handle::DEFAULT_AFFIXES;
use crate::types::GenerationConfig;

/// Candidate generator combining a seed with an affix corpus
///
/// Output is deduplicated, validated and capped; order carries no meaning
/// beyond presentation variety.
pub struct HandleGenerator {
    config: GenerationConfig,
    affixes: Vec<String>,
    validator: HandleValidator,
}

impl HandleGenerator {
    /// Create a generator with the default corpus and configuration
    pub fn new() -> Self {
        Self::with_config(GenerationConfig::default())
    }

    /// Create a generator with custom configuration
    pub fn with_config(config: GenerationConfig) -> Self {
        Self {
            config,
            affixes: DEFAULT_AFFIXES.iter().map(|s| s.to_string()).collect(),
            validator: HandleValidator::new(),
        }
    }

    /// Replace the affix corpus
    pub fn with_affixes(mut self, affixes: Vec<String>) -> Self {
        self.affixes = affixes;
        self
    }

    /// Generate candidate handles from a seed string
    ///
    /// An unusable seed (nothing alphanumeric in it) yields an empty set.
    pub fn generate(&self, seed: &str) -> Vec<String> {
        let normalized = self.validator.normalize_seed(seed);
        if normalized.is_empty() {
            return Vec::new();
        }

        let mut rng = rand::thread_rng();
        let mut pool = vec![normalized.clone()];

        // Affix combinations, each form included independently at random
        let mut shuffled = self.affixes.clone();
        shuffled.shuffle(&mut rng);
        for affix in &shuffled {
            if rng.gen_bool(self.config.affix_probability) {
                pool.push(format!("{}{}", normalized, affix));
            }
            if rng.gen_bool(self.config.affix_probability) {
                pool.push(format!("{}-{}", normalized, affix));
            }
        }

        // Numeric variants on a small random subset of the pool
        let (lo, hi) = self.config.number_range;
        let picks: Vec<String> = pool
            .choose_multiple(&mut rng, pool.len().min(3))
            .cloned()
            .collect();
        for entry in picks {
            let n = rng.gen_range(lo..=hi);
            if rng.gen_bool(self.config.number_probability) {
                pool.push(format!("{}{}", entry, n));
            }
            if rng.gen_bool(self.config.number_probability) {
                pool.push(format!("{}-{}", entry, n));
            }
        }

        // Chunk recombination for seeds long enough to split
        let chunk_len = self.config.chunk_len.max(1);
        if normalized.len() >= 2 * chunk_len {
            let chunks: Vec<String> = normalized
                .chars()
                .collect::<Vec<_>>()
                .chunks(chunk_len)
                .map(|c| c.iter().collect())
                .collect();

            if chunks.len() >= 2 {
                pool.push(format!(
                    "{}{}",
                    chunks.first().unwrap(),
                    chunks.last().unwrap()
                ));
                pool.push(chunks.join("-"));
            }
        }

        // Dedup, drop anything the registry would refuse, cap, shuffle
        let unique: HashSet<String> = pool.into_iter().collect();
        let mut candidates: Vec<String> = unique
            .into_iter()
            .filter(|c| self.validator.is_valid(c))
            .collect();

        candidates.truncate(self.config.max_candidates);
        candidates.shuffle(&mut rng);
        candidates
    }

    /// Generator configuration
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }
}

impl Default for HandleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outputs_are_valid_and_capped() {
        let generator = HandleGenerator::new();
        let validator = HandleValidator::new();

        for seed in ["alice", "Bob Smith", "x", "averylongseedname", "dev-2024"] {
            for _ in 0..20 {
                let candidates = generator.generate(seed);
                assert!(candidates.len() <= generator.config().max_candidates);
                for candidate in &candidates {
                    assert!(
                        validator.is_valid(candidate),
                        "invalid candidate {:?} from seed {:?}",
                        candidate,
                        seed
                    );
                }
            }
        }
    }

    #[test]
    fn test_empty_seed_yields_nothing() {
        let generator = HandleGenerator::new();

        assert!(generator.generate("").is_empty());
        assert!(generator.generate("   ").is_empty());
        assert!(generator.generate("@#$%!").is_empty());
    }

    #[test]
    fn test_candidates_are_unique() {
        let generator = HandleGenerator::new();

        for _ in 0..20 {
            let candidates = generator.generate("alice");
            let unique: HashSet<&String> = candidates.iter().collect();
            assert_eq!(unique.len(), candidates.len());
        }
    }

    #[test]
    fn test_alice_scenario_subset() {
        let config = GenerationConfig {
            max_candidates: 5,
            ..Default::default()
        };
        let generator = HandleGenerator::with_config(config)
            .with_affixes(vec!["dev".to_string(), "labs".to_string()]);

        let bases = ["alice", "alicedev", "alicelabs", "alice-dev", "alice-labs"];
        let is_expected = |candidate: &str| {
            if bases.contains(&candidate) {
                return true;
            }
            // Numeric variants: base + digits, optionally hyphen-separated
            bases.iter().any(|base| {
                candidate
                    .strip_prefix(base)
                    .map(|rest| {
                        let digits = rest.strip_prefix('-').unwrap_or(rest);
                        !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
                    })
                    .unwrap_or(false)
            })
        };

        for _ in 0..50 {
            let candidates = generator.generate("alice");
            assert!(candidates.len() <= 5);
            for candidate in &candidates {
                assert!(is_expected(candidate), "unexpected candidate {:?}", candidate);
            }
        }
    }

    #[test]
    fn test_long_seed_chunking_stays_valid() {
        let generator = HandleGenerator::new();
        let validator = HandleValidator::new();

        for _ in 0..20 {
            for candidate in generator.generate("christopher") {
                assert!(validator.is_valid(&candidate));
            }
        }
    }

    #[test]
    fn test_seed_with_spaces_normalizes() {
        let generator = HandleGenerator::new();

        for _ in 0..10 {
            for candidate in generator.generate("Alice Smith") {
                assert!(!candidate.contains(' '));
                assert_eq!(candidate, candidate.to_lowercase());
            }
        }
    }

    #[test]
    fn test_oversized_seed_never_emits_oversized_candidates() {
        let generator = HandleGenerator::new();
        let seed = "a".repeat(60);

        for _ in 0..10 {
            for candidate in generator.generate(&seed) {
                assert!(candidate.len() <= crate::handle::MAX_HANDLE_LEN);
            }
        }
    }
}
