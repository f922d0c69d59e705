//! Fallback Responses
//!
//! Canned replies used when the client is offline or has exhausted its
//! retry budget. Selection is uniform with replacement and keeps no state
//! between calls.

use rand::seq::SliceRandom;
use rand::Rng;

/// Default fallback replies
pub const DEFAULT_FALLBACK_RESPONSES: [&str; 3] = [
    "Bu bir çevrimdışı yanıttır. İnternet bağlantınızı kontrol edip tekrar deneyebilirsiniz.",
    "Şu anda çevrimdışı modda çalışıyorum. İnternet bağlantısı sağlandığında daha iyi yanıtlar verebilirim.",
    "Çevrimdışı moddayız. Basit sorulara yanıt verebilirim, ancak detaylı proje planlaması için internet bağlantısı gerekli.",
];

/// Picks a local reply from a fixed set
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FallbackResponder {
    responses: Vec<String>,
}

impl FallbackResponder {
    /// Create a responder over the given replies
    ///
    /// An empty set is replaced with [`DEFAULT_FALLBACK_RESPONSES`].
    pub fn new(responses: Vec<String>) -> Self {
        if responses.is_empty() {
            return Self::default();
        }
        Self { responses }
    }

    /// The replies this responder chooses from
    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    /// Pick a reply using the thread-local RNG
    pub fn pick(&self) -> String {
        self.pick_with(&mut rand::thread_rng())
    }

    /// Pick a reply using the given RNG
    pub fn pick_with<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.responses
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| DEFAULT_FALLBACK_RESPONSES[0].to_string())
    }
}

impl Default for FallbackResponder {
    fn default() -> Self {
        Self {
            responses: DEFAULT_FALLBACK_RESPONSES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_default_has_three_replies() {
        let responder = FallbackResponder::default();
        assert_eq!(responder.responses().len(), 3);
    }

    #[test]
    fn test_empty_set_uses_defaults() {
        assert_eq!(FallbackResponder::new(Vec::new()), FallbackResponder::default());
    }

    #[test]
    fn test_pick_is_member_of_set() {
        let responder = FallbackResponder::default();
        for _ in 0..50 {
            let reply = responder.pick();
            assert!(responder.responses().contains(&reply));
        }
    }

    #[test]
    fn test_pick_covers_whole_set() {
        let responder = FallbackResponder::default();
        let mut rng = StdRng::seed_from_u64(7);

        let seen: HashSet<String> = (0..200).map(|_| responder.pick_with(&mut rng)).collect();

        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_custom_set() {
        let responder = FallbackResponder::new(vec!["only".to_string()]);
        assert_eq!(responder.pick(), "only");
    }
}
