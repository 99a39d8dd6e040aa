use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Transcript cache keyed by hashed audio path. A slow Hindi model can
/// take minutes per recording; re-opening the same file should not pay
/// that twice.
pub struct TranscriptCache {
    transcripts: Arc<DashMap<String, String>>,
    max_entries: usize,
}

impl TranscriptCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            transcripts: Arc::new(DashMap::new()),
            max_entries,
        }
    }

    pub fn set(&self, audio_path: &str, transcript: String) {
        if self.transcripts.len() >= self.max_entries {
            // Simple eviction: clear 25% when full
            let to_remove: Vec<_> = self
                .transcripts
                .iter()
                .take(self.max_entries / 4)
                .map(|r| r.key().clone())
                .collect();
            for key in to_remove {
                self.transcripts.remove(&key);
            }
        }
        let key = hash_path(audio_path);
        self.transcripts.insert(key, transcript);
    }

    pub fn get(&self, audio_path: &str) -> Option<String> {
        let key = hash_path(audio_path);
        self.transcripts.get(&key).map(|r| r.value().clone())
    }

    pub fn stats(&self) -> TranscriptCacheStats {
        TranscriptCacheStats {
            transcripts_cached: self.transcripts.len(),
        }
    }

    pub fn clear(&self) {
        self.transcripts.clear();
    }
}

fn hash_path(path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, serde::Serialize)]
pub struct TranscriptCacheStats {
    pub transcripts_cached: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let cache = TranscriptCache::new(8);
        cache.set("/audio/one.wav", "राम का पुत्र श्याम".to_string());
        assert_eq!(
            cache.get("/audio/one.wav").as_deref(),
            Some("राम का पुत्र श्याम")
        );
        assert!(cache.get("/audio/two.wav").is_none());
    }

    #[test]
    fn test_eviction_keeps_cache_bounded() {
        let cache = TranscriptCache::new(4);
        for i in 0..10 {
            cache.set(&format!("/audio/{i}.wav"), "text".to_string());
        }
        assert!(cache.stats().transcripts_cached <= 4);
    }
}
