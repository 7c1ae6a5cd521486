#[cfg(test)]
#[path = "crisis_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use tokio::fs;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

// Deployment data rather than product logic. Override with a phrase file via
// `crisis-phrases-file` before shipping to a new jurisdiction.
const DEFAULT_PHRASES: [&str; 9] = [
    "suicide",
    "kill myself",
    "want to die",
    "end my life",
    "hurt myself",
    "self harm",
    "i will die",
    "i'll die",
    "i'm going to kill myself",
];

/// Deterministic keyword filter that short-circuits generated replies when
/// self-harm indicators show up in pivot-language text. All file I/O happens
/// at construction; `matches` itself is pure.
pub struct CrisisScanner {
    phrases: Vec<String>,
}

impl Default for CrisisScanner {
    fn default() -> CrisisScanner {
        return CrisisScanner::new(
            DEFAULT_PHRASES
                .iter()
                .map(|e| {
                    return e.to_string();
                })
                .collect(),
        );
    }
}

impl CrisisScanner {
    pub fn new(phrases: Vec<String>) -> CrisisScanner {
        let phrases = phrases
            .iter()
            .map(|phrase| {
                return phrase.trim().to_lowercase();
            })
            .filter(|phrase| {
                return !phrase.is_empty();
            })
            .collect::<Vec<String>>();

        return CrisisScanner { phrases };
    }

    pub async fn from_config() -> Result<CrisisScanner> {
        let phrases_file = Config::get(ConfigKey::CrisisPhrasesFile);
        if phrases_file.is_empty() {
            return Ok(CrisisScanner::default());
        }

        let contents = fs::read_to_string(&phrases_file).await?;
        let scanner = CrisisScanner::parse(&contents);
        if scanner.phrases.is_empty() {
            bail!(format!("No crisis phrases found in {phrases_file}"));
        }

        return Ok(scanner);
    }

    /// One phrase per line, blank lines and surrounding whitespace ignored.
    pub fn parse(contents: &str) -> CrisisScanner {
        return CrisisScanner::new(
            contents
                .lines()
                .map(|line| {
                    return line.to_string();
                })
                .collect(),
        );
    }

    pub fn matches(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        return self.phrases.iter().any(|phrase| {
            return lowered.contains(phrase);
        });
    }

    pub fn phrases(&self) -> &[String] {
        return &self.phrases;
    }
}
