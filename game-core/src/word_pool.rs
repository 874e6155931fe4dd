use anyhow::{Context, Result};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use game_types::Language;

const BUILTIN_EN: &str = "\
# Prompts that tend to pull a handful of obvious associations
apple
beach
birthday
breakfast
cat
chocolate
christmas
coffee
doctor
dog
fire
football
forest
ghost
guitar
holiday
honey
ice
kitchen
moon
mountain
music
night
ocean
party
pirate
pizza
rain
school
snow
space
spider
summer
sun
superhero
teacher
train
volcano
wedding
winter
";

const BUILTIN_ID: &str = "\
# Kata pemancing asosiasi
api
bakso
buku
bulan
cinta
dokter
durian
gunung
guru
hujan
hutan
ikan
jalan
kampus
kantor
kopi
kucing
laut
lebaran
liburan
malam
matahari
mobil
musik
nasi
pantai
pasar
pesta
pisang
rumah
sawah
sekolah
sepak bola
teh
ulang tahun
";

/// Word lists per language. Prompts are drawn from here at game start.
#[derive(Debug, Clone)]
pub struct WordPool {
    pools: HashMap<Language, Vec<String>>,
}

impl WordPool {
    /// Pool with the lists that ship with the server.
    pub fn builtin() -> Self {
        let mut pools = HashMap::new();
        pools.insert(Language::En, Self::parse_word_list(BUILTIN_EN));
        pools.insert(Language::Id, Self::parse_word_list(BUILTIN_ID));
        Self { pools }
    }

    /// Builtin pool with any `<lang>.txt` found in `dir` replacing that language's list.
    pub fn from_directory<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            anyhow::bail!("Word directory {} does not exist", dir.display());
        }

        let mut pool = Self::builtin();
        for language in Language::ALL {
            let path = dir.join(format!("{}.txt", language.code()));
            if !path.exists() {
                continue;
            }

            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read word list {}", path.display()))?;
            let words = Self::parse_word_list(&text);
            if words.is_empty() {
                anyhow::bail!("Word list {} is empty", path.display());
            }

            tracing::info!("Loaded {} {} words from {}", words.len(), language, path.display());
            pool = pool.with_list(language, words);
        }

        Ok(pool)
    }

    /// One word per line. Blank lines and `#` comments are skipped, duplicates dropped.
    pub fn parse_word_list(text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter(|word| seen.insert(word.to_lowercase()))
            .map(str::to_string)
            .collect()
    }

    pub fn with_list(mut self, language: Language, words: Vec<String>) -> Self {
        self.pools.insert(language, words);
        self
    }

    pub fn words(&self, language: Language) -> &[String] {
        self.pools.get(&language).map(Vec::as_slice).unwrap_or_default()
    }

    /// Up to `count` distinct words in random order.
    pub fn draw(&self, language: Language, count: usize) -> Vec<String> {
        self.draw_with(language, count, &mut rand::thread_rng())
    }

    pub fn draw_with<R: Rng + ?Sized>(&self, language: Language, count: usize, rng: &mut R) -> Vec<String> {
        let mut words = self.words(language).to_vec();
        words.shuffle(rng);
        words.truncate(count);
        words
    }
}

impl Default for WordPool {
    fn default() -> Self {
        Self::builtin()
    }
}
