use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use serde_json::from_str;

use crate::error::{Result, TtypeError};

static LANG_DIR: Dir = include_dir!("src/lang");

/// Word list embedded at build time from `src/lang/<name>.json`
#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    pub fn load(name: &str) -> Result<Self> {
        let file_name = format!("{name}.json");
        let file = LANG_DIR
            .get_file(&file_name)
            .ok_or_else(|| TtypeError::UnknownLanguage(name.to_string()))?;

        let file_as_str = file
            .contents_utf8()
            .ok_or_else(|| TtypeError::UnknownLanguage(name.to_string()))?;

        from_str(file_as_str).map_err(|source| TtypeError::InvalidLanguage {
            name: name.to_string(),
            source,
        })
    }

    /// Draw `num` lowercase words, with replacement, so any count is possible
    pub fn get_random<R: Rng + ?Sized>(&self, num: usize, rng: &mut R) -> Vec<String> {
        (0..num)
            .filter_map(|_| self.words.choose(rng))
            .map(|w| w.to_lowercase())
            .collect()
    }
}
