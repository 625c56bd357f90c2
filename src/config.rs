use std::path::{Path, PathBuf};

pub const MAX_SOZ_COUNT: u32 = 33;
pub const DEFAULT_WORDS_COUNT: usize = 15;

/// Last known total of global pages, used when the page map is unavailable.
pub const FALLBACK_PAGE_COUNT: u32 = 1041;

/// Footnotes are only appended while the rendered page is shorter than this.
pub const FOOTNOTE_BUDGET: usize = 2500;

/// Safe per-message limit for the delivery layer (the API limit is 4096).
pub const MESSAGE_MAX_LENGTH: usize = 4000;

pub const DEFAULT_DATA_DIR: &str = "data/risale";

pub const TOC_PATH: &str = "index/toc.json";
pub const PAGE_MAP_PATH: &str = "index/page-map.json";
pub const DICTIONARY_PATH: &str = "index/dictionary.json";
pub const SOZLER_DIR: &str = "sozler";

const SOZ_FILES: [&str; MAX_SOZ_COUNT as usize] = [
    "01-birinci-soz.json",
    "02-ikinci-soz.json",
    "03-ucuncu-soz.json",
    "04-dorduncu-soz.json",
    "05-besinci-soz.json",
    "06-altinci-soz.json",
    "07-yedinci-soz.json",
    "08-sekizinci-soz.json",
    "09-dokuzuncu-soz.json",
    "10-onuncu-soz.json",
    "11-on-birinci-soz.json",
    "12-on-ikinci-soz.json",
    "13-on-ucuncu-soz.json",
    "14-on-dorduncu-soz.json",
    "15-on-besinci-soz.json",
    "16-on-altinci-soz.json",
    "17-on-yedinci-soz.json",
    "18-on-sekizinci-soz.json",
    "19-on-dokuzuncu-soz.json",
    "20-yirminci-soz.json",
    "21-yirmi-birinci-soz.json",
    "22-yirmi-ikinci-soz.json",
    "23-yirmi-ucuncu-soz.json",
    "24-yirmi-dorduncu-soz.json",
    "25-yirmi-besinci-soz.json",
    "26-yirmi-altinci-soz.json",
    "27-yirmi-yedinci-soz.json",
    "28-yirmi-sekizinci-soz.json",
    "29-yirmi-dokuzuncu-soz.json",
    "30-otuzuncu-soz.json",
    "31-otuz-birinci-soz.json",
    "32-otuz-ikinci-soz.json",
    "33-otuz-ucuncu-soz.json",
];

#[derive(Debug, Clone)]
pub struct RisaleConfig {
    pub data_dir: PathBuf,
}

impl RisaleConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

/// Storage path of a chapter file, relative to the data dir.
pub fn chapter_path(soz_no: u32) -> Option<PathBuf> {
    let idx = usize::try_from(soz_no.checked_sub(1)?).ok()?;
    SOZ_FILES
        .get(idx)
        .map(|name| Path::new(SOZLER_DIR).join(name))
}

pub fn interlude_path(slug: &str) -> PathBuf {
    Path::new(SOZLER_DIR).join(format!("{slug}.json"))
}
