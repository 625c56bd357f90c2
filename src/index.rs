use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, OnceCell};

use crate::config::{
    DICTIONARY_PATH, FALLBACK_PAGE_COUNT, PAGE_MAP_PATH, TOC_PATH, chapter_path, interlude_path,
};
use crate::formats::{
    ChapterFile, ChapterSummary, InterludeFile, InterludeSummary, PageMapEntry, RawPageMapEntry,
    TocEntry, TocFile,
};
use crate::store::{ContentStore, load_json};

/// Populated global page ids. Not every id in `1..=max` has to be present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "BTreeMap<String, RawPageMapEntry>")]
pub struct PageMap(BTreeMap<u32, PageMapEntry>);

impl From<BTreeMap<String, RawPageMapEntry>> for PageMap {
    fn from(raw: BTreeMap<String, RawPageMapEntry>) -> Self {
        let mut entries = BTreeMap::new();
        for (key, entry) in raw {
            let Ok(id) = key.trim().parse::<u32>() else {
                tracing::warn!(key = %key, "skipping non-numeric page map key");
                continue;
            };
            match PageMapEntry::try_from(entry) {
                Ok(entry) => {
                    entries.insert(id, entry);
                }
                Err(err) => tracing::warn!(id, %err, "skipping page map entry"),
            }
        }
        Self(entries)
    }
}

impl FromIterator<(u32, PageMapEntry)> for PageMap {
    fn from_iter<I: IntoIterator<Item = (u32, PageMapEntry)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl PageMap {
    pub fn get(&self, global_id: u32) -> Option<&PageMapEntry> {
        self.0.get(&global_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn max_id(&self) -> Option<u32> {
        self.0.last_key_value().map(|(id, _)| *id)
    }

    pub fn next_after(&self, after: u32) -> Option<u32> {
        self.0
            .range((Bound::Excluded(after), Bound::Unbounded))
            .next()
            .map(|(id, _)| *id)
    }

    pub fn previous_before(&self, before: u32) -> Option<u32> {
        self.0.range(..before).next_back().map(|(id, _)| *id)
    }
}

pub type Dictionary = BTreeMap<String, String>;

/// Read-only lookups over the table of contents and the page map.
///
/// Every index file is read at most once per instance and kept for the
/// instance's lifetime. A failed read is logged and kept as an empty value.
/// Chapters are cached per number.
pub struct ContentIndex {
    store: Arc<dyn ContentStore>,
    toc: OnceCell<TocFile>,
    page_map: OnceCell<PageMap>,
    dictionary: OnceCell<Dictionary>,
    chapters: Mutex<HashMap<u32, Arc<ChapterFile>>>,
}

impl ContentIndex {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            store,
            toc: OnceCell::new(),
            page_map: OnceCell::new(),
            dictionary: OnceCell::new(),
            chapters: Mutex::new(HashMap::new()),
        }
    }

    pub async fn toc(&self) -> &[TocEntry] {
        &load_once(self.store.as_ref(), &self.toc, TOC_PATH)
            .await
            .items
    }

    pub async fn is_valid_chapter_no(&self, soz_no: u32) -> bool {
        self.chapter_info(soz_no).await.is_some()
    }

    pub async fn chapter_info(&self, soz_no: u32) -> Option<&ChapterSummary> {
        self.toc().await.iter().find_map(|entry| match entry {
            TocEntry::Chapter(chapter) if chapter.soz_no == soz_no => Some(chapter),
            _ => None,
        })
    }

    /// First chapter after `soz_no` in TOC order; interludes in between are skipped.
    pub async fn next_chapter_after(&self, soz_no: u32) -> Option<&ChapterSummary> {
        let toc = self.toc().await;
        let pos = toc
            .iter()
            .position(|entry| entry.soz_no() == Some(soz_no))?;
        toc[pos + 1..].iter().find_map(|entry| match entry {
            TocEntry::Chapter(chapter) => Some(chapter),
            TocEntry::Interlude(_) => None,
        })
    }

    /// Exact slug match first, otherwise the first interlude whose slug ends
    /// with `-{slug}` in TOC order.
    pub async fn interlude_info(&self, slug: &str) -> Option<&InterludeSummary> {
        let suffix = format!("-{slug}");
        let mut suffix_match = None;
        for entry in self.toc().await {
            let TocEntry::Interlude(interlude) = entry else {
                continue;
            };
            if interlude.slug == slug {
                return Some(interlude);
            }
            if suffix_match.is_none() && interlude.slug.ends_with(&suffix) {
                suffix_match = Some(interlude);
            }
        }
        suffix_match
    }

    pub async fn page_map(&self) -> &PageMap {
        load_once(self.store.as_ref(), &self.page_map, PAGE_MAP_PATH).await
    }

    /// Highest populated global id, or the last known total when the page
    /// map is empty or unreadable.
    pub async fn total_page_count(&self) -> u32 {
        self.page_map()
            .await
            .max_id()
            .unwrap_or(FALLBACK_PAGE_COUNT)
    }

    pub async fn find_next_available_global_id(&self, after: u32) -> Option<u32> {
        self.page_map().await.next_after(after)
    }

    pub async fn find_previous_available_global_id(&self, before: u32) -> Option<u32> {
        self.page_map().await.previous_before(before)
    }

    pub async fn dictionary(&self) -> &Dictionary {
        load_once(self.store.as_ref(), &self.dictionary, DICTIONARY_PATH).await
    }

    /// Loads a chapter file, reusing the cached copy. `Ok(None)` for chapter
    /// numbers outside the fixed file table.
    pub async fn chapter(&self, soz_no: u32) -> anyhow::Result<Option<Arc<ChapterFile>>> {
        let Some(path) = chapter_path(soz_no) else {
            return Ok(None);
        };
        if let Some(cached) = self.chapters.lock().await.get(&soz_no) {
            return Ok(Some(Arc::clone(cached)));
        }

        // Two concurrent first reads may both load; the second insert wins.
        let chapter = Arc::new(load_json::<ChapterFile>(self.store.as_ref(), &path).await?);
        tracing::debug!(soz_no, pages = chapter.pages.len(), "loaded chapter");
        self.chapters
            .lock()
            .await
            .insert(soz_no, Arc::clone(&chapter));
        Ok(Some(chapter))
    }

    pub async fn interlude_file(&self, slug: &str) -> anyhow::Result<InterludeFile> {
        load_json(self.store.as_ref(), &interlude_path(slug)).await
    }
}

/// Fills `cell` on first use. An unreadable file is stored as `T::default()`.
async fn load_once<'a, T>(store: &dyn ContentStore, cell: &'a OnceCell<T>, path: &str) -> &'a T
where
    T: DeserializeOwned + Default + Send + Sync,
{
    cell.get_or_init(|| async {
        match load_json::<T>(store, Path::new(path)).await {
            Ok(value) => {
                tracing::debug!(path, "loaded index file");
                value
            }
            Err(err) => {
                tracing::warn!(path, ?err, "index file unavailable");
                T::default()
            }
        }
    })
    .await
}
