use std::sync::Arc;

use serde::Serialize;

use crate::command::MeaningMode;
use crate::formats::{DictionaryEntry, Footnote, PageMapEntry, PageRecord};
use crate::index::ContentIndex;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub global_id: Option<u32>,
    pub page_index: u32,
    /// Owning chapter; 0 for interludes unless anchored through the page map.
    pub soz_no: u32,
    pub url: String,
    pub text_open: String,
    pub text_closed: String,
    pub footnotes: Vec<Footnote>,
    pub dictionary: Vec<DictionaryEntry>,
}

impl Page {
    /// Open mode: `text_closed` mirrors `text_open`. Closed mode: `text_open`
    /// is blank.
    fn from_record(record: &PageRecord, soz_no: u32, page_index: u32, meaning: MeaningMode) -> Self {
        let (text_open, text_closed) = match meaning {
            MeaningMode::Open => (record.text_open.clone(), record.text_open.clone()),
            MeaningMode::Closed => (String::new(), record.text_closed.clone()),
        };
        Self {
            global_id: record.global_id,
            page_index,
            soz_no,
            url: record.url.clone(),
            text_open,
            text_closed,
            footnotes: record.footnotes.clone(),
            dictionary: record.dictionary.clone(),
        }
    }

    pub fn text(&self, meaning: MeaningMode) -> &str {
        match meaning {
            MeaningMode::Open => &self.text_open,
            MeaningMode::Closed => &self.text_closed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageKind {
    Chapter,
    Interlude {
        anchor_soz: Option<u32>,
        title: String,
        slug: String,
    },
}

/// The scheme a page was requested through; navigation follows the same one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Addressing {
    Chapter,
    Global,
    Interlude,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPage {
    pub page: Page,
    pub kind: PageKind,
    pub addressing: Addressing,
    pub meaning: MeaningMode,
}

/// Turns chapter, slug and global addresses into pages. Every lookup failure,
/// including storage errors, comes back as `None`.
pub struct PageResolver {
    index: Arc<ContentIndex>,
}

impl PageResolver {
    pub fn new(index: Arc<ContentIndex>) -> Self {
        Self { index }
    }

    pub async fn get_chapter_page(
        &self,
        soz_no: u32,
        page_index: u32,
        meaning: MeaningMode,
    ) -> Option<ResolvedPage> {
        match self.try_chapter_page(soz_no, page_index, meaning).await {
            Ok(page) => page,
            Err(err) => {
                tracing::error!(soz_no, page_index, ?err, "chapter page lookup failed");
                None
            }
        }
    }

    pub async fn get_interlude_page(
        &self,
        slug: &str,
        page_index: u32,
        meaning: MeaningMode,
    ) -> Option<ResolvedPage> {
        match self.try_interlude_page(slug, page_index, meaning).await {
            Ok(page) => page,
            Err(err) => {
                tracing::error!(slug, page_index, ?err, "interlude page lookup failed");
                None
            }
        }
    }

    pub async fn get_global_page(&self, global_id: u32, meaning: MeaningMode) -> Option<ResolvedPage> {
        match self.try_global_page(global_id, meaning).await {
            Ok(page) => page,
            Err(err) => {
                tracing::error!(global_id, ?err, "global page lookup failed");
                None
            }
        }
    }

    async fn try_chapter_page(
        &self,
        soz_no: u32,
        page_index: u32,
        meaning: MeaningMode,
    ) -> anyhow::Result<Option<ResolvedPage>> {
        let Some(chapter) = self.index.chapter(soz_no).await? else {
            return Ok(None);
        };
        let record = chapter
            .pages
            .iter()
            .zip(1u32..)
            .find(|(record, position)| record.page_index.unwrap_or(*position) == page_index)
            .map(|(record, _)| record);
        let Some(record) = record else {
            return Ok(None);
        };

        Ok(Some(ResolvedPage {
            page: Page::from_record(record, soz_no, page_index, meaning),
            kind: PageKind::Chapter,
            addressing: Addressing::Chapter,
            meaning,
        }))
    }

    async fn try_interlude_page(
        &self,
        slug: &str,
        page_index: u32,
        meaning: MeaningMode,
    ) -> anyhow::Result<Option<ResolvedPage>> {
        let Some(info) = self.index.interlude_info(slug).await else {
            tracing::debug!(slug, "interlude not in toc");
            return Ok(None);
        };
        let Some(position) = page_index.checked_sub(1) else {
            return Ok(None);
        };

        let file = self.index.interlude_file(&info.slug).await?;
        let Some(record) = usize::try_from(position)
            .ok()
            .and_then(|position| file.pages.get(position))
        else {
            return Ok(None);
        };

        Ok(Some(ResolvedPage {
            page: Page::from_record(record, 0, page_index, meaning),
            kind: PageKind::Interlude {
                anchor_soz: info.after_soz,
                title: info.title.clone(),
                slug: info.slug.clone(),
            },
            addressing: Addressing::Interlude,
            meaning,
        }))
    }

    async fn try_global_page(
        &self,
        global_id: u32,
        meaning: MeaningMode,
    ) -> anyhow::Result<Option<ResolvedPage>> {
        let Some(entry) = self.index.page_map().await.get(global_id).cloned() else {
            return Ok(None);
        };

        let resolved = match entry {
            PageMapEntry::Chapter {
                soz_no, page_index, ..
            } => self.try_chapter_page(soz_no, page_index, meaning).await?,
            PageMapEntry::Interlude {
                slug,
                page_index,
                title,
                after_soz,
                ..
            } => self
                .try_interlude_page(&slug, page_index, meaning)
                .await?
                .map(|mut resolved| {
                    resolved.page.soz_no = after_soz.unwrap_or(0);
                    resolved.kind = PageKind::Interlude {
                        anchor_soz: after_soz,
                        title,
                        slug,
                    };
                    resolved
                }),
        };

        Ok(resolved.map(|mut resolved| {
            resolved.page.global_id = Some(global_id);
            resolved.addressing = Addressing::Global;
            resolved
        }))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::store::MemoryStore;
    use crate::test_support::fixture_store;

    fn resolver() -> PageResolver {
        PageResolver::new(Arc::new(ContentIndex::new(Arc::new(fixture_store()))))
    }

    #[tokio::test]
    async fn every_chapter_page_keeps_requested_coordinates() {
        let resolver = resolver();
        for (soz_no, count) in [(1, 2), (2, 1), (3, 2)] {
            for page_index in 1..=count {
                let resolved = resolver
                    .get_chapter_page(soz_no, page_index, MeaningMode::Open)
                    .await;
                let Some(resolved) = resolved else {
                    panic!("missing {soz_no}/{page_index}");
                };
                assert_eq!(resolved.page.soz_no, soz_no);
                assert_eq!(resolved.page.page_index, page_index);
                assert_eq!(resolved.kind, PageKind::Chapter);
                assert_eq!(resolved.addressing, Addressing::Chapter);
            }
        }
    }

    #[tokio::test]
    async fn out_of_range_chapter_pages_are_absent() {
        let resolver = resolver();
        assert!(resolver.get_chapter_page(34, 1, MeaningMode::Open).await.is_none());
        assert!(resolver.get_chapter_page(0, 1, MeaningMode::Open).await.is_none());
        assert!(resolver.get_chapter_page(1, 0, MeaningMode::Open).await.is_none());
        assert!(resolver.get_chapter_page(1, 3, MeaningMode::Open).await.is_none());
        // chapter 4 has no file in the fixture: a storage failure, still absent
        assert!(resolver.get_chapter_page(4, 1, MeaningMode::Open).await.is_none());
    }

    #[tokio::test]
    async fn meaning_mode_controls_exposed_text() {
        let resolver = resolver();
        let open = resolver
            .get_chapter_page(1, 1, MeaningMode::Open)
            .await
            .map(|r| r.page);
        let closed = resolver
            .get_chapter_page(1, 1, MeaningMode::Closed)
            .await
            .map(|r| r.page);
        let (Some(open), Some(closed)) = (open, closed) else {
            panic!("fixture page missing");
        };

        assert_eq!(open.text_open, "Sayfa 1 metni (manası)");
        assert_eq!(open.text_closed, open.text_open);
        assert_eq!(closed.text_open, "");
        assert_eq!(closed.text_closed, "Sayfa 1 metni");
        assert_eq!(closed.text(MeaningMode::Closed), "Sayfa 1 metni");
    }

    #[tokio::test]
    async fn stored_coordinates_are_overwritten() {
        let chapter = json!({
            "sozNo": 9,
            "pages": [{"globalId": 40, "pageIndex": 1, "sozNo": 99, "url": "u", "text_open": "a", "text_closed": "a"}]
        });
        let store = MemoryStore::new().with_json("sozler/01-birinci-soz.json", &chapter);
        let resolver = PageResolver::new(Arc::new(ContentIndex::new(Arc::new(store))));

        let page = resolver
            .get_chapter_page(1, 1, MeaningMode::Open)
            .await
            .map(|r| r.page);
        assert_eq!(page.map(|p| (p.soz_no, p.page_index, p.global_id)), Some((1, 1, Some(40))));
    }

    #[tokio::test]
    async fn interlude_pages_by_slug_and_suffix() {
        let resolver = resolver();

        let Some(resolved) = resolver.get_interlude_page("lemeat", 2, MeaningMode::Open).await else {
            panic!("lemeat page 2 missing");
        };
        assert_eq!(resolved.page.soz_no, 0);
        assert_eq!(resolved.page.global_id, Some(8));
        assert_eq!(resolved.addressing, Addressing::Interlude);
        assert_eq!(
            resolved.kind,
            PageKind::Interlude {
                anchor_soz: Some(3),
                title: "Lemeât".to_owned(),
                slug: "lemeat".to_owned(),
            }
        );

        assert!(resolver.get_interlude_page("konferans", 1, MeaningMode::Open).await.is_some());
        assert!(resolver.get_interlude_page("lemeat", 0, MeaningMode::Open).await.is_none());
        assert!(resolver.get_interlude_page("lemeat", 3, MeaningMode::Open).await.is_none());
        assert!(resolver.get_interlude_page("yok", 1, MeaningMode::Open).await.is_none());
    }

    #[tokio::test]
    async fn global_pages_delegate_and_stamp_id() {
        let resolver = resolver();

        let Some(chapter) = resolver.get_global_page(5, MeaningMode::Closed).await else {
            panic!("global 5 missing");
        };
        assert_eq!((chapter.page.soz_no, chapter.page.page_index), (3, 2));
        assert_eq!(chapter.page.global_id, Some(5));
        assert_eq!(chapter.addressing, Addressing::Global);
        assert_eq!(chapter.kind, PageKind::Chapter);
        assert_eq!(chapter.page.text_open, "");

        let Some(interlude) = resolver.get_global_page(7, MeaningMode::Open).await else {
            panic!("global 7 missing");
        };
        assert_eq!(interlude.page.soz_no, 3);
        assert_eq!(interlude.page.page_index, 1);
        assert!(matches!(
            interlude.kind,
            PageKind::Interlude { anchor_soz: Some(3), ref title, .. } if title == "Lemeât"
        ));

        assert!(resolver.get_global_page(6, MeaningMode::Open).await.is_none());
        assert!(resolver.get_global_page(100, MeaningMode::Open).await.is_none());
    }
}
