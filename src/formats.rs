use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRange {
    pub start_id: u32,
    pub end_id: u32,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubHeading {
    pub title: String,
    /// 1-based page offset inside the owning unit.
    pub page_index: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subheadings: Vec<SubHeading>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterSummary {
    pub soz_no: u32,
    pub title: String,
    pub slug: String,
    pub range: PageRange,
    pub subheadings: Vec<SubHeading>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterludeSummary {
    pub title: String,
    pub slug: String,
    pub range: PageRange,
    pub before_soz: Option<u32>,
    pub after_soz: Option<u32>,
    pub subheadings: Vec<SubHeading>,
}

/// One line of `index/toc.json`, in global page order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawTocEntry")]
pub enum TocEntry {
    Chapter(ChapterSummary),
    Interlude(InterludeSummary),
}

impl TocEntry {
    pub fn title(&self) -> &str {
        match self {
            Self::Chapter(c) => &c.title,
            Self::Interlude(i) => &i.title,
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            Self::Chapter(c) => &c.slug,
            Self::Interlude(i) => &i.slug,
        }
    }

    pub fn range(&self) -> PageRange {
        match self {
            Self::Chapter(c) => c.range,
            Self::Interlude(i) => i.range,
        }
    }

    pub fn soz_no(&self) -> Option<u32> {
        match self {
            Self::Chapter(c) => Some(c.soz_no),
            Self::Interlude(_) => None,
        }
    }

    pub fn is_interlude(&self) -> bool {
        matches!(self, Self::Interlude(_))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTocEntry {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    soz_no: Option<u32>,
    title: String,
    slug: String,
    range: PageRange,
    #[serde(default)]
    before_soz: Option<u32>,
    #[serde(default)]
    after_soz: Option<u32>,
    #[serde(default)]
    subheadings: Vec<SubHeading>,
}

impl TryFrom<RawTocEntry> for TocEntry {
    type Error = String;

    fn try_from(raw: RawTocEntry) -> Result<Self, Self::Error> {
        if raw.kind.as_deref() == Some("interlude") {
            return Ok(Self::Interlude(InterludeSummary {
                title: raw.title,
                slug: raw.slug,
                range: raw.range,
                before_soz: raw.before_soz,
                after_soz: raw.after_soz,
                subheadings: raw.subheadings,
            }));
        }
        let soz_no = raw
            .soz_no
            .ok_or_else(|| format!("toc entry {:?} has neither type nor sozNo", raw.slug))?;
        Ok(Self::Chapter(ChapterSummary {
            soz_no,
            title: raw.title,
            slug: raw.slug,
            range: raw.range,
            subheadings: raw.subheadings,
        }))
    }
}

/// Entries that are neither chapters nor interludes are skipped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "RawTocFile")]
pub struct TocFile {
    pub items: Vec<TocEntry>,
}

#[derive(Debug, Deserialize)]
struct RawTocFile {
    #[serde(default)]
    items: Vec<RawTocEntry>,
}

impl From<RawTocFile> for TocFile {
    fn from(raw: RawTocFile) -> Self {
        let items = raw
            .items
            .into_iter()
            .filter_map(|entry| match TocEntry::try_from(entry) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!(%err, "skipping toc entry");
                    None
                }
            })
            .collect();
        Self { items }
    }
}

/// Location of one populated global page id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawPageMapEntry")]
pub enum PageMapEntry {
    Chapter {
        soz_no: u32,
        slug: String,
        page_index: u32,
        url: String,
    },
    Interlude {
        slug: String,
        page_index: u32,
        url: String,
        title: String,
        after_soz: Option<u32>,
        before_soz: Option<u32>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawPageMapEntry {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    soz_no: Option<u32>,
    slug: String,
    page_index: u32,
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    after_soz: Option<u32>,
    #[serde(default)]
    before_soz: Option<u32>,
}

impl TryFrom<RawPageMapEntry> for PageMapEntry {
    type Error = String;

    fn try_from(raw: RawPageMapEntry) -> Result<Self, Self::Error> {
        if raw.kind.as_deref() == Some("interlude") {
            return Ok(Self::Interlude {
                title: raw.title.unwrap_or_else(|| raw.slug.clone()),
                slug: raw.slug,
                page_index: raw.page_index,
                url: raw.url,
                after_soz: raw.after_soz,
                before_soz: raw.before_soz,
            });
        }
        let soz_no = raw
            .soz_no
            .ok_or_else(|| format!("page map entry {:?} has neither type nor sozNo", raw.slug))?;
        Ok(Self::Chapter {
            soz_no,
            slug: raw.slug,
            page_index: raw.page_index,
            url: raw.url,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footnote {
    pub n: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub word: String,
    pub meaning: String,
}

/// A page as stored inside chapter and interlude files.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    #[serde(default)]
    pub global_id: Option<u32>,
    #[serde(default)]
    pub page_index: Option<u32>,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "text_open", default)]
    pub text_open: String,
    #[serde(rename = "text_closed", default)]
    pub text_closed: String,
    #[serde(default)]
    pub footnotes: Vec<Footnote>,
    #[serde(default)]
    pub dictionary: Vec<DictionaryEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterFile {
    #[serde(default)]
    pub soz_no: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    pub range: Option<PageRange>,
    #[serde(default)]
    pub pages: Vec<PageRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InterludeFile {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub pages: Vec<PageRecord>,
}
