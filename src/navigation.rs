use std::sync::Arc;

use serde::Serialize;

use crate::command::Command;
use crate::index::ContentIndex;
use crate::resolver::{Addressing, ResolvedPage};

/// Where a "next" or "previous" button leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationLink {
    pub command: Command,
    pub description: String,
    /// Same target in global page numbers. Computed by arithmetic for chapter
    /// addressing, so it may point at an unpopulated id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_command: Option<Command>,
}

impl NavigationLink {
    fn global(global_id: u32, current: &ResolvedPage) -> Self {
        Self {
            command: Command::SozlerPage {
                global_id,
                meaning: current.meaning,
            },
            description: format!("Sözler Kitabı {global_id}. sayfasını açar"),
            global_command: None,
        }
    }

    fn chapter(soz_no: u32, page_no: u32, global_id: Option<u32>, current: &ResolvedPage) -> Self {
        Self {
            command: Command::Soz {
                soz_no,
                page_no,
                meaning: current.meaning,
            },
            description: format!("{soz_no}. Söz {page_no}. sayfasını açar"),
            global_command: global_id.map(|global_id| Command::SozlerPage {
                global_id,
                meaning: current.meaning,
            }),
        }
    }
}

pub struct Navigator {
    index: Arc<ContentIndex>,
}

impl Navigator {
    pub fn new(index: Arc<ContentIndex>) -> Self {
        Self { index }
    }

    /// Global and interlude pages step to the nearest populated global id.
    /// Chapter pages step inside the chapter, then to the first page of the
    /// next chapter in TOC order.
    pub async fn next_page_info(&self, current: &ResolvedPage) -> Option<NavigationLink> {
        if current.addressing != Addressing::Chapter {
            let next = self
                .index
                .find_next_available_global_id(current.page.global_id?)
                .await?;
            return Some(NavigationLink::global(next, current));
        }

        let page = &current.page;
        let chapter = self.index.chapter_info(page.soz_no).await?;
        let current_global = page.global_id.unwrap_or_else(|| {
            chapter
                .range
                .start_id
                .saturating_add(page.page_index.saturating_sub(1))
        });
        let total = self.index.total_page_count().await;
        let candidate = current_global
            .checked_add(1)
            .filter(|global_id| *global_id <= total);

        if page.page_index < chapter.range.count {
            return Some(NavigationLink::chapter(
                page.soz_no,
                page.page_index + 1,
                candidate,
                current,
            ));
        }

        let successor = self.index.next_chapter_after(page.soz_no).await?;
        Some(NavigationLink::chapter(successor.soz_no, 1, candidate, current))
    }

    /// Global and interlude pages search backwards for a populated id.
    /// Chapter pages only go back inside their own chapter.
    pub async fn previous_page_info(&self, current: &ResolvedPage) -> Option<NavigationLink> {
        if current.addressing != Addressing::Chapter {
            let previous = self
                .index
                .find_previous_available_global_id(current.page.global_id?)
                .await?;
            return Some(NavigationLink::global(previous, current));
        }

        let page = &current.page;
        if page.page_index <= 1 {
            return None;
        }
        let global_id = match page.global_id {
            Some(id) => Some(id),
            None => self
                .index
                .chapter_info(page.soz_no)
                .await
                .map(|chapter| chapter.range.start_id.saturating_add(page.page_index - 1)),
        };
        let candidate = global_id.and_then(|id| id.checked_sub(1)).filter(|id| *id >= 1);
        Some(NavigationLink::chapter(
            page.soz_no,
            page.page_index - 1,
            candidate,
            current,
        ))
    }
}
