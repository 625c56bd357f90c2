//! WhatsApp-flavoured text for every command outcome.

use serde::Serialize;

use crate::command::{Command, MeaningMode};
use crate::config::{FOOTNOTE_BUDGET, MAX_SOZ_COUNT};
use crate::formats::{SubHeading, TocEntry};
use crate::navigation::NavigationLink;
use crate::normalize::sanitize_whatsapp;
use crate::resolver::{Addressing, PageKind, ResolvedPage};

pub const BUTTON_PREVIOUS: &str = "⬅️ Önceki Sayfa";
pub const BUTTON_NEXT: &str = "➡️ Sonraki Sayfa";
pub const BUTTON_MEANING_OPEN: &str = "👁️ Anlamları Aç";
pub const BUTTON_MEANING_CLOSE: &str = "🚫 Anlamları Kapat";
pub const BUTTON_TOC: &str = "📑 Risale İçindekiler";
pub const BUTTON_RANDOM: &str = "🎲 Rastgele Söz";
pub const BUTTON_WORDS: &str = "📚 Kelime Antrenmanı";

/// WhatsApp shows at most three reply buttons per message.
pub const MAX_BUTTONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    /// Command string sent back when the button is pressed.
    pub id: String,
    pub title: String,
}

impl Button {
    pub fn new(command: &Command, title: &str) -> Self {
        Self {
            id: command.to_string(),
            title: title.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Navigation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<NavigationLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<NavigationLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedResponse {
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<Navigation>,
}

impl RenderedResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            buttons: Vec::new(),
            navigation: None,
        }
    }

    /// Appends buttons until the per-message limit is reached.
    pub fn with_buttons(mut self, buttons: impl IntoIterator<Item = Button>) -> Self {
        let room = MAX_BUTTONS.saturating_sub(self.buttons.len());
        self.buttons.extend(buttons.into_iter().take(room));
        self
    }
}

/// Keycap digits: `7️⃣`, `🔟`, `2️⃣4️⃣`.
pub fn keycap(n: u32) -> String {
    match n {
        0..=9 => format!("{n}\u{fe0f}\u{20e3}"),
        10 => "🔟".to_owned(),
        _ => n
            .to_string()
            .chars()
            .map(|digit| format!("{digit}\u{fe0f}\u{20e3}"))
            .collect(),
    }
}

pub fn help_message() -> String {
    let mut md = String::new();
    md.push_str("📖 *Risale-i Nur - Sözler Rehberi*\n\n");
    md.push_str("📚 *Bir Söz'ü sayfa sayfa okumak için:*\n");
    md.push_str("• `risale sözler 18` → 18. Söz'ün *1. sayfasını* açar (*anlamlar açık*)\n");
    md.push_str("• `risale sözler 18 sayfa 3` → 18. Söz'ün *3. sayfasını* açar\n");
    md.push_str("• `risale sözler 18 kapalı` → 1. sayfayı *anlamlar gizli* açar\n");
    md.push_str("• `risale sözler 18 sayfa 3 kapalı` → 3. sayfayı *anlamlar gizli* açar\n\n");
    md.push_str("🌍 *Sözler Kitabı sayfa numarasıyla okumak için:*\n");
    md.push_str("• `risale sözler sayfa 421` → Kitabın *421. sayfasını* açar\n");
    md.push_str("• `risale sözler sayfa 421 kapalı` → Aynı sayfayı *anlamlar gizli* açar\n\n");
    md.push_str("📜 *Ara bölümler için:*\n");
    md.push_str("• `risale lemeat sayfa 2` → Lemeât'ın *2. sayfasını* açar\n\n");
    md.push_str("ℹ️ *Genel:*\n");
    md.push_str("• `risale içindekiler` → İçindekiler listesini gösterir\n");
    md.push_str("• `risale kelimeler` → Rastgele kelime ve anlamlarını gösterir\n");
    md.push_str("• `/risale` → Bu yardım menüsünü gösterir\n\n");
    md.push_str(&format!("✨ *Toplam {MAX_SOZ_COUNT} Söz mevcut (1-{MAX_SOZ_COUNT})*\n"));
    md.push_str("💡 Her Söz'ün kendi sayfa numaraları vardır; ayrıca tüm kitap için ortak bir sayfa numarası da bulunur.\n\n");
    md.push_str("🤲 Hayırlı ve verimli okumalar dilerim!");
    md
}

fn clean_title(title: &str) -> String {
    sanitize_whatsapp(&title.replace('\n', " ")).trim().to_owned()
}

/// Chapter titles in the corpus carry their own number prefix ("3. Üçüncü Söz").
fn strip_number_prefix(title: &str) -> &str {
    let rest = title.trim_start_matches(|ch: char| ch.is_ascii_digit());
    if rest.len() == title.len() {
        return title;
    }
    rest.strip_prefix('.')
        .map(str::trim_start)
        .unwrap_or(title)
}

fn render_subheadings(md: &mut String, subheadings: &[SubHeading], start_id: u32, indent: &str) {
    for sub in subheadings {
        let real_page = start_id.saturating_add(sub.page_index.saturating_sub(1));
        md.push_str(&format!(
            "{indent}• {} *(Sayfa {real_page})*\n",
            clean_title(&sub.title)
        ));
        if !sub.subheadings.is_empty() {
            render_subheadings(md, &sub.subheadings, start_id, &format!("{indent}  "));
        }
    }
}

pub fn toc_summary(toc: &[TocEntry]) -> String {
    if toc.is_empty() {
        return "❌ İçindekiler bulunamadı.".to_owned();
    }

    let mut md = String::new();
    md.push_str("📖 *RİSALE-İ NUR - SÖZLER | İÇİNDEKİLER*\n\n");

    for (pos, entry) in toc.iter().enumerate() {
        let range = entry.range();
        match entry {
            TocEntry::Chapter(chapter) => {
                let title = clean_title(strip_number_prefix(&chapter.title));
                md.push_str(&format!(
                    "{} *{}. {title}* ({} sayfa) - *Sayfa {}-{}*\n",
                    keycap(chapter.soz_no),
                    chapter.soz_no,
                    range.count,
                    range.start_id,
                    range.end_id
                ));
                render_subheadings(&mut md, &chapter.subheadings, range.start_id, "    ");
            }
            TocEntry::Interlude(interlude) => {
                md.push_str(&format!(
                    "    • {} *(Sayfa {}-{})*\n",
                    clean_title(&interlude.title),
                    range.start_id,
                    range.end_id
                ));
                render_subheadings(&mut md, &interlude.subheadings, range.start_id, "      ");
            }
        }

        let next_is_interlude = toc.get(pos + 1).is_some_and(TocEntry::is_interlude);
        if !(entry.is_interlude() && next_is_interlude) {
            md.push('\n');
        }
    }

    let chapters = toc.iter().filter(|entry| !entry.is_interlude()).count();
    md.push_str(&format!("📍 *Toplam:* {chapters} Söz\n\n"));
    md.push_str("💡Komutlar için: `/risale`");
    md
}

/// Numbered list of already-picked dictionary entries.
pub fn random_words<'a>(words: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut lines = String::new();
    for ((word, meaning), n) in words.into_iter().zip(1u32..) {
        lines.push_str(&format!("{} *{word}:* {meaning}\n", keycap(n)));
    }
    if lines.is_empty() {
        return "❌ Kelime sözlüğü bulunamadı.".to_owned();
    }

    let mut md = String::new();
    md.push_str("📚 *RİSALE-İ NUR - SÖZLER | RASTGELE KELİMELER*\n\n");
    md.push_str("🔤 *Bu kelimeler Risale-i Nur Sözler Kitabı'ndan:*\n\n");
    md.push_str(&lines);
    md.push_str("\n💡 Yeni kelimeler öğrenmeye devam etmek için *_\"risale kelimeler\"_* yazabilirsiniz.");
    md
}

fn page_header(resolved: &ResolvedPage) -> String {
    let page = &resolved.page;
    let mode = match resolved.meaning {
        MeaningMode::Open => "",
        MeaningMode::Closed => " (Anlam Kapalı)",
    };
    match (&resolved.kind, resolved.addressing, page.global_id) {
        (PageKind::Chapter, Addressing::Global, Some(global_id)) => format!(
            "🌐 *Sözler Kitabı {global_id}. Sayfa - {}. Söz {}. Sayfa{mode}*",
            page.soz_no, page.page_index
        ),
        (PageKind::Interlude { title, .. }, Addressing::Global, Some(global_id)) => format!(
            "🌐 *Sözler Kitabı {global_id}. Sayfa - {} {}. Sayfa{mode}*",
            clean_title(title),
            page.page_index
        ),
        (PageKind::Interlude { title, .. }, _, _) => format!(
            "📜 *{} - {}. Sayfa{mode}*",
            clean_title(title),
            page.page_index
        ),
        (PageKind::Chapter, _, _) => format!(
            "📖 *{}. Söz - {}. Sayfa{mode}*",
            page.soz_no, page.page_index
        ),
    }
}

fn push_link(md: &mut String, heading: &str, link: &NavigationLink) {
    md.push_str(&format!("\n{heading}\n"));
    md.push_str(&format!("• `{}` _({})_\n", link.command, link.description));
    if let Some(global) = &link.global_command {
        md.push_str(&format!("• `{global}` _(Sözler Kitabı sayfası)_\n"));
    }
}

pub fn page_message(resolved: &ResolvedPage, navigation: &Navigation) -> String {
    let page = &resolved.page;
    let mut md = String::new();
    md.push_str(&page_header(resolved));
    md.push_str("\n\n");

    let body = page.text(resolved.meaning).trim();
    if body.is_empty() {
        md.push_str("_İçerik bulunamadı._\n");
    } else {
        md.push_str(body);
        md.push('\n');
    }

    if !page.footnotes.is_empty() && md.chars().count() < FOOTNOTE_BUDGET {
        md.push_str("\n📝 *Dipnotlar:*\n");
        for footnote in &page.footnotes {
            md.push_str(&format!("[{}] {}\n", footnote.n, footnote.text));
        }
    }

    if resolved.meaning == MeaningMode::Closed && !page.dictionary.is_empty() {
        md.push_str("\n📚 *Kelime Anlamları:*\n");
        for entry in &page.dictionary {
            md.push_str(&format!("• *{}:* {}\n", entry.word, entry.meaning));
        }
    }

    if let Some(previous) = &navigation.previous {
        push_link(&mut md, "⬅️ *Önceki sayfa:*", previous);
    }
    if let Some(next) = &navigation.next {
        push_link(&mut md, "➡️ *Sonraki sayfa:*", next);
    }

    if !page.url.is_empty() {
        md.push_str(&format!("\n🔗 *Kaynak:* {}", page.url));
    }
    md.trim_end().to_owned()
}
