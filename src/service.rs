use std::sync::Arc;

use rand::Rng as _;
use rand::seq::SliceRandom as _;

use crate::command::{Command, CommandParser, MeaningMode};
use crate::config::{DEFAULT_WORDS_COUNT, MAX_SOZ_COUNT, MESSAGE_MAX_LENGTH, RisaleConfig};
use crate::index::{ContentIndex, Dictionary};
use crate::navigation::Navigator;
use crate::render::{
    self, BUTTON_MEANING_CLOSE, BUTTON_MEANING_OPEN, BUTTON_NEXT, BUTTON_PREVIOUS, BUTTON_RANDOM,
    BUTTON_TOC, BUTTON_WORDS, Button, Navigation, RenderedResponse,
};
use crate::resolver::{PageResolver, ResolvedPage};
use crate::store::{ContentStore, LocalFsStore};

/// Text in, rendered reply out. One instance owns one set of index caches.
pub struct RisaleService {
    parser: CommandParser,
    index: Arc<ContentIndex>,
    resolver: PageResolver,
    navigator: Navigator,
}

impl RisaleService {
    pub fn new(store: Arc<dyn ContentStore>) -> anyhow::Result<Self> {
        let index = Arc::new(ContentIndex::new(store));
        Ok(Self {
            parser: CommandParser::new()?,
            resolver: PageResolver::new(Arc::clone(&index)),
            navigator: Navigator::new(Arc::clone(&index)),
            index,
        })
    }

    pub fn from_config(config: &RisaleConfig) -> anyhow::Result<Self> {
        Self::new(Arc::new(LocalFsStore::new(&config.data_dir)))
    }

    pub fn index(&self) -> &ContentIndex {
        &self.index
    }

    pub fn parse_command(&self, text: &str) -> Command {
        self.parser.parse(text)
    }

    pub async fn handle_text(&self, text: &str) -> RenderedResponse {
        let command = self.parse_command(text);
        self.handle_command(&command).await
    }

    pub async fn handle_command(&self, command: &Command) -> RenderedResponse {
        match command {
            Command::Help => RenderedResponse::text(render::help_message()).with_buttons([
                Button::new(&Command::Toc, BUTTON_TOC),
                Button::new(&random_chapter(), BUTTON_RANDOM),
                Button::new(&Command::Kelime, BUTTON_WORDS),
            ]),
            Command::Toc => RenderedResponse::text(render::toc_summary(self.index.toc().await))
                .with_buttons([
                    Button::new(&random_chapter(), BUTTON_RANDOM),
                    Button::new(&Command::Kelime, BUTTON_WORDS),
                ]),
            Command::Kelime => {
                let words = pick_words(self.index.dictionary().await, DEFAULT_WORDS_COUNT);
                RenderedResponse::text(render::random_words(words)).with_buttons([
                    Button::new(&Command::Kelime, BUTTON_WORDS),
                    Button::new(&Command::Toc, BUTTON_TOC),
                ])
            }
            Command::Soz {
                soz_no,
                page_no,
                meaning,
            } => self.chapter_page(command, *soz_no, *page_no, *meaning).await,
            Command::SozlerPage { global_id, meaning } => {
                self.global_page(command, *global_id, *meaning).await
            }
            Command::Interlude {
                slug,
                page_no,
                meaning,
            } => {
                match self
                    .resolver
                    .get_interlude_page(slug, *page_no, *meaning)
                    .await
                {
                    Some(resolved) => self.page_response(command, &resolved).await,
                    None => RenderedResponse::text(format!(
                        "❌ \"{slug}\" bölümünün {page_no}. sayfası bulunamadı."
                    ))
                    .with_buttons([Button::new(&Command::Toc, BUTTON_TOC)]),
                }
            }
        }
    }

    async fn chapter_page(
        &self,
        command: &Command,
        soz_no: u32,
        page_no: u32,
        meaning: MeaningMode,
    ) -> RenderedResponse {
        let Some(chapter) = self.index.chapter_info(soz_no).await else {
            return RenderedResponse::text(format!(
                "❌ {soz_no}. Söz bulunamadı. Lütfen 1-{MAX_SOZ_COUNT} arası bir sayı girin."
            ))
            .with_buttons([Button::new(&Command::Toc, BUTTON_TOC)]);
        };

        match self.resolver.get_chapter_page(soz_no, page_no, meaning).await {
            Some(resolved) => self.page_response(command, &resolved).await,
            None if page_no > chapter.range.count => RenderedResponse::text(format!(
                "❌ {soz_no}. Söz'ün {page_no}. sayfası bulunamadı. Bu söz {} sayfa.",
                chapter.range.count
            )),
            None => RenderedResponse::text("❌ Sayfa bulunamadı."),
        }
    }

    async fn global_page(
        &self,
        command: &Command,
        global_id: u32,
        meaning: MeaningMode,
    ) -> RenderedResponse {
        let total = self.index.total_page_count().await;
        if global_id < 1 || global_id > total {
            return RenderedResponse::text(format!(
                "❌ Sözler Kitabı {global_id}. sayfa bulunamadı. Lütfen 1-{total} arası bir sayı girin."
            ));
        }

        match self.resolver.get_global_page(global_id, meaning).await {
            Some(resolved) => self.page_response(command, &resolved).await,
            None => RenderedResponse::text(format!(
                "❌ Sözler Kitabı {global_id}. sayfa bulunamadı."
            )),
        }
    }

    async fn page_response(&self, command: &Command, resolved: &ResolvedPage) -> RenderedResponse {
        let navigation = Navigation {
            previous: self.navigator.previous_page_info(resolved).await,
            next: self.navigator.next_page_info(resolved).await,
        };

        let mut buttons = Vec::new();
        if let Some(previous) = &navigation.previous {
            buttons.push(Button::new(&previous.command, BUTTON_PREVIOUS));
        }
        if let Some(next) = &navigation.next {
            buttons.push(Button::new(&next.command, BUTTON_NEXT));
        }
        if let Some(toggled) = command.with_meaning_toggled() {
            let title = match resolved.meaning {
                MeaningMode::Open => BUTTON_MEANING_CLOSE,
                MeaningMode::Closed => BUTTON_MEANING_OPEN,
            };
            buttons.push(Button::new(&toggled, title));
        }
        buttons.push(Button::new(&Command::Toc, BUTTON_TOC));

        let text = render::page_message(resolved, &navigation);
        let chars = text.chars().count();
        if chars > MESSAGE_MAX_LENGTH {
            tracing::debug!(chars, %command, "page reply spans several messages");
        }
        RenderedResponse {
            navigation: Some(navigation),
            ..RenderedResponse::text(text)
        }
        .with_buttons(buttons)
    }
}

fn random_chapter() -> Command {
    Command::Soz {
        soz_no: rand::thread_rng().gen_range(1..=MAX_SOZ_COUNT),
        page_no: 1,
        meaning: MeaningMode::Open,
    }
}

fn pick_words(dictionary: &Dictionary, count: usize) -> Vec<(&str, &str)> {
    let mut entries = dictionary
        .iter()
        .map(|(word, meaning)| (word.as_str(), meaning.as_str()))
        .collect::<Vec<_>>();
    entries.shuffle(&mut rand::thread_rng());
    entries.truncate(count);
    entries
}
