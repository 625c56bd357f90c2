use std::fmt;

use anyhow::Context as _;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeaningMode {
    /// Inline meaning annotations are shown.
    #[default]
    Open,
    /// Annotations are hidden; a glossary trails the page instead.
    Closed,
}

impl MeaningMode {
    fn from_flag(flag: Option<regex::Match<'_>>) -> Self {
        match flag.map(|m| m.as_str()) {
            Some("kapali") => Self::Closed,
            _ => Self::Open,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Self::Open => "",
            Self::Closed => " kapali",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Help,
    Toc,
    Kelime,
    Soz {
        soz_no: u32,
        page_no: u32,
        meaning: MeaningMode,
    },
    SozlerPage {
        global_id: u32,
        meaning: MeaningMode,
    },
    Interlude {
        slug: String,
        page_no: u32,
        meaning: MeaningMode,
    },
}

impl Command {
    pub fn meaning(&self) -> Option<MeaningMode> {
        match self {
            Self::Soz { meaning, .. }
            | Self::SozlerPage { meaning, .. }
            | Self::Interlude { meaning, .. } => Some(*meaning),
            Self::Help | Self::Toc | Self::Kelime => None,
        }
    }

    /// Same target with the other meaning mode; `None` for non-page commands.
    pub fn with_meaning_toggled(&self) -> Option<Self> {
        let mut toggled = self.clone();
        match &mut toggled {
            Self::Soz { meaning, .. }
            | Self::SozlerPage { meaning, .. }
            | Self::Interlude { meaning, .. } => *meaning = meaning.toggled(),
            Self::Help | Self::Toc | Self::Kelime => return None,
        }
        Some(toggled)
    }
}

/// Canonical slash form; parses back to the same command.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Help => f.write_str("/risale"),
            Self::Toc => f.write_str("/risale icindekiler"),
            Self::Kelime => f.write_str("/risale kelimeler"),
            Self::Soz {
                soz_no,
                page_no: 1,
                meaning,
            } => write!(f, "/risalesozler {soz_no}{}", meaning.suffix()),
            Self::Soz {
                soz_no,
                page_no,
                meaning,
            } => write!(
                f,
                "/risalesozler {soz_no} sayfa {page_no}{}",
                meaning.suffix()
            ),
            Self::SozlerPage { global_id, meaning } => {
                write!(f, "/risalesozlersayfa {global_id}{}", meaning.suffix())
            }
            Self::Interlude {
                slug,
                page_no,
                meaning,
            } => write!(f, "/risale {slug} sayfa {page_no}{}", meaning.suffix()),
        }
    }
}

type Build = fn(&Captures<'_>) -> Option<Command>;

struct Rule {
    name: &'static str,
    pattern: Regex,
    build: Build,
}

/// Ordered regex cascade; the first rule whose pattern matches and whose
/// captures convert wins. Page-qualified chapter rules come before the bare
/// chapter rule, and the slug rule comes last.
pub struct CommandParser {
    rules: Vec<Rule>,
}

const SOZ_KEYWORD: &str = r"risale\s*(?:sozleri|sozler|soz)";

impl CommandParser {
    pub fn new() -> anyhow::Result<Self> {
        let specs: [(&'static str, String, Build); 8] = [
            ("help", r"^risale$".to_owned(), |_| Some(Command::Help)),
            (
                "toc",
                r"^risale\s+(?:icindekiler|liste)$|^risale(?:icindekiler|liste)$".to_owned(),
                |_| Some(Command::Toc),
            ),
            (
                "kelime",
                r"^risale\s+(?:kelimeler|kelime)$|^risalekelime(?:ler)?$".to_owned(),
                |_| Some(Command::Kelime),
            ),
            (
                "soz_page",
                format!(r"{SOZ_KEYWORD}\s*(\d+)\s*sayfa\s*(\d+)(?:\s*(kapali))?"),
                |caps| {
                    Some(Command::Soz {
                        soz_no: number(caps, 1)?,
                        page_no: number(caps, 2)?,
                        meaning: MeaningMode::from_flag(caps.get(3)),
                    })
                },
            ),
            (
                "soz_closed",
                format!(r"{SOZ_KEYWORD}\s*(\d+)\s*kapali"),
                |caps| {
                    Some(Command::Soz {
                        soz_no: number(caps, 1)?,
                        page_no: 1,
                        meaning: MeaningMode::Closed,
                    })
                },
            ),
            ("soz", format!(r"{SOZ_KEYWORD}\s*(\d+)"), |caps| {
                Some(Command::Soz {
                    soz_no: number(caps, 1)?,
                    page_no: 1,
                    meaning: MeaningMode::Open,
                })
            }),
            (
                "sozler_page",
                format!(r"{SOZ_KEYWORD}\s*sayfa\s*(\d+)(?:\s*(kapali))?"),
                |caps| {
                    Some(Command::SozlerPage {
                        global_id: number(caps, 1)?,
                        meaning: MeaningMode::from_flag(caps.get(2)),
                    })
                },
            ),
            (
                "interlude",
                r"^risale\s+([a-z0-9-]+)\s+sayfa\s+(\d+)(?:\s+(kapali))?$|^risale([a-z0-9-]+)sayfa(\d+)(kapali)?$"
                    .to_owned(),
                |caps| {
                    let slug = caps.get(1).or_else(|| caps.get(4))?.as_str().to_owned();
                    let page_no = caps
                        .get(2)
                        .or_else(|| caps.get(5))?
                        .as_str()
                        .parse()
                        .ok()?;
                    Some(Command::Interlude {
                        slug,
                        page_no,
                        meaning: MeaningMode::from_flag(caps.get(3).or_else(|| caps.get(6))),
                    })
                },
            ),
        ];

        let rules = specs
            .into_iter()
            .map(|(name, pattern, build)| {
                let pattern = Regex::new(&pattern)
                    .with_context(|| format!("compile command pattern: {name}"))?;
                Ok(Rule {
                    name,
                    pattern,
                    build,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Never fails: anything unrecognized is `Command::Help`.
    pub fn parse(&self, text: &str) -> Command {
        let normalized = normalize(text);
        for rule in &self.rules {
            let Some(caps) = rule.pattern.captures(&normalized) else {
                continue;
            };
            if let Some(command) = (rule.build)(&caps) {
                tracing::debug!(rule = rule.name, ?command, "parsed command");
                return command;
            }
        }
        Command::Help
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name)
    }
}

fn number(caps: &Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group)?.as_str().parse().ok()
}
