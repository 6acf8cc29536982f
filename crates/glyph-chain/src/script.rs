use glyph_core::dead_key::{DeadKeyCombiner, DeadKeyPreCombiner};
use glyph_core::hangul::KoreanCombiner;
use glyph_core::khipro::BnKhiproCombiner;
use glyph_core::nfc::NfcNormalizingCombiner;
use glyph_core::settings::{LatinComposition, Settings};
use glyph_core::wylie::WylieCombiner;
use glyph_core::Combiner;

pub(crate) type BoxedCombiner = Box<dyn Combiner + Send>;

/// The writing system a chain composes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Script {
    #[default]
    Latin,
    Hangul,
    /// Tibetan, typed in Extended Wylie.
    Tibetan,
    /// Bengali, typed in Khipro.
    Bengali,
}

impl Script {
    pub const ALL: [Script; 4] = [
        Script::Latin,
        Script::Hangul,
        Script::Tibetan,
        Script::Bengali,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Script::Latin => "latin",
            Script::Hangul => "hangul",
            Script::Tibetan => "tibetan",
            Script::Bengali => "bengali",
        }
    }

    pub fn from_name(name: &str) -> Option<Script> {
        Script::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }

    /// Name of the combiner that owns whole words and may commit them.
    /// Latin has none: its words end only at separators.
    pub fn word_combiner(self) -> Option<&'static str> {
        match self {
            Script::Latin => None,
            Script::Hangul => Some("korean"),
            Script::Tibetan => Some("wylie"),
            Script::Bengali => Some("khipro"),
        }
    }

    /// Combiners for this script, in processing order.
    pub(crate) fn combiners(self, settings: &Settings) -> Vec<BoxedCombiner> {
        let dead_keys = || -> Vec<BoxedCombiner> {
            vec![
                Box::new(DeadKeyPreCombiner::new()),
                Box::new(DeadKeyCombiner::new()),
            ]
        };
        match self {
            Script::Latin => match settings.latin.composition {
                LatinComposition::DeadKey => dead_keys(),
                LatinComposition::Nfc => vec![Box::new(NfcNormalizingCombiner::new())],
            },
            Script::Hangul => {
                let mut combiners = dead_keys();
                combiners.push(Box::new(KoreanCombiner::new(
                    settings.korean.combine_initials,
                )));
                combiners
            }
            Script::Tibetan => {
                let mut combiners = dead_keys();
                combiners.push(Box::new(WylieCombiner::new()));
                combiners
            }
            Script::Bengali => {
                let mut combiners = dead_keys();
                combiners.push(Box::new(BnKhiproCombiner::new(
                    settings.khipro.commit_suffix.clone(),
                )));
                combiners
            }
        }
    }
}

impl std::fmt::Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
