/// Word cloud of paper titles.
///
/// ```text
///  joined titles ──► words::word_frequencies ──► CloudContent
///                                                   │ Words(..)
///                                                   ▼
///                    layout::layout_words (spiral placement) ──► CloudLayout
/// ```
///
/// Frequencies are recomputed whenever the filtered view changes; the layout
/// needs glyph metrics and is built lazily by the UI.

pub mod layout;
pub mod words;
