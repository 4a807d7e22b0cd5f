// Emotion display state
// Face markup plus four clamped percentage bars

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// Value shown for a field the server did not send
pub const DEFAULT_LEVEL: f64 = 50.0;

/// Why a face was rejected
#[derive(Debug, Error, PartialEq)]
pub enum SvgError {
    /// The XML parser gave up
    #[error("malformed XML: {0}")]
    Xml(String),
    /// Closing tag without an opening one
    #[error("unexpected closing tag")]
    UnexpectedEnd,
    /// Input ended inside an element
    #[error("unclosed element")]
    Unclosed,
    /// Root element is not <svg>
    #[error("root element is <{0}>, expected <svg>")]
    NotSvg(String),
    /// More than one top-level element
    #[error("more than one root element")]
    MultipleRoots,
    /// Non-whitespace text outside the root element
    #[error("text outside the root element")]
    StrayText,
    /// No element at all
    #[error("no <svg> element")]
    Empty,
}

fn check_root(element: &BytesStart, root_seen: &mut bool) -> Result<(), SvgError> {
    if *root_seen {
        return Err(SvgError::MultipleRoots);
    }
    let name = element.local_name();
    if name.as_ref() != b"svg" {
        return Err(SvgError::NotSvg(
            String::from_utf8_lossy(name.as_ref()).into_owned(),
        ));
    }
    *root_seen = true;
    Ok(())
}

/// Check that markup is well-formed XML with a single `<svg>` root
pub fn validate_svg(markup: &str) -> Result<(), SvgError> {
    let mut reader = Reader::from_str(markup);
    let mut depth = 0usize;
    let mut root_seen = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) => {
                if depth == 0 {
                    check_root(&element, &mut root_seen)?;
                }
                depth += 1;
            }
            Ok(Event::Empty(element)) => {
                if depth == 0 {
                    check_root(&element, &mut root_seen)?;
                }
            }
            Ok(Event::End(_)) => {
                depth = depth.checked_sub(1).ok_or(SvgError::UnexpectedEnd)?;
            }
            Ok(Event::Text(text)) => {
                if depth == 0 && !text.iter().all(|b| b.is_ascii_whitespace()) {
                    return Err(SvgError::StrayText);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(SvgError::Xml(e.to_string())),
        }
    }

    if depth != 0 {
        return Err(SvgError::Unclosed);
    }
    if !root_seen {
        return Err(SvgError::Empty);
    }
    Ok(())
}

/// Clamp a percentage into [0, 100]; missing or NaN shows the default
pub fn clamp_level(value: Option<f64>) -> f64 {
    match value {
        Some(v) if !v.is_nan() => v.clamp(0.0, 100.0),
        _ => DEFAULT_LEVEL,
    }
}

/// Colour band of a bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarTier {
    /// 75 and above
    Green,
    /// 25 up to 75
    Orange,
    /// Below 25
    Red,
}

impl BarTier {
    /// Band for an already clamped value
    pub fn for_level(level: f64) -> Self {
        if level >= 75.0 {
            BarTier::Green
        } else if level >= 25.0 {
            BarTier::Orange
        } else {
            BarTier::Red
        }
    }
}

/// One percentage bar
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionBar {
    /// Display label
    pub label: &'static str,
    /// Clamped level in [0, 100]
    pub level: f64,
}

impl EmotionBar {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            level: DEFAULT_LEVEL,
        }
    }

    /// Width as a fraction of the track, in [0, 1]
    pub fn fraction(&self) -> f32 {
        (self.level / 100.0) as f32
    }

    /// Colour band
    pub fn tier(&self) -> BarTier {
        BarTier::for_level(self.level)
    }
}

/// Everything the server may send for the emotion panel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmotionUpdate {
    /// Face markup
    pub svg: Option<String>,
    /// Happiness percentage
    pub happiness: Option<f64>,
    /// Energy percentage
    pub energy: Option<f64>,
    /// Calmness percentage
    pub calmness: Option<f64>,
    /// Confidence percentage
    pub confidence: Option<f64>,
    /// Primary emotion label
    pub primary_emotion: Option<String>,
}

/// The emotion panel: face, label and bars
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionDisplay {
    face_svg: Option<String>,
    face_generation: u64,
    /// Bars in display order: happiness, energy, calmness, confidence
    pub bars: [EmotionBar; 4],
    /// Primary emotion label
    pub primary_emotion: String,
}

impl Default for EmotionDisplay {
    fn default() -> Self {
        Self {
            face_svg: None,
            face_generation: 0,
            bars: [
                EmotionBar::new("Happiness"),
                EmotionBar::new("Energy"),
                EmotionBar::new("Calmness"),
                EmotionBar::new("Confidence"),
            ],
            primary_emotion: "neutral".to_string(),
        }
    }
}

impl EmotionDisplay {
    /// Create a display at the neutral midpoint with no face
    pub fn new() -> Self {
        Self::default()
    }

    /// Current face markup, if any was accepted
    pub fn face_svg(&self) -> Option<&str> {
        self.face_svg.as_deref()
    }

    /// Image-cache key of the current face
    ///
    /// Unique per accepted face; the cached image behind a superseded key must
    /// be released by whoever renders it.
    pub fn face_uri(&self) -> Option<String> {
        self.face_svg
            .as_ref()
            .map(|_| format!("bytes://emotibot-face-{}.svg", self.face_generation))
    }

    /// Apply a server update, returning the key of a face it replaced
    ///
    /// A face that fails validation is dropped with a warning and the previous
    /// face stays. Bars always update; missing fields fall back to 50.
    pub fn apply(&mut self, update: &EmotionUpdate) -> Option<String> {
        let mut retired = None;
        if let Some(svg) = &update.svg {
            match validate_svg(svg) {
                Ok(()) => {
                    retired = self.face_uri();
                    self.face_svg = Some(svg.clone());
                    self.face_generation += 1;
                }
                Err(e) => tracing::warn!(error = %e, "Dropping malformed SVG face"),
            }
        }

        let levels = [
            update.happiness,
            update.energy,
            update.calmness,
            update.confidence,
        ];
        for (bar, level) in self.bars.iter_mut().zip(levels) {
            bar.level = clamp_level(level);
        }

        if let Some(label) = update.primary_emotion.as_ref().filter(|l| !l.is_empty()) {
            self.primary_emotion = label.clone();
        }
        retired
    }

    /// Back to the neutral display, returning the key of the dropped face
    ///
    /// The generation keeps counting so a later face never reuses a key.
    pub fn reset(&mut self) -> Option<String> {
        let retired = self.face_uri();
        *self = Self {
            face_generation: self.face_generation,
            ..Self::default()
        };
        retired
    }
}
