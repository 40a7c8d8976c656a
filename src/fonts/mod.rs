//! Font discovery and glyph geometry for the fixture renderers.
//!
//! Order templates mix Latin and CJK text, so the search list prefers faces that cover both.
//! When nothing loads, rendering continues with [`Typeface::Blocks`], which draws every glyph
//! as a solid bar so that layouts stay recognisable and output stays deterministic.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, warn};
use rusttype::{point, Font, Scale};

use crate::error::{FixtureError, Result};

/// Environment variable naming a single font file to use.
pub const FONT_FILE_ENV: &str = "ORDER_FIXTURES_FONT";

/// Environment variable naming a directory that is scanned for font files.
pub const FONT_DIR_ENV: &str = "ORDER_FIXTURES_FONTS_DIR";

const FONT_EXTENSIONS: &[&str] = &["ttf", "ttc", "otf"];

#[cfg(target_os = "macos")]
const SYSTEM_FONTS: &[&str] = &[
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
    "/System/Library/Fonts/STHeiti Medium.ttc",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
];

#[cfg(windows)]
const SYSTEM_FONTS: &[&str] = &[
    "C:/Windows/Fonts/msyh.ttc",
    "C:/Windows/Fonts/simsun.ttc",
    "C:/Windows/Fonts/simhei.ttf",
    "C:/Windows/Fonts/arial.ttf",
];

#[cfg(not(any(target_os = "macos", windows)))]
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-zenhei.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
];

/// Face used for every string drawn on a canvas.
#[derive(Clone)]
pub enum Typeface {
    /// A TrueType/OpenType face rasterized with `rusttype`.
    Outline {
        /// Parsed font data.
        font: Arc<Font<'static>>,
        /// File the face was loaded from.
        source: PathBuf,
    },
    /// Built-in fallback that renders glyphs as solid bars.
    Blocks,
}

impl fmt::Debug for Typeface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outline { source, .. } => f
                .debug_struct("Outline")
                .field("source", source)
                .finish(),
            Self::Blocks => f.write_str("Blocks"),
        }
    }
}

impl Typeface {
    /// Returns whether this is the built-in block fallback.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Blocks)
    }

    /// Short description for log output.
    pub fn describe(&self) -> String {
        match self {
            Self::Outline { source, .. } => source.display().to_string(),
            Self::Blocks => "built-in block glyphs".to_owned(),
        }
    }

    /// Distance from the top of a line to its baseline at `size` pixels per em.
    pub fn ascent(&self, size: f32) -> f32 {
        match self {
            Self::Outline { font, .. } => font.v_metrics(em_scale(font, size)).ascent,
            Self::Blocks => size * 0.8,
        }
    }

    /// Horizontal advance of `text` at `size` pixels per em.
    pub fn advance_width(&self, text: &str, size: f32) -> f32 {
        match self {
            Self::Outline { font, .. } => {
                let scale = em_scale(font, size);
                font.layout(text, scale, point(0.0, 0.0))
                    .last()
                    .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
                    .unwrap_or(0.0)
            }
            Self::Blocks => text.chars().map(|ch| block_advance(ch, size)).sum(),
        }
    }

    /// Rasterizes `text` with its top-left corner at `(x, y)`.
    ///
    /// `plot` receives absolute pixel coordinates and a coverage value in `0.0..=1.0`. Pixels
    /// may lie outside the destination; clipping is the caller's job.
    pub fn rasterize<F>(&self, text: &str, size: f32, x: f32, y: f32, mut plot: F)
    where
        F: FnMut(i32, i32, f32),
    {
        match self {
            Self::Outline { font, .. } => {
                let scale = em_scale(font, size);
                let baseline = y + font.v_metrics(scale).ascent;
                for glyph in font.layout(text, scale, point(x, baseline)) {
                    if let Some(bb) = glyph.pixel_bounding_box() {
                        glyph.draw(|gx, gy, coverage| {
                            plot(gx as i32 + bb.min.x, gy as i32 + bb.min.y, coverage);
                        });
                    }
                }
            }
            Self::Blocks => {
                let mut caret = x;
                for ch in text.chars() {
                    let advance = block_advance(ch, size);
                    if !ch.is_whitespace() {
                        let left = (caret + advance * 0.1).round() as i32;
                        let right = (caret + advance * 0.9).round() as i32;
                        let top = (y + size * 0.2).round() as i32;
                        let bottom = (y + size * 0.95).round() as i32;
                        for py in top..bottom {
                            for px in left..right.max(left + 1) {
                                plot(px, py, 1.0);
                            }
                        }
                    }
                    caret += advance;
                }
            }
        }
    }
}

// PIL sizes fonts by em; rusttype's uniform scale is the ascent-to-descent height.
fn em_scale(font: &Font<'static>, size: f32) -> Scale {
    let metrics = font.v_metrics_unscaled();
    let height = metrics.ascent - metrics.descent;
    let units = f32::from(font.units_per_em()).max(1.0);
    Scale::uniform(size * height / units)
}

fn block_advance(ch: char, size: f32) -> f32 {
    if ch.is_ascii() {
        size * 0.55
    } else {
        size
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

/// Lists the font files directly inside `directory`, sorted by file name.
pub fn directory_fonts(directory: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(directory) else {
        return Vec::new();
    };

    let mut fonts: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| FONT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    fonts.sort();
    fonts
}

/// Returns the ordered list of font files probed by [`default_typeface`].
pub fn font_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    let mut push = |path: PathBuf| {
        if !candidates.contains(&path) {
            candidates.push(path);
        }
    };

    if let Some(file) = env_path(FONT_FILE_ENV) {
        push(file);
    }

    if let Some(directory) = env_path(FONT_DIR_ENV) {
        directory_fonts(&directory).into_iter().for_each(&mut push);
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            directory_fonts(&bin_dir.join("assets/fonts"))
                .into_iter()
                .for_each(&mut push);
        }
    }

    let manifest_fonts = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts");
    directory_fonts(&manifest_fonts)
        .into_iter()
        .for_each(&mut push);

    SYSTEM_FONTS.iter().map(PathBuf::from).for_each(&mut push);

    candidates
}

/// Loads a single font file. Collections (`.ttc`) use their first face.
pub fn load_typeface(path: impl AsRef<Path>) -> Result<Typeface> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|err| FixtureError::io(path, err))?;
    let font = Font::try_from_vec_and_index(data, 0).ok_or_else(|| FixtureError::Font {
        path: path.to_path_buf(),
        message: "not a parseable TrueType/OpenType font".to_owned(),
    })?;

    Ok(Typeface::Outline {
        font: Arc::new(font),
        source: path.to_path_buf(),
    })
}

/// Returns the first candidate font that loads, or [`Typeface::Blocks`] when none does.
pub fn default_typeface() -> Typeface {
    let candidates = font_candidates();

    for candidate in candidates.iter().filter(|path| path.is_file()) {
        match load_typeface(candidate) {
            Ok(typeface) => {
                debug!("Using font {}", candidate.display());
                return typeface;
            }
            Err(err) => debug!("Skipping font candidate: {}", err),
        }
    }

    warn!(
        "No usable font found after checking {} candidates; falling back to block glyphs. Set {} to a TrueType file.",
        candidates.len(),
        FONT_FILE_ENV
    );
    Typeface::Blocks
}

/// Indicates whether any candidate font file exists on disk.
pub fn system_fonts_available() -> bool {
    font_candidates().iter().any(|path| path.is_file())
}
