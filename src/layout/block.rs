use crate::caption::group::Chunk;
use crate::foundation::core::{Canvas, Rect};
use crate::foundation::error::CaptionResult;
use crate::layout::measure::{TextExtent, TextMeasure};
use crate::style::resolve::ResolvedStyle;
use crate::style::spec::{DisplayMode, Position, StyleSpec, TextAlign};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Resting placement of one word.
pub struct WordBox {
    /// Local index of the word in its chunk.
    pub word_index: usize,
    /// Wrapped line the word sits on.
    pub line: usize,
    /// Rectangle at scale 1.0, in canvas pixels.
    pub rect: Rect,
}

impl WordBox {
    /// The rectangle scaled about its center.
    pub fn scaled(&self, scale: f64) -> Rect {
        Rect::from_center_size(self.rect.center(), self.rect.size() * scale)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Placement of every word of a chunk.
pub struct ChunkLayout {
    /// One box per word, in word order.
    pub words: Vec<WordBox>,
    /// Union of all word boxes.
    pub bounds: Rect,
}

/// Placement parameters shared by every line of a block.
#[derive(Clone, Copy, Debug)]
pub struct BlockParams {
    /// Font size in pixels.
    pub font_size: u32,
    /// Vertical anchor.
    pub position: Position,
    /// Line alignment.
    pub text_align: TextAlign,
    /// Inset from the frame edges.
    pub margin: u32,
    /// Line height multiplier.
    pub line_spacing: f64,
}

/// Lay out a chunk for its resolved style.
///
/// In [`DisplayMode::Word`] each word is placed on its own, at the anchor, because only one
/// word is on screen at a time.
pub fn layout_chunk(
    chunk: &Chunk,
    style: &ResolvedStyle,
    spec: &StyleSpec,
    canvas: Canvas,
    measure: &mut dyn TextMeasure,
) -> CaptionResult<ChunkLayout> {
    let params = BlockParams {
        font_size: style.font_size,
        position: style.position,
        text_align: style.text_align,
        margin: spec.margin,
        line_spacing: spec.line_spacing,
    };
    let texts: Vec<&str> = chunk.words.iter().map(|w| w.text.as_str()).collect();
    match spec.display {
        DisplayMode::Chunk => layout_words(&texts, params, canvas, measure),
        DisplayMode::Word => {
            let mut words = Vec::with_capacity(texts.len());
            for (i, text) in texts.iter().enumerate() {
                let single = layout_words(&[*text], params, canvas, measure)?;
                words.extend(single.words.into_iter().map(|b| WordBox {
                    word_index: i,
                    ..b
                }));
            }
            Ok(ChunkLayout {
                bounds: union_of(&words),
                words,
            })
        }
    }
}

/// Greedy-wrap `texts` within the canvas width minus margins and anchor the block.
pub fn layout_words(
    texts: &[&str],
    params: BlockParams,
    canvas: Canvas,
    measure: &mut dyn TextMeasure,
) -> CaptionResult<ChunkLayout> {
    let size_px = params.font_size as f32;
    let margin = f64::from(params.margin);
    let width = f64::from(canvas.width);
    let height = f64::from(canvas.height);
    let max_line_w = (width - 2.0 * margin).max(1.0);
    let gap = measure.word_gap(size_px)?;

    let mut lines: Vec<Vec<(usize, TextExtent)>> = Vec::new();
    let mut line_w = 0.0;
    for (i, text) in texts.iter().enumerate() {
        let ext = measure.measure(text, size_px)?;
        match lines.last_mut() {
            Some(line) if line_w + gap + ext.width <= max_line_w => {
                line_w += gap + ext.width;
                line.push((i, ext));
            }
            _ => {
                line_w = ext.width;
                lines.push(vec![(i, ext)]);
            }
        }
    }

    let line_heights: Vec<f64> = lines
        .iter()
        .map(|line| {
            let tallest = line.iter().map(|(_, e)| e.height).fold(0.0, f64::max);
            tallest.max(f64::from(params.font_size)) * params.line_spacing
        })
        .collect();
    let block_h: f64 = line_heights.iter().sum();
    let top = match params.position {
        Position::Top => margin,
        Position::Center => (height - block_h) * 0.5,
        Position::Bottom => height - margin - block_h,
    };

    let mut words = Vec::with_capacity(texts.len());
    let mut y = top;
    for (line_no, (line, line_h)) in lines.iter().zip(&line_heights).enumerate() {
        let content_w: f64 = line.iter().map(|(_, e)| e.width).sum::<f64>()
            + gap * (line.len().saturating_sub(1)) as f64;
        let mut x = match params.text_align {
            TextAlign::Left => margin,
            TextAlign::Center => (width - content_w) * 0.5,
            TextAlign::Right => width - margin - content_w,
        };
        for &(word_index, ext) in line {
            let y0 = y + (line_h - ext.height) * 0.5;
            words.push(WordBox {
                word_index,
                line: line_no,
                rect: Rect::new(x, y0, x + ext.width, y0 + ext.height),
            });
            x += ext.width + gap;
        }
        y += line_h;
    }

    Ok(ChunkLayout {
        bounds: union_of(&words),
        words,
    })
}

fn union_of(words: &[WordBox]) -> Rect {
    words
        .iter()
        .map(|w| w.rect)
        .reduce(|a, b| a.union(b))
        .unwrap_or(Rect::ZERO)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/block.rs"]
mod tests;
