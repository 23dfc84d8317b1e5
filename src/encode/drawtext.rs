//! FFmpeg filter-graph text for a [`CaptionPlan`].
//!
//! Every instruction becomes one `drawtext` filter gated by an `enable` window, chained onto the
//! source video. Values pass through two escaping levels: filter options first, then the graph.

use std::fmt::Write as _;

use crate::compile::plan::{CaptionPlan, RenderInstruction};
use crate::style::resolve::ResolvedStyle;

/// Which optional inputs the ffmpeg invocation carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterInputs {
    /// An overlay video/image is input #1.
    pub overlay: bool,
    /// An intro sound follows the overlay (or the source when there is no overlay).
    pub intro_sound: bool,
    /// The source video has an audio stream.
    pub source_has_audio: bool,
}

impl FilterInputs {
    /// Input index of the intro sound, if any.
    pub fn intro_input(&self) -> Option<usize> {
        self.intro_sound.then_some(if self.overlay { 2 } else { 1 })
    }
}

/// How the output audio is produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AudioMap {
    /// Mapped from a labelled filter output.
    Filtered {
        /// Output pad label, including brackets.
        label: String,
        /// The filtered stream is padded forever; the output must stop at the shortest stream.
        needs_shortest: bool,
    },
    /// The source audio is passed through.
    Source,
    /// No audio at all.
    Silent,
}

/// A complete `-filter_complex` script and its output pads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterGraph {
    /// Filter graph text.
    pub script: String,
    /// Video output pad label, including brackets.
    pub video_label: String,
    /// Audio mapping.
    pub audio: AudioMap,
}

/// Build the filter graph drawing `plan` over input #0.
pub fn build_filter_graph(plan: &CaptionPlan, inputs: FilterInputs) -> FilterGraph {
    let mut chains = Vec::new();

    let base = if inputs.overlay {
        chains.push(format!(
            "[1:v]scale={}:{}[ovl]",
            plan.canvas.width, plan.canvas.height
        ));
        chains.push("[0:v][ovl]overlay=0:0:shortest=1[base]".to_owned());
        "[base]"
    } else {
        "[0:v]"
    };

    let filters: Vec<String> = plan
        .instructions
        .iter()
        .filter_map(|i| plan.style_for(i).map(|style| drawtext(i, style)))
        .collect();
    if filters.is_empty() {
        chains.push(format!("{base}null[vout]"));
    } else {
        chains.push(format!("{base}{}[vout]", filters.join(",\n")));
    }

    let audio = match (inputs.intro_input(), inputs.source_has_audio) {
        (Some(k), true) => {
            chains.push(format!(
                "[0:a][{k}:a]amix=inputs=2:duration=first:dropout_transition=0[aout]"
            ));
            AudioMap::Filtered {
                label: "[aout]".to_owned(),
                needs_shortest: false,
            }
        }
        (Some(k), false) => {
            chains.push(format!("[{k}:a]apad[aout]"));
            AudioMap::Filtered {
                label: "[aout]".to_owned(),
                needs_shortest: true,
            }
        }
        (None, true) => AudioMap::Source,
        (None, false) => AudioMap::Silent,
    };

    FilterGraph {
        script: chains.join(";\n"),
        video_label: "[vout]".to_owned(),
        audio,
    }
}

/// One `drawtext` filter for `instr`, already escaped for a filter graph.
pub fn drawtext(instr: &RenderInstruction, style: &ResolvedStyle) -> String {
    let mut out = String::from("drawtext=");
    let _ = write!(
        out,
        "fontfile={}:text={}:expansion=none:fontsize={:.2}:fontcolor={}:x={:.2}:y={:.2}",
        escape(&style.font),
        escape(&instr.text),
        instr.font_size_px,
        instr.color.to_ffmpeg(),
        instr.rect.x0,
        instr.rect.y0,
    );

    let border = (f64::from(style.stroke_width) * instr.scale).round() as u32;
    if border > 0 && !style.stroke_color.is_transparent() {
        let _ = write!(
            out,
            ":borderw={border}:bordercolor={}",
            style.stroke_color.to_ffmpeg()
        );
    }
    if !style.bg_color.is_transparent() {
        let pad = (instr.font_size_px * 0.1).round().max(1.0) as u32;
        let _ = write!(
            out,
            ":box=1:boxcolor={}:boxborderw={pad}",
            style.bg_color.to_ffmpeg()
        );
    }

    let enable = format!(
        "gte(t,{})*lt(t,{})",
        instr.interval.start, instr.interval.end
    );
    let _ = write!(out, ":enable={}", escape(&enable));
    out
}

/// Escape a filter option value, then the result for the enclosing graph.
pub fn escape(value: &str) -> String {
    escape_graph(&escape_option(value))
}

fn escape_option(value: &str) -> String {
    escape_chars(value, &['\\', '\'', ':'])
}

fn escape_graph(value: &str) -> String {
    escape_chars(value, &['\\', '\'', '[', ']', ',', ';'])
}

fn escape_chars(value: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/encode/drawtext.rs"]
mod tests;
