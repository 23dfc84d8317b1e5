pub(crate) mod compositor;
pub(crate) mod drawtext;
pub(crate) mod ffmpeg;
