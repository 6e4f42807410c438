pub mod annotator;
pub mod surface;

pub use annotator::{
    render_entry,
    render_live_line,
    render_word,
    Tone,
};
pub use surface::{
    LineStyle,
    RenderSurface,
    RenderedLine,
    RenderedWord,
};
