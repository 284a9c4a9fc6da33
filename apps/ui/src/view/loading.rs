//! The loading indicator: spinner frames plus a fixed caption. Stateless —
//! callers pass a tick counter and print whatever comes back.

const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub struct LoadingIndicator;

impl LoadingIndicator {
    pub const CAPTION: &'static str = "Calculating Rankings...";
    pub const HINT: &'static str = "This may take a few moments";

    /// The spinner line for a given tick.
    pub fn frame(tick: usize) -> String {
        format!("{} {}", FRAMES[tick % FRAMES.len()], Self::CAPTION)
    }
}
