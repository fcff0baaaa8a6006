//! Recording surface for native runs and tests

use super::{DrawCommand, Surface};

/// Surface that keeps the most recent frame in memory
#[derive(Debug, Default)]
pub struct CommandRecorder {
    pub frames: u64,
    pub last_frame: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for CommandRecorder {
    fn draw(&mut self, commands: &[DrawCommand]) {
        self.frames += 1;
        self.last_frame.clear();
        self.last_frame.extend_from_slice(commands);
    }
}
