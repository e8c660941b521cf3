/// Header drag bookkeeping. Positions are CSS pixels relative to the
/// viewport's top-left corner.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub start_pointer: [f64; 2],
    pub start_origin: [f64; 2],
    pub margin: f64,
}

impl DragState {
    pub fn new(margin: f64) -> Self {
        Self {
            margin,
            ..Self::default()
        }
    }

    /// Press: remember where the pointer and the panel's top-left started.
    pub fn begin(&mut self, pointer: [f64; 2], origin: [f64; 2]) {
        self.active = true;
        self.start_pointer = pointer;
        self.start_origin = origin;
    }

    /// Move: new `[left, top]` for the panel, or `None` when not dragging.
    ///
    /// Only the top and left edges are clamped; the panel may leave the
    /// viewport to the right or bottom.
    pub fn position(&self, pointer: [f64; 2]) -> Option<[f64; 2]> {
        if !self.active {
            return None;
        }
        let dx = pointer[0] - self.start_pointer[0];
        let dy = pointer[1] - self.start_pointer[1];
        Some([
            (self.start_origin[0] + dx).max(self.margin),
            (self.start_origin[1] + dy).max(self.margin),
        ])
    }

    /// Release.
    pub fn end(&mut self) {
        self.active = false;
    }
}
