/// How a control is presented: label, physical range and response curve.
///
/// The synthesis core never reads this except to parameterize the remap
/// layers; it exists so a front-end can turn a normalized knob position
/// into the physical value the knob controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Meta {
    pub label: &'static str,
    /// Multiplier applied to the physical value for display.
    pub scale: f32,
    /// Steepness of a sigmoid response. 0 is linear.
    pub linearity: f32,
    /// Display on a logarithmic scale between `low` and `high`.
    pub log: bool,
    pub low: f32,
    pub high: f32,
}

impl Meta {
    /// Metadata of an unused slot.
    pub const BLANK: Meta = Meta {
        label: "",
        scale: 1.0,
        linearity: 0.0,
        log: false,
        low: 0.0,
        high: 1.0,
    };

    pub const fn new(label: &'static str, low: f32, high: f32) -> Self {
        Self {
            label,
            low,
            high,
            ..Self::BLANK
        }
    }

    pub const fn logarithmic(mut self) -> Self {
        self.log = true;
        self
    }

    pub const fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub const fn with_linearity(mut self, linearity: f32) -> Self {
        self.linearity = linearity;
        self
    }

    pub fn is_blank(&self) -> bool {
        self.label.is_empty()
    }

    fn is_log(&self) -> bool {
        self.log && self.low > 0.0 && self.high > 0.0
    }

    /// Physical value shown for a normalized knob position.
    pub fn display(&self, normalized: f32) -> f32 {
        let v = normalized.clamp(0.0, 1.0);
        let physical = if self.is_log() {
            self.low * (self.high / self.low).powf(v)
        } else {
            self.low + (self.high - self.low) * v
        };
        physical * self.scale
    }

    /// Knob position that displays `physical`. Inverse of [`Meta::display`].
    pub fn normalize(&self, physical: f32) -> f32 {
        let p = physical / self.scale;
        let v = if self.is_log() {
            (p / self.low).ln() / (self.high / self.low).ln()
        } else if self.high != self.low {
            (p - self.low) / (self.high - self.low)
        } else {
            0.0
        };
        if v.is_finite() {
            v.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

impl Default for Meta {
    fn default() -> Self {
        Self::BLANK
    }
}
