/// Member visibility marker found at the start of a class-diagram line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,    // +
    Private,   // -
    Protected, // #
    Package,   // ~
}

impl Visibility {
    pub fn from_marker(text: &str) -> Option<Self> {
        match text.trim_start().chars().next()? {
            '+' => Some(Visibility::Public),
            '-' => Some(Visibility::Private),
            '#' => Some(Visibility::Protected),
            '~' => Some(Visibility::Package),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramLine {
    pub text: String,
    pub visibility: Option<Visibility>,
}

/// Output of a successful render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDiagram {
    /// Unique per render, derived from the stable diagram id
    pub render_id: String,
    /// Diagram type declared on the header line, e.g. `classDiagram`
    pub diagram_type: String,
    pub lines: Vec<DiagramLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ORIGIN: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 10.0;
/// Step applied by the zoom buttons
pub const BUTTON_ZOOM_FACTOR: f64 = 1.2;
/// Step applied per scroll-wheel notch
pub const WHEEL_ZOOM_FACTOR: f64 = 1.1;

/// Local zoom and pan state of one diagram view
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    scale: f64,
    offset: Offset,
    drag_anchor: Option<Offset>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Offset::ORIGIN,
            drag_anchor: None,
        }
    }
}

impl Viewport {
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Zoom level as shown on the toolbar
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }

    pub fn zoom_in(&mut self) {
        self.set_scale(self.scale * BUTTON_ZOOM_FACTOR);
    }

    pub fn zoom_out(&mut self) {
        self.set_scale(self.scale / BUTTON_ZOOM_FACTOR);
    }

    /// Scroll-wheel zoom; a negative delta (scrolling up) zooms in
    pub fn wheel(&mut self, delta_y: f64) {
        if delta_y < 0.0 {
            self.set_scale(self.scale * WHEEL_ZOOM_FACTOR);
        } else {
            self.set_scale(self.scale / WHEEL_ZOOM_FACTOR);
        }
    }

    pub fn begin_drag(&mut self, pointer: Offset) {
        self.drag_anchor = Some(Offset::new(pointer.x - self.offset.x, pointer.y - self.offset.y));
    }

    pub fn drag_to(&mut self, pointer: Offset) {
        if let Some(anchor) = self.drag_anchor {
            self.offset = Offset::new(pointer.x - anchor.x, pointer.y - anchor.y);
        }
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    /// Move the view by a relative amount, as the keyboard pan controls do
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset = Offset::new(self.offset.x + dx, self.offset.y + dy);
    }

    pub fn reset(&mut self) {
        *self = Viewport::default();
    }

    fn set_scale(&mut self, scale: f64) {
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
    }
}
