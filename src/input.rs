//! Pointer coordinate mapping
//!
//! Touch and mouse events arrive in client (page) pixels. The simulation wants
//! a paddle-center x in field units.

/// Where the field is drawn on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Client x of the field's left edge
    pub left: f32,
    /// Displayed width in client pixels
    pub display_width: f32,
}

impl Viewport {
    /// Convert a client x to field units
    ///
    /// A non-positive display width (element hidden or not yet laid out)
    /// falls back to 1:1 scale.
    pub fn field_x(&self, client_x: f32, field_width: f32) -> f32 {
        let relative = client_x - self.left;
        if self.display_width > 0.0 {
            relative * field_width / self.display_width
        } else {
            relative
        }
    }
}
