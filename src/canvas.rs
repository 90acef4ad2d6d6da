//! The sound canvas: records a visual marker for every pointer click

/// Width in pixels of the canvas border, subtracted from marker positions
const BORDER_WIDTH: f64 = 2.;

/// Bounding rectangle of the canvas container, in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// A pointer click, in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerClick {
    pub client_x: f64,
    pub client_y: f64,
}

/// A dot rendered at a recorded click position, relative to the canvas
/// top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub left: f64,
    pub top: f64,
}

/// Marker layer of the page.
///
/// Markers are append-only: they are never pruned or mutated, so the list
/// grows without bound over a session.
pub struct SoundCanvas {
    bounds: Rect,
    markers: Vec<Marker>,
}

impl SoundCanvas {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            markers: Vec::new(),
        }
    }

    /// Record a marker for a click.
    ///
    /// The position is not clamped to the canvas; a click exactly on the
    /// border yields a negative offset (accepted quirk of the original page).
    pub fn place_marker(&mut self, click: PointerClick) -> Marker {
        let marker = Marker {
            left: click.client_x - self.bounds.left - BORDER_WIDTH,
            top: click.client_y - self.bounds.top - BORDER_WIDTH,
        };

        log::debug!(
            "click at ({}, {}) places marker at ({}, {})",
            click.client_x,
            click.client_y,
            marker.left,
            marker.top
        );

        self.markers.push(marker);
        marker
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> SoundCanvas {
        SoundCanvas::new(Rect {
            left: 100.,
            top: 50.,
            width: 640.,
            height: 480.,
        })
    }

    #[test]
    fn test_marker_position_is_border_corrected() {
        let mut canvas = canvas();

        let marker = canvas.place_marker(PointerClick {
            client_x: 150.,
            client_y: 75.,
        });

        assert_eq!(marker, Marker { left: 48., top: 23. });
    }

    #[test]
    fn test_border_click_yields_negative_offset() {
        let mut canvas = canvas();

        // click exactly on the container corner
        let marker = canvas.place_marker(PointerClick {
            client_x: 100.,
            client_y: 50.,
        });

        assert_eq!(
            marker,
            Marker {
                left: -2.,
                top: -2.
            }
        );
    }

    #[test]
    fn test_markers_are_append_only() {
        let mut canvas = canvas();

        for i in 0..10 {
            canvas.place_marker(PointerClick {
                client_x: 110. + f64::from(i),
                client_y: 60.,
            });
        }

        assert_eq!(canvas.markers().len(), 10);
        assert_eq!(canvas.markers()[0], Marker { left: 8., top: 8. });
        assert_eq!(canvas.markers()[9], Marker { left: 17., top: 8. });
    }
}
