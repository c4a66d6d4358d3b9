//! View domains and the pure projection from stored layout values to screen space.

use std::f64::consts::TAU;

use serde::Serialize;

use crate::domain::arena::NodeData;

/// Closed interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn lerp(self, to: Interval, t: f64) -> Interval {
        // Weighted form so t = 0 and t = 1 land exactly on the endpoints
        Interval::new(
            self.start * (1.0 - t) + to.start * t,
            self.end * (1.0 - t) + to.end * t,
        )
    }

    pub fn len(self) -> f64 {
        self.end - self.start
    }
}

/// Linear map of `value` from `domain` onto `range`. A degenerate domain maps
/// everything onto the start of the range.
pub fn scale(domain: Interval, range: Interval, value: f64) -> f64 {
    let width = domain.len();
    if width == 0.0 {
        return range.start;
    }
    range.start + (value - domain.start) / width * range.len()
}

/// The visible window of the angular and radial space.
///
/// Passed into every coordinate mapping and returned by focus transitions;
/// never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewDomain {
    /// Visible angular window, mapped onto the full circle
    pub angle_domain: Interval,
    /// Visible normalized radial window
    pub radius_domain: Interval,
    /// Screen radii the radial window maps onto
    pub radius_range: Interval,
}

impl ViewDomain {
    /// Angular range every domain maps onto.
    pub const ANGLE_RANGE: Interval = Interval::new(0.0, TAU);

    /// Full circle, full radius, no inner hole.
    pub fn overview(max_radius: f64) -> Self {
        Self {
            angle_domain: Interval::new(0.0, TAU),
            radius_domain: Interval::new(0.0, 1.0),
            radius_range: Interval::new(0.0, max_radius),
        }
    }

    /// Field-wise linear interpolation towards `to`; `t` is clamped to `[0, 1]`.
    pub fn interpolate(&self, to: &ViewDomain, t: f64) -> ViewDomain {
        let t = t.clamp(0.0, 1.0);
        ViewDomain {
            angle_domain: self.angle_domain.lerp(to.angle_domain, t),
            radius_domain: self.radius_domain.lerp(to.radius_domain, t),
            radius_range: self.radius_range.lerp(to.radius_range, t),
        }
    }

    /// Screen angle for a stored angle, unclamped.
    pub fn x(&self, angle: f64) -> f64 {
        scale(self.angle_domain, Self::ANGLE_RANGE, angle)
    }

    /// Screen radius for a stored normalized radius, unclamped.
    pub fn y(&self, radius: f64) -> f64 {
        scale(self.radius_domain, self.radius_range, radius)
    }
}

/// Screen-space arc of one node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcGeometry {
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

/// Project a node through `domain`. Angles are clamped to `[0, 2π]` and radii
/// to `>= 0`, since interpolated domains push nodes outside the visible window.
pub fn project(node: &NodeData, domain: &ViewDomain) -> ArcGeometry {
    let angle = |a: f64| domain.x(a).clamp(0.0, TAU);
    let radius = |r: f64| domain.y(r).max(0.0);
    ArcGeometry {
        start_angle: angle(node.angle_start),
        end_angle: angle(node.angle_end),
        inner_radius: radius(node.radius_inner),
        outer_radius: radius(node.radius_outer),
    }
}

/// Font-size parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizing {
    /// Scales band depth over label length
    pub font_factor: f64,
    /// Fixed size for the root label
    pub root_font_size: f64,
}

impl Default for FontSizing {
    fn default() -> Self {
        Self {
            font_factor: 14.0,
            root_font_size: 30.0,
        }
    }
}

/// Label font size under `domain`: the smaller of the inner-arc chord and the
/// band depth over the label length scaled by `font_factor`.
pub fn font_size(node: &NodeData, is_root: bool, domain: &ViewDomain, sizing: &FontSizing) -> f64 {
    if is_root {
        return sizing.root_font_size;
    }
    let arc = project(node, domain);
    let inner_arc = (arc.end_angle - arc.start_angle) * arc.inner_radius;
    if node.text_len <= 0.0 {
        return inner_arc;
    }
    let band = domain.y(node.radius_outer) - domain.y(node.radius_inner);
    inner_arc.min(band / node.text_len * sizing.font_factor)
}
