use glam::Vec3;

use crate::scene::node::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightKind {
    #[default]
    Point,
    Spot,
    Sun,
}

impl LightKind {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "point" => Some(Self::Point),
            "spot" => Some(Self::Spot),
            "sun" => Some(Self::Sun),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Spot => "spot",
            Self::Sun => "sun",
        }
    }
}

/// A light placed in the scene. Its attributes do not take part in
/// transform resolution; only its node does.
#[derive(Debug, Clone)]
pub struct Light {
    pub(crate) node: Node,
    pub kind: LightKind,
    pub color: Vec3,
    pub energy: f32,
    /// Falloff distance.
    pub distance: f32,
    /// Spot cone angle in degrees.
    pub spot_angle: f32,
}

impl Light {
    pub(crate) fn new() -> Self {
        Self {
            node: Node::new(),
            kind: LightKind::Point,
            color: Vec3::ONE,
            energy: 1.0,
            distance: 25.0,
            spot_angle: 45.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn node(&self) -> &Node {
        &self.node
    }
}
