use super::Vec2;

/// Coordinate space of a parent container, expressed in window coordinates.
///
/// Children of the container store positions relative to `origin`; pointer
/// positions arrive in window space and must pass through [`to_local`] first.
///
/// [`to_local`]: LocalSpace::to_local
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct LocalSpace {
    pub origin: Vec2,
}

impl LocalSpace {
    #[inline]
    pub const fn new(origin: Vec2) -> Self {
        Self { origin }
    }

    /// Window point → container-local point.
    #[inline]
    pub fn to_local(self, global: Vec2) -> Vec2 {
        global - self.origin
    }

    /// Container-local point → window point.
    #[inline]
    pub fn to_global(self, local: Vec2) -> Vec2 {
        local + self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_local_subtracts_origin() {
        let space = LocalSpace::new(Vec2::new(240.0, 0.0));
        assert_eq!(space.to_local(Vec2::new(250.0, 20.0)), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn round_trip_is_identity() {
        let space = LocalSpace::new(Vec2::new(-3.5, 12.0));
        let p = Vec2::new(7.0, 9.0);
        assert_eq!(space.to_global(space.to_local(p)), p);
    }
}
