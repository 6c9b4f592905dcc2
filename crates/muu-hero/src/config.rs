use crate::HeroError;

/// Recognised hero options.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroConfig {
    /// Points in the particle cloud. Zero yields an empty cloud.
    pub particle_count: u32,
    /// Radius of the sphere the particles are sampled from.
    pub radius: f32,
    pub ring_count: u32,
    /// Distance between consecutive rings; ring `i` sits at `i * ring_gap`.
    pub ring_gap: f32,
    /// Forces the static panel regardless of host capability.
    pub reduced_motion_override: bool,
    /// Build-level switch for the animated branch.
    pub rich_rendering_enabled: bool,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            particle_count: 2600,
            radius: 22.0,
            ring_count: 12,
            ring_gap: 2.2,
            reduced_motion_override: false,
            rich_rendering_enabled: true,
        }
    }
}

impl HeroConfig {
    pub fn validate(&self) -> Result<(), HeroError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(HeroError::InvalidConfig {
                field: "radius",
                reason: "must be a positive finite number",
            });
        }
        if !(self.ring_gap.is_finite() && self.ring_gap > 0.0) {
            return Err(HeroError::InvalidConfig {
                field: "ring_gap",
                reason: "must be a positive finite number",
            });
        }
        Ok(())
    }
}
