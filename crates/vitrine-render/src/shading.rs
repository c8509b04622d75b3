//! Lighting of surface points.

use vitrine_core::{Rgb, Vec3};
use vitrine_scene::{LightKind, Material, SceneLight};

use crate::chars::{SHADE_RAMP, WIRE_CHAR};

/// Colour of a surface point lit by `lights`, seen from `eye`.
pub fn shade(
    material: &Material,
    position: Vec3,
    normal: Vec3,
    eye: Vec3,
    lights: &[&SceneLight],
) -> Rgb {
    let view = (eye - position).normalize_or_zero();
    let shininess = (2.0 / (material.roughness * material.roughness).max(0.01)).min(256.0);
    let reflectance = 0.04 + 0.96 * material.metalness;

    let mut diffuse = Rgb::BLACK;
    let mut specular = Rgb::BLACK;
    for light in lights {
        let radiance = light.color().scale(light.intensity());
        let (direction, attenuation) = match light.kind {
            LightKind::Ambient => {
                diffuse = diffuse.add(radiance);
                continue;
            }
            LightKind::Spot { .. } => ((light.position - position).normalize_or_zero(), 1.0),
            LightKind::Point { distance } => {
                let offset = light.position - position;
                let falloff = if distance > 0.0 {
                    (1.0 - offset.length() / distance).clamp(0.0, 1.0).powi(2)
                } else {
                    1.0
                };
                (offset.normalize_or_zero(), falloff)
            }
        };
        let lambert = normal.dot(direction).max(0.0);
        diffuse = diffuse.add(radiance.scale(lambert * attenuation));

        let half = (direction + view).normalize_or_zero();
        let highlight = normal.dot(half).max(0.0).powf(shininess) * attenuation;
        specular = specular.add(radiance.scale(highlight * reflectance));
    }

    material
        .color
        .modulate(diffuse)
        .scale(1.0 - material.metalness * 0.5)
        .add(specular)
        .add(material.emissive.scale(material.emissive_intensity))
        .clamped()
}

/// Glyph for a lit colour on `material`.
pub fn glyph_for(lit: Rgb, material: &Material) -> char {
    if material.wireframe {
        return WIRE_CHAR;
    }
    let level = lit.luminance().clamp(0.0, 1.0) * (SHADE_RAMP.len() - 1) as f32;
    SHADE_RAMP[(level.round() as usize).min(SHADE_RAMP.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::Theme;

    fn key_light(position: Vec3) -> SceneLight {
        SceneLight::new(
            "key",
            LightKind::Point { distance: 0.0 },
            position,
            (1.0, 1.0),
            (Rgb::WHITE, Rgb::WHITE),
            Theme::Dark,
        )
    }

    #[test]
    fn test_facing_light_is_brighter() {
        let light = key_light(Vec3::new(0.0, 0.0, 10.0));
        let material = Material::standard(Rgb::new(0.8, 0.8, 0.8));
        let eye = Vec3::new(0.0, 0.0, 5.0);
        let front = shade(&material, Vec3::ZERO, Vec3::Z, eye, &[&light]);
        let back = shade(&material, Vec3::ZERO, -Vec3::Z, eye, &[&light]);
        assert!(front.luminance() > back.luminance());
        assert_eq!(back, Rgb::BLACK);
    }

    #[test]
    fn test_emissive_shows_without_light() {
        let material = Material::standard(Rgb::BLACK).glow(Rgb::new(0.5, 0.0, 0.0), 1.0);
        let lit = shade(&material, Vec3::ZERO, Vec3::Z, Vec3::Z, &[]);
        assert_eq!(lit, Rgb::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_glyph_ramp_ends() {
        let material = Material::standard(Rgb::WHITE);
        assert_eq!(glyph_for(Rgb::BLACK, &material), SHADE_RAMP[0]);
        assert_eq!(glyph_for(Rgb::WHITE, &material), '@');
        assert_eq!(glyph_for(Rgb::WHITE, &material.wireframe()), WIRE_CHAR);
    }
}
