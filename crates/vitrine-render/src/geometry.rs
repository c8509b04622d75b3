//! Surface sampling for primitive shapes.
//!
//! Shapes are drawn as clouds of surface points with normals. `resolution`
//! is the number of segments around the widest circumference; callers pick
//! it from the projected size so small parts stay cheap.

use std::f32::consts::{PI, TAU};

use vitrine_core::Vec3;
use vitrine_scene::Shape;

/// A point on a surface with its outward normal, in local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub position: Vec3,
    pub normal: Vec3,
}

impl SurfacePoint {
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            normal: normal.normalize_or_zero(),
        }
    }
}

/// Radius of a sphere around the origin enclosing the shape.
pub fn bounding_radius(shape: &Shape) -> f32 {
    match *shape {
        Shape::Group => 0.0,
        Shape::Sphere { radius } => radius,
        Shape::Capsule { radius, length } => radius + length * 0.5,
        Shape::Cuboid { size } => size.length() * 0.5,
        Shape::Plane { width, height } => (width * width + height * height).sqrt() * 0.5,
        Shape::Cylinder { radius, height } => (radius * radius + height * height * 0.25).sqrt(),
    }
}

/// Sample the surface of `shape`.
pub fn surface_points(shape: &Shape, resolution: usize) -> Vec<SurfacePoint> {
    let res = resolution.max(4);
    match *shape {
        Shape::Group => Vec::new(),
        Shape::Sphere { radius } => sphere(radius, res),
        Shape::Capsule { radius, length } => capsule(radius, length, res),
        Shape::Cuboid { size } => cuboid(size, res),
        Shape::Plane { width, height } => grid(res, |u, v| {
            SurfacePoint::new(Vec3::new((u - 0.5) * width, (v - 0.5) * height, 0.0), Vec3::Z)
        }),
        Shape::Cylinder { radius, height } => cylinder(radius, height, res),
    }
}

fn sphere(radius: f32, res: usize) -> Vec<SurfacePoint> {
    let rings = res / 2;
    let mut points = Vec::with_capacity((rings + 1) * res);
    for i in 0..=rings {
        let theta = PI * i as f32 / rings as f32;
        for j in 0..res {
            let phi = TAU * j as f32 / res as f32;
            let n = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
            points.push(SurfacePoint::new(n * radius, n));
        }
    }
    points
}

fn capsule(radius: f32, length: f32, res: usize) -> Vec<SurfacePoint> {
    let half = length * 0.5;
    let mut points: Vec<SurfacePoint> = sphere(radius, res)
        .into_iter()
        .map(|p| {
            let shift = if p.normal.y >= 0.0 { half } else { -half };
            SurfacePoint::new(p.position + Vec3::Y * shift, p.normal)
        })
        .collect();
    let rows = ((length / (radius.max(1e-3) * TAU) * res as f32).ceil() as usize).max(1);
    for i in 0..=rows {
        let y = -half + length * i as f32 / rows as f32;
        for j in 0..res {
            let phi = TAU * j as f32 / res as f32;
            let n = Vec3::new(phi.cos(), 0.0, phi.sin());
            points.push(SurfacePoint::new(n * radius + Vec3::Y * y, n));
        }
    }
    points
}

fn cylinder(radius: f32, height: f32, res: usize) -> Vec<SurfacePoint> {
    let half = height * 0.5;
    let mut points = Vec::new();
    let rows = ((height / (radius.max(1e-3) * TAU) * res as f32).ceil() as usize).max(1);
    for i in 0..=rows {
        let y = -half + height * i as f32 / rows as f32;
        for j in 0..res {
            let phi = TAU * j as f32 / res as f32;
            let n = Vec3::new(phi.cos(), 0.0, phi.sin());
            points.push(SurfacePoint::new(n * radius + Vec3::Y * y, n));
        }
    }
    let rings = (res / 4).max(1);
    for cap in [half, -half] {
        let normal = Vec3::Y * cap.signum();
        for i in 1..=rings {
            let r = radius * i as f32 / rings as f32;
            for j in 0..res {
                let phi = TAU * j as f32 / res as f32;
                points.push(SurfacePoint::new(
                    Vec3::new(phi.cos() * r, cap, phi.sin() * r),
                    normal,
                ));
            }
        }
    }
    points
}

fn cuboid(size: Vec3, res: usize) -> Vec<SurfacePoint> {
    let h = size * 0.5;
    let steps = (res / 4).max(2);
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (-Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::Y, Vec3::X, Vec3::Z),
        (-Vec3::Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (-Vec3::Z, Vec3::X, Vec3::Y),
    ];
    let mut points = Vec::with_capacity(6 * (steps + 1) * (steps + 1));
    for (normal, u_axis, v_axis) in faces {
        let centre = normal * h;
        let u_half = u_axis * h;
        let v_half = v_axis * h;
        for i in 0..=steps {
            let u = i as f32 / steps as f32 * 2.0 - 1.0;
            for j in 0..=steps {
                let v = j as f32 / steps as f32 * 2.0 - 1.0;
                points.push(SurfacePoint::new(centre + u_half * u + v_half * v, normal));
            }
        }
    }
    points
}

fn grid(res: usize, point: impl Fn(f32, f32) -> SurfacePoint) -> Vec<SurfacePoint> {
    let steps = (res / 2).max(2);
    let mut points = Vec::with_capacity((steps + 1) * (steps + 1));
    for i in 0..=steps {
        for j in 0..=steps {
            points.push(point(i as f32 / steps as f32, j as f32 / steps as f32));
        }
    }
    points
}
