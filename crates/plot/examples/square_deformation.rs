//! Reproduces the demo figures: a square of material points advected by the
//! default field `v1 = sin(t)·x1`, `v2 = t·x2`, with integrated trajectories,
//! deformed outlines at several times, and velocity arrows.

use kinema_core::{Body, LinearField, default_field_motion};
use kinema_plot::{Scene, deformed_outline};
use kinema_solvers::transient::{advect, rk3};

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let spacing = (end - start) / (n - 1) as f64;
    (0..n).map(|i| start + spacing * i as f64).collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let field = LinearField::default();
    let body = Body::square_with_motion("square", 2.0, 8, |x1, x2| default_field_motion(x1, x2))?;
    let config = rk3::Config::default();

    let trajectories = advect::advect_body(&field, &body, 0.0, 3.0, &config)?;

    let mut scene = Scene::new().legend();

    // Initial square and starting positions.
    let initial: Vec<(f64, f64)> = body.corner_points().map(|p| p.position()).collect();
    scene = scene.outline("square at t=0", &initial);
    let starts: Vec<(f64, f64)> = body.points().iter().map(|p| p.position()).collect();
    scene = scene.markers("initial points", &starts);

    // A few representative trajectories.
    for (point, trajectory) in body.points().iter().zip(&trajectories).step_by(7) {
        scene = scene.trajectory(&format!("point {}", point.id()), trajectory);
    }

    // Deformed squares from the closed-form corner motion.
    for &t in &[0.5, 1.0, 2.0, 3.0] {
        if let Some(corners) = deformed_outline(&body, t) {
            scene = scene.outline(&format!("square at t={t}"), &corners);
        }
    }

    // Velocity arrows at t = 1 over the plotting region.
    let x1_axis = linspace(-5.0, 2.0, 15);
    let x2_axis = linspace(-1.0, 5.0, 15);
    scene = scene.field_arrows("velocity at t=1", &field, 1.0, &x1_axis, &x2_axis, 0.05);

    scene.show("square deformation")?;
    Ok(())
}
