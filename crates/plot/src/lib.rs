//! Scene-based plotting for the kinema deformation demo.
//!
//! The renderer is an explicit [`Scene`] value: callers accumulate
//! trajectories, body outlines, markers, and velocity-field arrows, then
//! open a blocking egui window with [`Scene::show`]. There is no ambient
//! figure state; everything rendered is owned by the scene.

use eframe::egui;
use egui_plot::{Arrows, Legend, Line, Plot, PlotPoints, Points};
use kinema_core::{Body, LinearField, Trajectory};

/// A named polyline or marker set.
struct Series {
    name: String,
    points: Vec<[f64; 2]>,
}

/// A named set of velocity arrows.
struct ArrowSet {
    name: String,
    origins: Vec<[f64; 2]>,
    tips: Vec<[f64; 2]>,
}

/// An accumulating scene of plot items.
///
/// Builder methods consume and return the scene; [`Scene::show`] renders it.
#[derive(Default)]
pub struct Scene {
    lines: Vec<Series>,
    markers: Vec<Series>,
    arrows: Vec<ArrowSet>,
    legend: bool,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables a legend labeling each item by name.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Adds a trajectory as a polyline through its samples.
    #[must_use]
    pub fn trajectory(mut self, name: &str, trajectory: &Trajectory<2>) -> Self {
        self.lines.push(Series {
            name: name.to_owned(),
            points: trajectory.positions().collect(),
        });
        self
    }

    /// Adds a closed polygon through the given corner positions.
    ///
    /// The outline is closed automatically; the first corner does not need
    /// to be repeated.
    #[must_use]
    pub fn outline(mut self, name: &str, corners: &[(f64, f64)]) -> Self {
        let mut points: Vec<[f64; 2]> = corners.iter().map(|&(x1, x2)| [x1, x2]).collect();
        if let Some(&first) = points.first() {
            points.push(first);
        }
        self.lines.push(Series {
            name: name.to_owned(),
            points,
        });
        self
    }

    /// Adds a scatter of positions.
    #[must_use]
    pub fn markers(mut self, name: &str, positions: &[(f64, f64)]) -> Self {
        self.markers.push(Series {
            name: name.to_owned(),
            points: positions.iter().map(|&(x1, x2)| [x1, x2]).collect(),
        });
        self
    }

    /// Adds velocity arrows over the outer grid of the two coordinate axes.
    ///
    /// One arrow per grid node, from the node to the node plus `scale` times
    /// the velocity there.
    #[must_use]
    pub fn field_arrows(
        mut self,
        name: &str,
        field: &LinearField,
        t: f64,
        x1_values: &[f64],
        x2_values: &[f64],
        scale: f64,
    ) -> Self {
        let grid = field.velocity_grid(t, x1_values, x2_values);
        let mut origins = Vec::with_capacity(grid.rows() * grid.cols());
        let mut tips = Vec::with_capacity(grid.rows() * grid.cols());

        for (row, &x2) in x2_values.iter().enumerate() {
            for (col, &x1) in x1_values.iter().enumerate() {
                origins.push([x1, x2]);
                tips.push([
                    x1 + scale * grid.v1(row, col),
                    x2 + scale * grid.v2(row, col),
                ]);
            }
        }

        self.arrows.push(ArrowSet {
            name: name.to_owned(),
            origins,
            tips,
        });
        self
    }

    /// Opens a blocking egui window displaying the scene.
    ///
    /// Blocks until the window is closed by the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn show(self, title: &str) -> Result<(), eframe::Error> {
        eframe::run_native(
            title,
            eframe::NativeOptions::default(),
            Box::new(move |_cc| Ok(Box::new(SceneApp { scene: self }))),
        )
    }
}

/// Corner positions of `body` at time `t` from each corner's closed-form
/// motion, ready for [`Scene::outline`]. `None` if any corner lacks a
/// motion.
#[must_use]
pub fn deformed_outline(body: &Body, t: f64) -> Option<Vec<(f64, f64)>> {
    body.corner_positions_at(t)
}

/// The egui [`eframe::App`] that renders a finished scene.
struct SceneApp {
    scene: Scene,
}

impl eframe::App for SceneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut plot = Plot::new("kinema-scene").data_aspect(1.0);
            if self.scene.legend {
                plot = plot.legend(Legend::default());
            }
            plot.show(ui, |plot_ui| {
                for series in &self.scene.lines {
                    let points: PlotPoints = series.points.iter().copied().collect();
                    plot_ui.line(Line::new(points).name(&series.name));
                }
                for series in &self.scene.markers {
                    let points: PlotPoints = series.points.iter().copied().collect();
                    plot_ui.points(Points::new(points).radius(3.0).name(&series.name));
                }
                for arrows in &self.scene.arrows {
                    let origins: PlotPoints = arrows.origins.iter().copied().collect();
                    let tips: PlotPoints = arrows.tips.iter().copied().collect();
                    plot_ui.arrows(Arrows::new(origins, tips).name(&arrows.name));
                }
            });
        });
    }
}
