use gnuplot::*;
use smove::{SmoveConfig, Trajectory};
use std::error::Error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    // RUST_LOG=smove=trace shows every split made by the limiters
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // -----------------------
    // 1. Set up parameters
    // -----------------------
    // Either pass a TOML file as the first argument or use the built-in move.
    let config = match std::env::args().nth(1) {
        Some(path) => SmoveConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => SmoveConfig::new(2.0, 1.2) // 2 m at 1.2 m/s^2
            .with_v_min(0.2)
            .with_v_max(1.0),
    };

    // -------------------------
    // 2. Compute the move
    // -------------------------
    let trajectory = Trajectory::new(&config)?;
    let total_time = trajectory.get_duration();
    tracing::info!(
        "Computed {} segment(s), total motion time {:.3} s",
        trajectory.get_segments().len(),
        total_time
    );

    // -------------------------
    // 3. Sample the move
    // -------------------------
    let sampling_rate = 100.0; // points per second
    let mut time_axis = Vec::new();
    let mut positions = Vec::new();
    let mut velocities = Vec::new();
    for sample in trajectory.sample_at(sampling_rate)? {
        time_axis.push(sample.t);
        velocities.push(sample.v);
        positions.push(sample.x);
    }

    let final_position = positions.last().copied().unwrap_or(trajectory.get_x0());
    if (final_position - trajectory.get_xf()).abs() > 0.01 {
        tracing::warn!("Final sample is off target by more than 0.01 units.");
    }

    // --------------
    // 4. Plot data
    // --------------
    let mut fg = Figure::new();
    {
        let axes = fg.axes2d();
        axes.set_title("Position and Velocity vs. Time", &[]);
        axes.set_x_label("Time (s)", &[]);
        axes.lines(&time_axis, &positions, &[Color("blue"), Caption("Position")]);
        axes.lines(&time_axis, &velocities, &[Color("red"), Caption("Velocity")]);
    }

    // Attempt to show in a pop-up window (might require gnuplot installed)
    fg.show().map_err(|e| format!("Failed to display plot: {e}"))?;

    println!("Plot generated. Total motion time: {:.3} seconds.", total_time);
    Ok(())
}
