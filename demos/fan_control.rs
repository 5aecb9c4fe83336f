//! Fan speed from temperature and humidity.
//!
//! `RUST_LOG=fuzzy_control=debug cargo run --example fan_control`

use fuzzy_control::{ControlSystem, FuzzyResult, GridEvaluator, Inputs, Rules, Triangular, Universe, Variables};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> FuzzyResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut vars = Variables::new();
    let percent = Universe::arange(0., 101., 1.)?;
    let temperature = vars.antecedent("temperature", percent.clone())?;
    let humidity = vars.antecedent("humidity", percent.clone())?;
    let fan_speed = vars.consequent("fan_speed", percent)?;

    for (var, [low, mid, high]) in [
        (temperature, ["Cold", "Warm", "Hot"]),
        (humidity, ["Dry", "Comfort", "Wet"]),
        (fan_speed, ["Low", "Medium", "High"]),
    ] {
        vars.add_term(var, low, Triangular::new(0., 0., 50.)?)?;
        vars.add_term(var, mid, Triangular::new(25., 50., 75.)?)?;
        vars.add_term(var, high, Triangular::new(50., 100., 100.)?)?;
    }

    let (t, h, f) = (temperature, humidity, fan_speed);
    let mut rules = Rules::with_capacity(9);

    rules.add(t.is("Cold") & h.is("Dry"), f.term("Low"));
    rules.add(t.is("Cold") & h.is("Comfort"), f.term("Low"));
    rules.add(t.is("Cold") & h.is("Wet"), f.term("Medium"));
    rules.add(t.is("Warm") & h.is("Dry"), f.term("Low"));
    rules.add(t.is("Warm") & h.is("Comfort"), f.term("Medium"));
    rules.add(t.is("Warm") & h.is("Wet"), f.term("High"));
    rules.add(t.is("Hot") & h.is("Dry"), f.term("Medium"));
    rules.add(t.is("Hot") & h.is("Comfort"), f.term("High"));
    rules.add(t.is("Hot") & h.is("Wet"), f.term("High"));

    let system = ControlSystem::new(vars, rules)?;

    for (temp, humid) in [(30., 70.), (10., 20.), (30., 50.), (80., 80.), (45., 30.), (90., 40.)] {
        let outputs = system.evaluate(&Inputs::new().with(t, temp).with(h, humid))?;
        let speed = outputs.value_or(f, 50.)?;

        info!(temperature = temp, humidity = humid, fan_speed = %format!("{speed:.2}"), "evaluated");
    }

    let axis = Universe::arange(0., 101., 5.)?.points().to_vec();
    let surface = GridEvaluator::new(&system).sweep(&[(t, axis.clone()), (h, axis)]);

    for failure in surface.failures() {
        warn!(kind = ?failure.kind, coordinates = ?failure.coordinates, "no value");
    }

    let speeds: Vec<f64> = surface.values(f).into_iter().flatten().collect();
    let (min, max) = speeds
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| (lo.min(s), hi.max(s)));

    info!(points = surface.len(), min, max, "control surface");

    Ok(())
}
