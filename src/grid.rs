use tracing::{debug, warn};

use crate::error::{ErrorKind, FuzzyError, FuzzyResult};
use crate::inference::ControlSystem;
use crate::inputs::Inputs;
use crate::outputs::Outputs;
use crate::variable::Variable;

/// One swept input: the variable and the values it takes, in order.
pub type Axis = (Variable, Vec<f64>);

/// Evaluates a control system over the cartesian product of input axes,
/// e.g. to draw a control surface.
#[derive(Clone, Debug)]
pub struct GridEvaluator<'s> {
    system: &'s ControlSystem,
    base: Inputs,
}

impl<'s> GridEvaluator<'s> {
    pub fn new(system: &'s ControlSystem) -> Self {
        Self {
            system,
            base: Inputs::new(),
        }
    }

    /// Fixed values for inputs that are not swept. Axis values take precedence.
    pub fn with_base_inputs(mut self, base: Inputs) -> Self {
        self.base = base;
        self
    }

    /// Evaluates every grid point. The first axis varies slowest.
    ///
    /// A failing point never aborts the sweep; it is kept in the [`Surface`]
    /// with its error so callers can tell it apart from a real output.
    pub fn sweep(&self, axes: &[Axis]) -> Surface {
        let shape: Vec<usize> = axes.iter().map(|(_, values)| values.len()).collect();
        let len = shape.iter().product();
        let mut cells = Vec::with_capacity(len);
        let mut ctx = self.system.context();
        let mut inputs = self.base.clone();
        let mut index = vec![0; axes.len()];

        for _ in 0..len {
            for ((var, values), &i) in axes.iter().zip(&index) {
                inputs.add(*var, values[i]);
            }

            let cell = self.system.evaluate_with(&mut ctx, &inputs);

            if let Err(err) = &cell {
                warn!(coordinates = ?index, error = %err, "grid point failed");
            }

            cells.push(cell);

            // Odometer increment, last axis fastest
            for (digit, &size) in index.iter_mut().zip(&shape).rev() {
                *digit += 1;
                if *digit < size {
                    break;
                }
                *digit = 0;
            }
        }

        debug!(points = len, axes = axes.len(), "swept grid");

        Surface {
            axes: axes.to_vec(),
            shape,
            cells,
        }
    }
}

/// A failed grid point, or a point where one output had no active rules.
#[derive(Clone, Debug, PartialEq)]
pub struct GridFailure {
    pub kind: ErrorKind,
    /// Input values along each axis
    pub coordinates: Vec<f64>,
    /// The output concerned, `None` when the whole evaluation failed
    pub output: Option<Variable>,
    pub error: FuzzyError,
}

/// Dense, row-major results of a sweep.
#[derive(Clone, Debug)]
pub struct Surface {
    axes: Vec<Axis>,
    shape: Vec<usize>,
    cells: Vec<FuzzyResult<Outputs>>,
}

impl Surface {
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat position of a multi-dimensional grid index.
    pub fn flat_index(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.shape.len() {
            return None;
        }

        index
            .iter()
            .zip(&self.shape)
            .try_fold(0, |flat, (&i, &size)| (i < size).then_some(flat * size + i))
    }

    pub fn cell(&self, index: &[usize]) -> Option<&FuzzyResult<Outputs>> {
        self.cells.get(self.flat_index(index)?)
    }

    /// Input values of the point at a flat position, `None` past the last point.
    pub fn coordinates(&self, flat: usize) -> Option<Vec<f64>> {
        // Also rules out empty axes, which leave no points at all
        if flat >= self.len() {
            return None;
        }

        let mut rest = flat;
        let mut coords = vec![0.; self.shape.len()];

        for ((coord, &size), (_, values)) in coords.iter_mut().zip(&self.shape).zip(&self.axes).rev() {
            *coord = values[rest % size];
            rest /= size;
        }

        Some(coords)
    }

    /// One entry per point for `output`, `None` wherever no value exists.
    pub fn values(&self, output: Variable) -> Vec<Option<f64>> {
        self.cells
            .iter()
            .map(|cell| match cell {
                Ok(outputs) => outputs.get(output).and_then(|v| v.as_ref().ok().copied()),
                Err(_) => None,
            })
            .collect()
    }

    pub fn failures(&self) -> Vec<GridFailure> {
        let mut failures = Vec::new();

        for (flat, cell) in self.cells.iter().enumerate() {
            // Every flat position of a stored cell is in range
            let coordinates = self.coordinates(flat).unwrap_or_default();

            match cell {
                Err(error) => failures.push(GridFailure {
                    kind: error.kind(),
                    coordinates,
                    output: None,
                    error: error.clone(),
                }),
                Ok(outputs) => {
                    for (var, _, value) in outputs.iter() {
                        if let Err(error) = value {
                            failures.push(GridFailure {
                                kind: error.kind(),
                                coordinates: coordinates.clone(),
                                output: Some(var),
                                error: error.clone(),
                            });
                        }
                    }
                },
            }
        }

        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::Triangular;
    use crate::rules::Rules;
    use crate::universe::Universe;
    use crate::variable::Variables;

    fn steps(start: f64, stop: f64, step: f64) -> Vec<f64> {
        Universe::arange(start, stop, step).unwrap().points().to_vec()
    }

    // Tiny system: fan_speed follows temperature, gated by humidity
    fn system() -> (ControlSystem, Variable, Variable, Variable, Variable) {
        let mut vars = Variables::new();
        let universe = Universe::arange(0., 101., 1.).unwrap();
        let temperature = vars.antecedent("temperature", universe.clone()).unwrap();
        let humidity = vars.antecedent("humidity", universe.clone()).unwrap();
        let fan_speed = vars.consequent("fan_speed", universe.clone()).unwrap();
        let alarm = vars.consequent("alarm", universe).unwrap();

        vars.add_term(temperature, "Cold", Triangular::new(0., 0., 50.).unwrap()).unwrap();
        vars.add_term(temperature, "Hot", Triangular::new(50., 100., 100.).unwrap()).unwrap();
        vars.add_term(humidity, "Wet", Triangular::new(0., 100., 100.).unwrap()).unwrap();
        vars.add_term(fan_speed, "Low", Triangular::new(0., 0., 50.).unwrap()).unwrap();
        vars.add_term(fan_speed, "High", Triangular::new(50., 100., 100.).unwrap()).unwrap();
        vars.add_term(alarm, "On", Triangular::new(50., 100., 100.).unwrap()).unwrap();

        let mut rules = Rules::new();

        rules.add(temperature.is("Cold"), fan_speed.term("Low"));
        rules.add(temperature.is("Hot"), fan_speed.term("High"));
        rules.add(temperature.is("Hot") & humidity.is("Wet"), alarm.term("On"));

        (
            ControlSystem::new(vars, rules).unwrap(),
            temperature,
            humidity,
            fan_speed,
            alarm,
        )
    }

    #[test]
    fn sweep_shape_and_order() {
        let (system, t, h, f, _) = system();
        let surface = GridEvaluator::new(&system).sweep(&[(t, steps(0., 101., 5.)), (h, steps(0., 101., 25.))]);

        assert_eq!(surface.shape(), [21, 5]);
        assert_eq!(surface.len(), 105);
        assert_eq!(surface.flat_index(&[1, 2]), Some(7));
        assert_eq!(surface.flat_index(&[21, 0]), None);
        assert_eq!(surface.coordinates(7), Some(vec![5., 50.]));
        assert_eq!(surface.coordinates(104), Some(vec![100., 100.]));
        assert_eq!(surface.coordinates(105), None);

        let direct = system.evaluate(&Inputs::new().with(t, 5.).with(h, 50.)).unwrap();

        assert_eq!(surface.cell(&[1, 2]), Some(&Ok(direct)));
        assert!(surface.values(f).iter().all(Option::is_some));
    }

    #[test]
    fn failures_are_recorded_not_zeroed() {
        let (system, t, h, f, alarm) = system();
        let surface = GridEvaluator::new(&system).sweep(&[(t, vec![0., 100.]), (h, vec![0., 100.])]);
        let failures = surface.failures();

        // Alarm needs Hot & Wet; only (100, 100) fires it
        assert_eq!(failures.len(), 3);
        assert!(failures.iter().all(|f| f.kind == ErrorKind::NoActiveRules && f.output == Some(alarm)));
        assert_eq!(failures[0].coordinates, vec![0., 0.]);
        assert_eq!(surface.values(alarm)[..3], [None, None, None]);
        assert!(surface.values(alarm)[3].is_some());
        assert!(surface.values(f).iter().all(Option::is_some));
    }

    #[test]
    fn missing_axis_fails_each_point() {
        let (system, t, h, f, _) = system();
        let axes = [(t, vec![10., 20., 30.])];
        let surface = GridEvaluator::new(&system).sweep(&axes);
        let failures = surface.failures();

        assert_eq!(failures.len(), 3);
        assert_eq!(failures[2].kind, ErrorKind::MissingInput);
        assert_eq!(failures[2].coordinates, vec![30.]);
        assert_eq!(failures[2].output, None);
        assert_eq!(surface.values(f), vec![None; 3]);

        let surface = GridEvaluator::new(&system)
            .with_base_inputs(Inputs::new().with(h, 50.))
            .sweep(&axes);

        assert!(surface.values(f).iter().all(Option::is_some));
    }

    #[test]
    fn empty_axis_yields_empty_surface() {
        let (system, t, h, _, _) = system();
        let surface = GridEvaluator::new(&system).sweep(&[(t, vec![]), (h, vec![1.])]);

        assert!(surface.is_empty());
        assert!(surface.failures().is_empty());
        assert_eq!(surface.coordinates(0), None);

        let surface = GridEvaluator::new(&system).sweep(&[(t, vec![])]);

        assert_eq!(surface.shape(), [0]);
        assert_eq!(surface.coordinates(0), None);
        assert_eq!(surface.cell(&[0]), None);
    }

    #[test]
    fn coordinates_out_of_range() {
        let (system, t, h, _, _) = system();
        let surface = GridEvaluator::new(&system).sweep(&[(t, vec![1., 2.]), (h, vec![50.])]);

        assert_eq!(surface.coordinates(1), Some(vec![2., 50.]));
        assert_eq!(surface.coordinates(2), None);
        assert_eq!(surface.coordinates(5), None);
    }
}
