/// Evenly spaced samples over a closed interval, computed like numpy.linspace.
pub(crate) struct Linspace {
    start: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    pub(crate) fn new(min: f64, max: f64, n: usize) -> Self {
        let step = if n > 1 {
            (max - min) / (n - 1) as f64
        } else {
            0.
        };
        Linspace {
            start: min,
            step,
            index: 0,
            len: n,
        }
    }

    /// Half-open `[start, stop)` sampling with a fixed step, like numpy.arange.
    ///
    /// `None` when the sample count is not a number or exceeds `max_len`.
    pub(crate) fn arange(start: f64, stop: f64, step: f64, max_len: usize) -> Option<Self> {
        let count = ((stop - start) / step).ceil().max(0.);

        if !(count <= max_len as f64) {
            return None;
        }

        Some(Linspace {
            start,
            step,
            index: 0,
            len: count as usize,
        })
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            None
        } else {
            let i = self.index;
            self.index += 1;
            Some(self.start + self.step * i as f64)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Linspace {}

#[test]
fn test_linspace() {
    let points: Vec<_> = Linspace::new(0., 1., 5).collect();

    assert_eq!(points, vec![0., 0.25, 0.5, 0.75, 1.]);
    assert_eq!(Linspace::new(3., 3., 1).collect::<Vec<_>>(), vec![3.]);
    assert_eq!(Linspace::new(0., 1., 0).count(), 0);
}

#[test]
fn test_arange() {
    let points: Vec<_> = Linspace::arange(0., 101., 1., 1000).unwrap().collect();

    assert_eq!(points.len(), 101);
    assert_eq!(points[0], 0.);
    assert_eq!(points[100], 100.);
    assert_eq!(Linspace::arange(0., 100., 5., 1000).unwrap().count(), 20);
    assert_eq!(Linspace::arange(5., 0., 1., 1000).unwrap().count(), 0);
}

#[test]
fn test_arange_len_limit() {
    assert_eq!(Linspace::arange(0., 100., 1., 100).map(|l| l.len()), Some(100));
    assert!(Linspace::arange(0., 101., 1., 100).is_none());
    assert!(Linspace::arange(0., 1e30, 1., usize::MAX).is_none());
    assert!(Linspace::arange(0., f64::INFINITY, 1., 100).is_none());
    assert!(Linspace::arange(f64::NAN, 1., 1., 100).is_some_and(|l| l.len() == 0));
}
