//! Lazy cartesian product over option domains.

use std::fmt;
use std::sync::Arc;

type Setter<T> = dyn Fn(&mut T, usize) + Send + Sync;

struct Axis<T> {
    name: &'static str,
    len: usize,
    apply: Arc<Setter<T>>,
}

impl<T> Clone for Axis<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            len: self.len,
            apply: Arc::clone(&self.apply),
        }
    }
}

/// Finite domains for the fields of an options struct.
///
/// Every alternative starts from `base` and applies one value per axis.
/// Axes declared first vary slowest.
pub struct Blueprint<T> {
    base: T,
    axes: Vec<Axis<T>>,
}

impl<T: Clone> Clone for Blueprint<T> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            axes: self.axes.clone(),
        }
    }
}

impl<T> fmt::Debug for Blueprint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.axes.iter().map(|a| (a.name, a.len)))
            .finish()
    }
}

impl<T: Clone> Blueprint<T> {
    pub fn new(base: T) -> Self {
        Self {
            base,
            axes: Vec::new(),
        }
    }

    /// Add an axis. Panics on an empty domain, which would make the whole
    /// product empty.
    pub fn axis<V, F>(mut self, name: &'static str, values: Vec<V>, set: F) -> Self
    where
        V: Clone + Send + Sync + 'static,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        assert!(!values.is_empty(), "axis `{name}` has an empty domain");
        let len = values.len();
        self.axes.push(Axis {
            name,
            len,
            apply: Arc::new(move |target: &mut T, i: usize| set(target, values[i].clone())),
        });
        self
    }

    pub fn axis_names(&self) -> Vec<&'static str> {
        self.axes.iter().map(|a| a.name).collect()
    }

    /// Number of alternatives: the product of all domain sizes.
    pub fn len(&self) -> usize {
        self.axes.iter().map(|a| a.len).product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A fresh iterator over every alternative.
    pub fn alternatives(&self) -> Alternatives<T> {
        Alternatives {
            blueprint: self.clone(),
            cursor: Some(vec![0; self.axes.len()]),
            remaining: self.len(),
        }
    }
}

/// Iterator returned by [`Blueprint::alternatives`].
pub struct Alternatives<T> {
    blueprint: Blueprint<T>,
    cursor: Option<Vec<usize>>,
    remaining: usize,
}

impl<T: Clone> Alternatives<T> {
    fn advance(&mut self) {
        let Some(cursor) = self.cursor.as_mut() else {
            return;
        };
        for (position, axis) in cursor.iter_mut().zip(&self.blueprint.axes).rev() {
            *position += 1;
            if *position < axis.len {
                return;
            }
            *position = 0;
        }
        self.cursor = None;
    }
}

impl<T: Clone> Iterator for Alternatives<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let cursor = self.cursor.as_ref()?;
        let mut item = self.blueprint.base.clone();
        for (axis, &i) in self.blueprint.axes.iter().zip(cursor) {
            (axis.apply)(&mut item, i);
        }
        self.remaining = self.remaining.saturating_sub(1);
        self.advance();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Clone> ExactSizeIterator for Alternatives<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    #[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
    struct Point {
        x: u8,
        y: bool,
    }

    fn grid() -> Blueprint<Point> {
        Blueprint::new(Point::default())
            .axis("x", vec![1u8, 2, 3], |p, v| p.x = v)
            .axis("y", vec![true, false], |p, v| p.y = v)
    }

    #[test]
    fn last_axis_varies_fastest() {
        let all: Vec<Point> = grid().alternatives().collect();
        assert_eq!(
            all,
            vec![
                Point { x: 1, y: true },
                Point { x: 1, y: false },
                Point { x: 2, y: true },
                Point { x: 2, y: false },
                Point { x: 3, y: true },
                Point { x: 3, y: false },
            ]
        );
    }

    #[test]
    fn restartable_and_exact_size() {
        let blueprint = grid();
        let mut first = blueprint.alternatives();
        assert_eq!(first.len(), 6);
        first.next();
        assert_eq!(first.len(), 5);
        assert_eq!(blueprint.alternatives().count(), 6);
        assert_eq!(blueprint.axis_names(), vec!["x", "y"]);
    }

    #[test]
    fn no_axes_yields_the_base_once() {
        let blueprint = Blueprint::new(Point { x: 9, y: true });
        assert_eq!(blueprint.alternatives().collect::<Vec<_>>(), vec![Point { x: 9, y: true }]);
    }

    #[test]
    #[should_panic(expected = "empty domain")]
    fn empty_domain_panics() {
        let _ = Blueprint::new(Point::default()).axis("x", Vec::<u8>::new(), |p, v| p.x = v);
    }

    proptest! {
        #[test]
        fn product_is_total_and_unique(sizes in prop::collection::vec(1usize..5, 0..5)) {
            let mut blueprint = Blueprint::new(Vec::<usize>::new());
            for (axis, &size) in sizes.iter().enumerate() {
                blueprint = blueprint.axis("axis", (0..size).collect(), move |v: &mut Vec<usize>, x| {
                    v.resize(axis + 1, 0);
                    v[axis] = x;
                });
            }
            let expected: usize = sizes.iter().product();
            let all: Vec<Vec<usize>> = blueprint.alternatives().collect();
            prop_assert_eq!(all.len(), expected);
            prop_assert_eq!(blueprint.len(), expected);
            let unique: BTreeSet<_> = all.iter().cloned().collect();
            prop_assert_eq!(unique.len(), expected);
        }
    }
}
