/// A type that collects the steps of an algorithm.
///
/// [`StepCollector`] is also implemented for the unit type `()`. This is useful when the steps
/// taken are not needed, such as when simplifying an intermediate expression that is never shown.
pub trait StepCollector<S> {
    /// Adds a step to the collector.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn collect_twice(collector: &mut dyn StepCollector<u8>) {
        collector.push(1);
        collector.push(2);
    }

    #[test]
    fn vec_keeps_order() {
        let mut steps = Vec::new();
        collect_twice(&mut steps);
        assert_eq!(steps, vec![1, 2]);
    }

    #[test]
    fn unit_discards() {
        collect_twice(&mut ());
    }
}
