/// Receives the intermediate results of an expansion as they are produced.
///
/// [`expand_with_steps`](crate::expand::expand_with_steps) reports one
/// [`ExpansionStep`](crate::expand::ExpansionStep) per binomial term. Passing `&mut ()` drops
/// them; a `&mut Vec<_>` records them in the order `k = 0, 1, ..., n`.
pub trait StepCollector<S> {
    /// Records one step.
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
