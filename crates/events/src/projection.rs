use crate::Event;

/// A projection folds an ordered event stream into a read model.
///
/// `apply` must only depend on the projection's own state and the event, so
/// replaying the same stream always rebuilds the same read model. Events a
/// projection does not care about are ignored.
pub trait Projection: Default {
    type Ev: Event;

    /// Apply a single event, in stream order.
    fn apply(&mut self, event: &Self::Ev);

    /// Build a fresh read model from a complete stream.
    fn replay<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a Self::Ev>,
        Self::Ev: 'a,
    {
        events.into_iter().fold(Self::default(), |mut projection, event| {
            projection.apply(event);
            projection
        })
    }
}
